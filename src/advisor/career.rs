//! Skill-gap analysis and career track planning.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::CatalogSource;
use crate::{Error, Result};
use super::reports::{CareerPlan, Feasibility, GapSeverity, MissingSkill, SkillGapReport};
use super::{Advisor, PathRequest};

/// Planned months per unit of path cost.
const MONTHS_PER_COST_UNIT: f64 = 0.5;

/// `(career, required courses)`. Some tracks name courses the sample catalog
/// does not carry; those show up as missing without a path.
pub const CAREER_TRACKS: &[(&str, &[&str])] = &[
    (
        "Data Scientist",
        &["Statistics", "Python Basics", "Data Analysis", "Machine Learning", "Data Visualization", "SQL Basics"],
    ),
    (
        "Software Engineer",
        &["Python Basics", "Data Structures", "Algorithms", "Web Development", "Software Engineering", "Database Systems"],
    ),
    (
        "UI/UX Designer",
        &["Graphic Design", "UI/UX Design", "User Research", "Interaction Design", "Prototyping", "Web Design"],
    ),
    (
        "Digital Marketer",
        &["Marketing Fundamentals", "Digital Marketing", "Social Media Marketing", "SEO Basics", "Marketing Analytics", "Content Marketing"],
    ),
    (
        "Product Manager",
        &["Business Fundamentals", "Product Management", "Project Management", "User Research", "Data Analysis", "Business Strategy"],
    ),
    (
        "Cybersecurity Specialist",
        &["Computer Security", "Network Security", "Cybersecurity", "Risk Management", "Ethical Hacking", "Cryptography"],
    ),
    (
        "Full Stack Developer",
        &["Python Basics", "Web Development", "Frontend Development", "Backend Development", "Database Systems", "API Development"],
    ),
    (
        "DevOps Engineer",
        &["Linux", "Cloud Computing", "DevOps", "Docker", "Kubernetes", "CI/CD Pipelines"],
    ),
    (
        "Machine Learning Engineer",
        &["Python Basics", "Mathematics", "Statistics", "Data Structures", "Algorithms", "Machine Learning", "Computer Vision"],
    ),
];

pub fn career_tracks() -> impl Iterator<Item = &'static str> {
    CAREER_TRACKS.iter().map(|(name, _)| *name)
}

impl<C: CatalogSource> Advisor<C> {
    /// Compare skill sets. Every missing skill that is a catalog course gets
    /// a path from `current`.
    pub fn skill_gap(&self, current: &[String], target: &[String]) -> Result<SkillGapReport> {
        let current_set: BTreeSet<&str> = current.iter().map(String::as_str).collect();
        let target_set: BTreeSet<&str> = target.iter().map(String::as_str).collect();
        let missing: Vec<String> = target_set.difference(&current_set).map(|s| s.to_string()).collect();
        let extra: Vec<String> = current_set.difference(&target_set).map(|s| s.to_string()).collect();
        let matched: Vec<String> = current_set.intersection(&target_set).map(|s| s.to_string()).collect();

        let snapshot = self.catalog().snapshot()?;
        let mut gaps = Vec::with_capacity(missing.len());
        for skill in &missing {
            let gap = match snapshot.course(skill) {
                Some(course) => MissingSkill {
                    skill: skill.clone(),
                    course: Some(course.clone()),
                    path: Some(self.find_path(&PathRequest::new(current.iter().cloned(), skill.as_str()))?),
                    prerequisites_needed: snapshot
                        .prerequisites_of(skill)
                        .iter()
                        .filter(|p| !current_set.contains(p.as_str()))
                        .cloned()
                        .collect(),
                },
                None => MissingSkill { skill: skill.clone(), course: None, path: None, prerequisites_needed: Vec::new() },
            };
            gaps.push(gap);
        }

        Ok(SkillGapReport {
            severity: GapSeverity::for_missing(missing.len()),
            missing,
            extra,
            matched,
            gaps,
        })
    }

    /// Plan toward a named career track: the path targets the most valuable
    /// missing course the catalog knows. Unknown tracks are `NotFound`.
    pub fn plan_career_path(&self, current: &[String], career: &str, horizon_months: u32) -> Result<CareerPlan> {
        let Some(&(name, required)) = CAREER_TRACKS.iter().find(|(name, _)| *name == career) else {
            return Err(Error::NotFound(format!(
                "Career track '{career}'. Available: {}",
                career_tracks().collect::<Vec<_>>().join(", ")
            )));
        };

        let required: Vec<String> = required.iter().map(|s| s.to_string()).collect();
        let missing: Vec<String> = required.iter().filter(|r| !current.contains(r)).cloned().collect();
        let feasibility = Feasibility::for_missing(missing.len());

        let snapshot = self.catalog().snapshot()?;
        let mut target: Option<(&str, f64)> = None;
        for course in missing.iter().filter_map(|m| snapshot.course(m)) {
            if target.is_none_or(|(_, best)| course.value > best) {
                target = Some((course.name.as_str(), course.value));
            }
        }

        let mut plan = CareerPlan {
            success: missing.is_empty(),
            career: name.to_string(),
            required,
            missing: Vec::new(),
            target: None,
            path: None,
            estimated_months: None,
            feasibility,
        };

        if let Some((course, _)) = target {
            let path = self.find_path(&PathRequest::new(current.iter().cloned(), course))?;
            plan.success = path.success;
            plan.estimated_months = path
                .success
                .then(|| (path.total_cost * MONTHS_PER_COST_UNIT).min(f64::from(horizon_months)));
            plan.target = Some(course.to_string());
            plan.path = Some(path);
        }
        debug!(career = name, missing = missing.len(), target = ?plan.target, "career plan");
        plan.missing = missing;
        Ok(plan)
    }
}
