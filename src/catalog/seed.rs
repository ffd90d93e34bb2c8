//! Built-in sample catalog: a programming/data track plus a small,
//! disconnected arts track.

use std::collections::BTreeMap;

use crate::model::Course;
use super::CatalogSnapshot;

/// `(name, difficulty, hours, value, category)`
const COURSES: &[(&str, u8, f64, f64, &str)] = &[
    ("Python Basics", 3, 20.0, 8.0, "Programming"),
    ("Python Intermediate", 5, 30.0, 7.0, "Programming"),
    ("Data Structures", 7, 40.0, 9.0, "Programming"),
    ("Algorithms", 8, 50.0, 10.0, "Programming"),
    ("Web Development", 6, 35.0, 7.0, "Programming"),
    ("Database Systems", 6, 30.0, 8.0, "Programming"),
    ("Software Engineering", 7, 45.0, 8.0, "Programming"),
    ("DevOps", 7, 40.0, 7.0, "Programming"),
    ("Machine Learning", 9, 60.0, 10.0, "AI/ML"),
    ("AI Fundamentals", 8, 45.0, 9.0, "AI/ML"),
    ("Data Science", 8, 50.0, 9.0, "Data Science"),
    ("SQL Basics", 5, 25.0, 7.0, "Data Science"),
    ("Data Analysis", 6, 35.0, 8.0, "Data Science"),
    ("Data Visualization", 6, 35.0, 8.0, "Data Science"),
    ("Predictive Analytics", 9, 50.0, 9.0, "Data Science"),
    ("Mathematics", 4, 25.0, 6.0, "Foundation"),
    ("Statistics", 5, 30.0, 7.0, "Foundation"),
    ("Drawing", 3, 20.0, 6.0, "Arts"),
    ("Painting", 5, 30.0, 6.0, "Arts"),
    ("Music Theory", 4, 25.0, 6.0, "Arts"),
];

/// `(course, prerequisites)`
const PREREQUISITES: &[(&str, &[&str])] = &[
    ("Python Basics", &[]),
    ("Python Intermediate", &["Python Basics"]),
    ("Data Structures", &["Python Intermediate"]),
    ("Algorithms", &["Data Structures"]),
    ("Web Development", &["Python Intermediate"]),
    ("Database Systems", &["Python Basics"]),
    ("Software Engineering", &["Algorithms", "Web Development"]),
    ("DevOps", &["Web Development", "Database Systems"]),
    ("Machine Learning", &["Data Structures", "Algorithms"]),
    ("AI Fundamentals", &["Data Structures", "Algorithms"]),
    ("Data Science", &["Machine Learning", "Database Systems"]),
    ("SQL Basics", &["Database Systems"]),
    ("Data Analysis", &["Statistics", "SQL Basics"]),
    ("Data Visualization", &["Python Intermediate", "Statistics"]),
    ("Predictive Analytics", &["Statistics", "Machine Learning"]),
    ("Mathematics", &[]),
    ("Statistics", &["Mathematics"]),
    ("Drawing", &[]),
    ("Painting", &["Drawing"]),
    ("Music Theory", &[]),
];

/// Version-1 snapshot of the sample catalog.
pub fn sample_catalog() -> CatalogSnapshot {
    let courses: BTreeMap<String, Course> = COURSES
        .iter()
        .map(|&(name, difficulty, hours, value, category)| {
            (name.to_string(), Course::new(name, difficulty, hours, value).with_category(category))
        })
        .collect();

    let prerequisites: BTreeMap<String, Vec<String>> = PREREQUISITES
        .iter()
        .map(|&(course, prereqs)| {
            (course.to_string(), prereqs.iter().map(|p| p.to_string()).collect())
        })
        .collect();

    CatalogSnapshot::new(1, courses, prerequisites)
}
