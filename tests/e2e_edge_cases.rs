//! End-to-end tests for edge cases: cyclic catalogs, degenerate inputs,
//! reserved names and catalog mutation errors.
//!
//! Each test drives the public API only; nothing here reaches into module
//! internals.

use pathwise::builder::{attach_virtual_start, build_graph, VIRTUAL_START};
use pathwise::catalog::seed::sample_catalog;
use pathwise::search::ZeroHeuristic;
use pathwise::{
    Advisor, AdvisorConfig, Algorithm, Course, CourseGraph, Error, LearningStyle, MemoryCatalog,
    PathFinder, PathRequest,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn sample_advisor() -> Advisor<MemoryCatalog> {
    Advisor::new(MemoryCatalog::from_snapshot(sample_catalog()), AdvisorConfig::default())
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A -> B -> A cycle with C hanging off A.
fn cyclic_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    for (name, difficulty) in [("A", 2), ("B", 4), ("C", 6)] {
        catalog
            .upsert_course(Course::new(name, difficulty, 10.0, 5.0))
            .unwrap();
    }
    catalog.set_prerequisites("A", names(&["B"])).unwrap();
    catalog.set_prerequisites("B", names(&["A"])).unwrap();
    catalog.set_prerequisites("C", names(&["A"])).unwrap();
    catalog
}

// ============================================================================
// 1. Cycles
// ============================================================================

#[test]
fn test_cyclic_graph_search_terminates() {
    let g = CourseGraph::from_routes([
        ("A", vec![("B", 1.0)]),
        ("B", vec![("C", 1.0), ("A", 1.0)]),
        ("C", vec![("A", 1.0), ("D", 1.0)]),
        ("D", vec![]),
    ])
    .unwrap();
    let finder = PathFinder::new(&g, "A", "D").unwrap().with_heuristic(&ZeroHeuristic);

    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Bfs] {
        let outcome = finder.search(algorithm).unwrap();
        assert_eq!(outcome.path, vec!["A", "B", "C", "D"], "{algorithm}");
    }
}

#[test]
fn test_cyclic_catalog_still_plans() {
    let advisor = Advisor::new(cyclic_catalog(), AdvisorConfig::default());
    let report = advisor.find_path(&PathRequest::new(["A"], "C")).unwrap();
    assert!(report.success);
    assert_eq!(report.path, names(&["A", "C"]));

    let ranked = advisor.find_alternatives(&PathRequest::new(["A"], "C")).unwrap();
    for entry in &ranked {
        let mut unique = entry.path.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), entry.path.len(), "loop in {:?}", entry.path);
    }
}

#[test]
fn test_alternatives_in_cycle_never_revisit_nodes() {
    let g = CourseGraph::from_routes([
        ("S", vec![("X", 1.0), ("Y", 2.0)]),
        ("X", vec![("Y", 1.0), ("G", 3.0)]),
        ("Y", vec![("X", 1.0), ("G", 1.0)]),
        ("G", vec![("S", 1.0)]),
    ])
    .unwrap();
    let paths = PathFinder::new(&g, "S", "G").unwrap().alternatives(f64::INFINITY);
    assert!(!paths.is_empty());
    for p in &paths {
        assert_eq!(p.start(), Some("S"));
        assert_eq!(p.end(), Some("G"));
        assert_eq!(g.path_cost(&p.nodes), Some(p.cost));
    }
}

// ============================================================================
// 2. Degenerate graphs and weights
// ============================================================================

#[test]
fn test_start_equals_goal() {
    let g = CourseGraph::from_routes([("A", vec![("B", 1.0)]), ("B", vec![])]).unwrap();
    let finder = PathFinder::new(&g, "A", "A").unwrap().with_heuristic(&ZeroHeuristic);
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Bfs] {
        let outcome = finder.search(algorithm).unwrap();
        assert_eq!(outcome.path, vec!["A"]);
        assert_eq!(outcome.cost, 0.0);
    }
    assert_eq!(finder.alternatives(f64::INFINITY).len(), 1);
}

#[test]
fn test_zero_weight_edges_are_allowed() {
    let g = CourseGraph::from_routes([
        ("A", vec![("B", 0.0), ("C", 1.0)]),
        ("B", vec![("C", 0.0)]),
        ("C", vec![]),
    ])
    .unwrap();
    let outcome = PathFinder::new(&g, "A", "C").unwrap().dijkstra();
    assert_eq!(outcome.path, vec!["A", "B", "C"]);
    assert_eq!(outcome.cost, 0.0);
}

#[test]
fn test_bad_edge_weights_are_rejected() {
    for weight in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = CourseGraph::from_routes([("A", vec![("B", weight)])]);
        assert!(matches!(result, Err(Error::Validation(_))), "{weight}");
    }
}

#[test]
fn test_empty_graph_rejects_any_endpoint() {
    let g = CourseGraph::new();
    assert!(matches!(PathFinder::new(&g, "A", "A"), Err(Error::Validation(_))));
}

// ============================================================================
// 3. Virtual start
// ============================================================================

#[test]
fn test_reserved_virtual_start_name_is_rejected() {
    let catalog = MemoryCatalog::from_snapshot(sample_catalog());
    catalog
        .upsert_course(Course::new(VIRTUAL_START, 1, 1.0, 1.0))
        .unwrap();
    let advisor = Advisor::new(catalog, AdvisorConfig::default());
    let err = advisor
        .find_path(&PathRequest::new(["Python Basics"], "Machine Learning"))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn test_duplicate_completed_courses_attach_once() {
    let mut g = build_graph(&sample_catalog(), LearningStyle::Easiest, None).unwrap();
    let completed = names(&["Drawing", "Drawing", "Drawing"]);
    assert_eq!(attach_virtual_start(&mut g, &completed).unwrap(), 1);
    assert_eq!(g.edges(VIRTUAL_START).len(), 1);

    let report = sample_advisor()
        .find_path(&PathRequest::new(["Drawing", "Drawing"], "Painting"))
        .unwrap();
    assert_eq!(report.path, names(&["Drawing", "Painting"]));
}

#[test]
fn test_nothing_completed_means_no_path() {
    let report = sample_advisor()
        .find_path(&PathRequest::new(Vec::<String>::new(), "Python Intermediate"))
        .unwrap();
    assert!(!report.success);
    assert_eq!(report.total_cost, f64::INFINITY);
}

// ============================================================================
// 4. Catalog mutation errors
// ============================================================================

#[test]
fn test_remove_course_with_dependents_fails() {
    let catalog = MemoryCatalog::from_snapshot(sample_catalog());
    let err = catalog.remove_course("Python Basics").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("Python Intermediate"));

    // A leaf course goes away cleanly; a second removal is a no-op.
    assert!(catalog.remove_course("Painting").unwrap());
    assert!(!catalog.remove_course("Painting").unwrap());
}

#[test]
fn test_set_prerequisites_on_unknown_course_is_not_found() {
    let catalog = MemoryCatalog::from_snapshot(sample_catalog());
    let err = catalog
        .set_prerequisites("Alchemy", names(&["Python Basics"]))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_invalid_course_attributes_are_rejected() {
    let catalog = MemoryCatalog::new();
    assert!(matches!(
        catalog.upsert_course(Course::new("Too Hard", 11, 10.0, 5.0)),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        catalog.upsert_course(Course::new("Negative", 3, -1.0, 5.0)),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        catalog.upsert_course(Course::new("Priceless", 3, 1.0, 11.0)),
        Err(Error::Validation(_))
    ));
    assert!(catalog.is_empty());
}

#[test]
fn test_unknown_prerequisite_is_skipped_by_builder() {
    let catalog = MemoryCatalog::new();
    catalog.upsert_course(Course::new("Solo", 2, 5.0, 5.0)).unwrap();
    catalog.set_prerequisites("Solo", names(&["Ghost Course"])).unwrap();

    let advisor = Advisor::new(catalog, AdvisorConfig::default());
    let report = advisor.find_path(&PathRequest::new(["Ghost Course"], "Solo")).unwrap();
    // The ghost name is neither a course nor a prerequisite key, so it never
    // becomes a node and the completed entry is ignored.
    assert!(!report.success);
    assert!(report.path.is_empty());
}

// ============================================================================
// 5. Advisor input errors
// ============================================================================

#[test]
fn test_advisor_input_errors() {
    let advisor = sample_advisor();
    assert!(matches!(
        advisor.courses_by_difficulty(8, 3),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        advisor.prerequisite_status("Alchemy", &[]),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        advisor.evaluate_next_courses(&names(&["Python Basics"]), None, Some(-0.1)),
        Err(Error::Configuration(_))
    ));
}
