//! Property tests for the search engine and the arbiter.
//!
//! Graphs are small (at most six nodes) with integer weights so that path
//! costs are exact and a brute-force walk over every simple path is cheap.

use std::collections::HashSet;

use pathwise::search::{GoalEntryHeuristic, ZeroHeuristic};
use pathwise::{Action, Algorithm, CourseGraph, PathFinder, RiskLevel, UtilityArbiter};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn node(i: usize) -> String {
    format!("n{i}")
}

/// Node count plus `(from, to, weight)` triples over those nodes.
fn graph_input() -> impl Strategy<Value = (usize, Vec<(usize, usize, u8)>)> {
    (2usize..7).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n, 0u8..20), 0..18)))
}

/// Self-loops and repeated `(from, to)` pairs are dropped so every edge on a
/// path is unique.
fn build(n: usize, edges: &[(usize, usize, u8)]) -> CourseGraph {
    let mut g = CourseGraph::new();
    for i in 0..n {
        g.add_node(node(i));
    }
    let mut seen = HashSet::new();
    for &(from, to, weight) in edges {
        if from != to && seen.insert((from, to)) {
            g.add_edge(node(from), node(to), f64::from(weight)).unwrap();
        }
    }
    g
}

/// `(cheapest weighted cost, fewest hops)` over every simple path, both
/// `+∞` when the goal is unreachable.
fn brute_force(g: &CourseGraph, start: &str, goal: &str) -> (f64, f64) {
    fn walk(g: &CourseGraph, at: &str, goal: &str, visited: &mut Vec<String>, cost: f64, best: &mut (f64, f64)) {
        if at == goal {
            best.0 = best.0.min(cost);
            best.1 = best.1.min((visited.len() - 1) as f64);
            return;
        }
        for edge in g.edges(at) {
            if visited.contains(&edge.to) {
                continue;
            }
            visited.push(edge.to.clone());
            walk(g, &edge.to, goal, visited, cost + edge.weight, best);
            visited.pop();
        }
    }

    let mut best = (f64::INFINITY, f64::INFINITY);
    walk(g, start, goal, &mut vec![start.to_string()], 0.0, &mut best);
    best
}

fn actions_input() -> impl Strategy<Value = Vec<Vec<(u8, i16)>>> {
    prop::collection::vec(prop::collection::vec((0u8..=10, -100i16..100), 1..4), 1..5)
}

fn arbiter_from(input: &[Vec<(u8, i16)>]) -> UtilityArbiter {
    let actions = input
        .iter()
        .enumerate()
        .map(|(i, outcomes)| {
            let pairs: Vec<(f64, f64)> = outcomes
                .iter()
                .map(|&(p, u)| (f64::from(p) / 10.0, f64::from(u)))
                .collect();
            Action::from_pairs(format!("a{i}"), &pairs)
        })
        .collect();
    UtilityArbiter::new(actions).unwrap()
}

/// Name and score of the first action reaching the maximum of `score`.
fn first_max(arbiter: &UtilityArbiter, score: impl Fn(&Action) -> f64) -> (String, f64) {
    let mut best: Option<(String, f64)> = None;
    for action in arbiter.actions() {
        let value = score(action);
        if best.as_ref().is_none_or(|(_, b)| value > *b) {
            best = Some((action.name.clone(), value));
        }
    }
    best.unwrap()
}

// ============================================================================
// Search properties
// ============================================================================

proptest! {
    #[test]
    fn dijkstra_matches_brute_force((n, edges) in graph_input()) {
        let g = build(n, &edges);
        let goal = node(n - 1);
        let (cheapest, _) = brute_force(&g, "n0", &goal);

        let outcome = PathFinder::new(&g, "n0", &goal).unwrap().dijkstra();
        prop_assert_eq!(outcome.cost, cheapest);
        if outcome.found() {
            prop_assert_eq!(outcome.path.first().map(String::as_str), Some("n0"));
            prop_assert_eq!(outcome.path.last(), Some(&goal));
            prop_assert_eq!(g.path_cost(&outcome.path), Some(outcome.cost));
        } else {
            prop_assert!(outcome.path.is_empty());
        }
    }

    #[test]
    fn bfs_cost_is_minimum_hop_count((n, edges) in graph_input()) {
        let g = build(n, &edges);
        let goal = node(n - 1);
        let (_, fewest) = brute_force(&g, "n0", &goal);

        let outcome = PathFinder::new(&g, "n0", &goal).unwrap().search(Algorithm::Bfs).unwrap();
        prop_assert_eq!(outcome.cost, fewest);
        if outcome.found() {
            prop_assert_eq!(outcome.cost, (outcome.path.len() - 1) as f64);
        }
    }

    #[test]
    fn astar_with_admissible_heuristic_is_optimal((n, edges) in graph_input()) {
        let g = build(n, &edges);
        let goal = node(n - 1);
        let dijkstra = PathFinder::new(&g, "n0", &goal).unwrap().dijkstra();

        let entry = GoalEntryHeuristic::for_goal(&g, &goal);
        let guided = PathFinder::new(&g, "n0", &goal).unwrap().with_heuristic(&entry);
        prop_assert_eq!(guided.search(Algorithm::AStar).unwrap().cost, dijkstra.cost);

        let blind = PathFinder::new(&g, "n0", &goal).unwrap().with_heuristic(&ZeroHeuristic);
        let zero = blind.search(Algorithm::AStar).unwrap();
        prop_assert_eq!(zero.cost, dijkstra.cost);
        prop_assert_eq!(zero.algorithm, Algorithm::AStar);
    }

    #[test]
    fn alternatives_are_sorted_distinct_and_valid((n, edges) in graph_input()) {
        let g = build(n, &edges);
        let goal = node(n - 1);
        let finder = PathFinder::new(&g, "n0", &goal).unwrap();
        let paths = finder.alternatives(f64::INFINITY);
        let shortest = finder.dijkstra();

        if !shortest.found() {
            prop_assert!(paths.is_empty());
            return Ok(());
        }
        prop_assert_eq!(&paths[0].nodes, &shortest.path);
        for pair in paths.windows(2) {
            prop_assert!(pair[0].cost <= pair[1].cost);
        }
        let distinct: HashSet<&Vec<String>> = paths.iter().map(|p| &p.nodes).collect();
        prop_assert_eq!(distinct.len(), paths.len());
        for p in &paths {
            prop_assert_eq!(g.path_cost(&p.nodes), Some(p.cost));
        }
    }

    #[test]
    fn alternatives_respect_ceiling((n, edges) in graph_input(), ceiling in 0u8..40) {
        let g = build(n, &edges);
        let goal = node(n - 1);
        let ceiling = f64::from(ceiling);
        let paths = PathFinder::new(&g, "n0", &goal).unwrap().alternatives(ceiling);
        prop_assert!(paths.iter().all(|p| p.cost <= ceiling));
    }

    #[test]
    fn removed_edge_is_not_reused((n, edges) in graph_input()) {
        let g = build(n, &edges);
        let goal = node(n - 1);
        let shortest = PathFinder::new(&g, "n0", &goal).unwrap().dijkstra();
        for pair in shortest.path.windows(2) {
            let pruned = g.without_edge(&pair[0], &pair[1]);
            let again = PathFinder::new(&pruned, "n0", &goal).unwrap().dijkstra();
            prop_assert!(again.path.windows(2).all(|p| p != pair));
        }
    }
}

// ============================================================================
// Arbiter properties
// ============================================================================

proptest! {
    #[test]
    fn meu_picks_first_highest_expectation(input in actions_input()) {
        let arbiter = arbiter_from(&input);
        let decision = arbiter.decide(pathwise::Strategy::MaximumExpectedUtility);
        let (name, value) = first_max(&arbiter, |a| arbiter.expected_utility(a));
        prop_assert_eq!(decision.action, name);
        prop_assert_eq!(decision.value, value);
        prop_assert_eq!(decision.scores.len(), input.len());
    }

    #[test]
    fn minimax_picks_best_worst_case(input in actions_input()) {
        let arbiter = arbiter_from(&input);
        let decision = arbiter.decide(pathwise::Strategy::Minimax);
        let (name, value) = first_max(&arbiter, Action::worst_case);
        prop_assert_eq!(decision.action, name);
        prop_assert_eq!(decision.value, value);
    }

    #[test]
    fn risk_adjusted_never_exceeds_expectation(input in actions_input()) {
        let arbiter = arbiter_from(&input);
        for action in arbiter.actions() {
            prop_assert!(arbiter.risk_adjusted_utility(action) <= arbiter.expected_utility(action) + 1e-9);
        }
    }

    #[test]
    fn zero_variance_risk_adjusted_equals_expectation(utility in -100i16..100, splits in 1usize..8) {
        let p = 1.0 / splits as f64;
        let pairs: Vec<(f64, f64)> = (0..splits).map(|_| (p, f64::from(utility))).collect();
        let arbiter = UtilityArbiter::new(vec![Action::from_pairs("sure", &pairs)]).unwrap();
        let action = &arbiter.actions()[0];
        prop_assert_eq!(arbiter.risk_adjusted_utility(action), arbiter.expected_utility(action));

        let profile = &arbiter.analyze_risk()[0];
        prop_assert_eq!(profile.variance, 0.0);
        prop_assert_eq!(profile.risk_level, RiskLevel::RiskFree);
    }
}
