//! The encoding must agree with direct search over all vertex orders

use hamiltonian_sat::config::SolverBackend;
use hamiltonian_sat::graph::Graph;
use hamiltonian_sat::path::PathValidator;
use hamiltonian_sat::sat::{SatEncoder, UnifiedSatSolver};
use hamiltonian_sat::find_hamiltonian_path;
use itertools::Itertools;

fn has_path_by_search(graph: &Graph) -> bool {
    let n = graph.vertex_count();
    (1..=n)
        .permutations(n)
        .any(|order| order.windows(2).all(|w| graph.has_edge(w[0], w[1])))
}

/// Every graph on `n` vertices over the given candidate edges
fn all_graphs(n: usize, directed: bool) -> Vec<Graph> {
    let candidates: Vec<(usize, usize)> = if directed {
        (1..=n)
            .cartesian_product(1..=n)
            .filter(|(u, v)| u != v)
            .collect()
    } else {
        (1..=n).tuple_combinations().collect()
    };

    (0u32..1 << candidates.len())
        .map(|mask| {
            let edges = candidates
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &edge)| edge)
                .collect();
            Graph::new(n, edges, directed).unwrap()
        })
        .collect()
}

fn check_agreement(graphs: &[Graph]) {
    let solver = UnifiedSatSolver::new(SolverBackend::Cadical);
    for graph in graphs {
        let expected = has_path_by_search(graph);
        let found = find_hamiltonian_path(graph, &solver).unwrap();

        assert_eq!(found.is_some(), expected, "disagreement on {}", graph);
        if let Some(path) = found {
            assert!(PathValidator::new(graph).validate(&path.vertices).is_valid);
        }
    }
}

#[test]
fn test_all_undirected_graphs_up_to_four_vertices() {
    for n in 1..=4 {
        check_agreement(&all_graphs(n, false));
    }
}

#[test]
fn test_all_directed_graphs_on_three_vertices() {
    check_agreement(&all_graphs(2, true));
    check_agreement(&all_graphs(3, true));
}

#[test]
fn test_selected_five_vertex_graphs() {
    let graphs = vec![
        // path with a pendant vertex: three leaves
        Graph::new(5, vec![(1, 2), (2, 3), (3, 4), (2, 5)], false).unwrap(),
        // 5-cycle
        Graph::new(5, vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)], false).unwrap(),
        // K_{2,3}
        Graph::new(5, vec![(1, 3), (1, 4), (1, 5), (2, 3), (2, 4), (2, 5)], false).unwrap(),
        // directed 5-cycle with one arc reversed
        Graph::new(5, vec![(1, 2), (2, 3), (4, 3), (4, 5), (5, 1)], true).unwrap(),
    ];
    check_agreement(&graphs);
}

#[test]
fn test_clause_count_matches_closed_form() {
    for graph in all_graphs(4, false).iter().step_by(7) {
        let encoder = SatEncoder::new(graph);
        let formula = encoder.encode();
        let n = graph.vertex_count();
        let forbidden = n * (n - 1) - graph.allowed_transition_count();

        let expected = 2 * n + 2 * n * (n * (n - 1) / 2) + (n - 1) * forbidden;
        assert_eq!(formula.clause_count(), expected);
        assert_eq!(encoder.statistics().total_clauses(), expected);
    }
}
