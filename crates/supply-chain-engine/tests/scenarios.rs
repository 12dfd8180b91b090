use std::collections::HashSet;
use supply_chain_core::graph::GraphBuilder;
use supply_chain_core::ingest::{DataSource, IngestionEngine};
use supply_chain_core::spanning::UnionFind;
use supply_chain_core::{minimum_spanning_tree, shortest_path, SupplyChainError, SupplyChainGraph};

fn load(csv: &str) -> SupplyChainGraph {
    IngestionEngine::default()
        .load(&DataSource::Inline(csv.to_string()))
        .expect("fixture loads")
        .graph
}

const TRIANGLE: &str = "Source,Destination,Cost\nA,B,1\nB,C,2\nA,C,4\n";

#[test]
fn cheaper_two_hop_route_beats_direct_edge() {
    let result = shortest_path(&load(TRIANGLE), "A", "C").unwrap();
    assert_eq!(result.nodes, vec!["A", "B", "C"]);
    assert_eq!(result.total_cost, 3.0);
}

#[test]
fn spanning_tree_drops_heaviest_triangle_edge() {
    let forest = minimum_spanning_tree(&load(TRIANGLE));
    assert_eq!(forest.total_weight, 3.0);
    let pairs: Vec<(&str, &str)> = forest
        .edges
        .iter()
        .map(|e| (e.a.as_str(), e.b.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
}

#[test]
fn disconnected_graph_yields_one_tree_per_component() {
    let forest = minimum_spanning_tree(&load("Source,Destination,Cost\nA,B,1\nC,D,1\n"));
    assert_eq!(forest.trees.len(), 2);
    assert_eq!(forest.total_weight, 2.0);
    assert_eq!(forest.edges.len(), forest.node_count - forest.trees.len());
}

#[test]
fn unknown_source_is_reported_by_name() {
    match shortest_path(&load(TRIANGLE), "X", "B") {
        Err(SupplyChainError::UnknownNode(name)) => assert_eq!(name, "X"),
        other => panic!("expected UnknownNode, got {:?}", other),
    }
}

#[test]
fn unreachable_destination_is_no_path() {
    let graph = load("Source,Destination,Cost\nA,B,1\nZ,B,1\n");
    assert!(matches!(
        shortest_path(&graph, "A", "Z"),
        Err(SupplyChainError::NoPath { .. })
    ));
}

#[test]
fn missing_cost_column_fails_before_building() {
    let err = IngestionEngine::default()
        .load(&DataSource::Inline("Source,Destination\nA,B\n".into()))
        .unwrap_err();
    match err {
        SupplyChainError::MissingColumns { missing } => assert_eq!(missing, vec!["Cost"]),
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

/// Small deterministic pseudo-random graphs (linear congruential generator).
fn random_graphs(count: usize) -> Vec<(usize, Vec<(usize, usize, u32)>)> {
    let mut state: u64 = 0x5eed;
    let mut next = |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    (0..count)
        .map(|_| {
            let nodes = 2 + next(5) as usize;
            let edge_count = 1 + next(8) as usize;
            let edges = (0..edge_count)
                .map(|_| {
                    (
                        next(nodes as u64) as usize,
                        next(nodes as u64) as usize,
                        next(6) as u32,
                    )
                })
                .collect();
            (nodes, edges)
        })
        .collect()
}

fn build(edges: &[(usize, usize, u32)]) -> SupplyChainGraph {
    let mut builder = GraphBuilder::new();
    for &(s, d, c) in edges {
        builder.add_edge(&format!("N{}", s), &format!("N{}", d), c as f64);
    }
    builder.build()
}

#[test]
fn every_node_is_listed_as_source_or_destination() {
    for (_, edges) in random_graphs(40) {
        let graph = build(&edges);
        let listed: HashSet<&str> = graph
            .list_sources()
            .into_iter()
            .chain(graph.list_destinations())
            .collect();
        for node in graph.nodes() {
            assert!(listed.contains(node), "{} not listed", node);
        }
    }
}

#[test]
fn self_paths_are_single_node_and_free() {
    for (_, edges) in random_graphs(20) {
        let graph = build(&edges);
        for node in graph.nodes() {
            let result = shortest_path(&graph, node, node).unwrap();
            assert_eq!(result.nodes, vec![node.to_string()]);
            assert_eq!(result.total_cost, 0.0);
        }
    }
}

#[test]
fn path_costs_match_legs_and_relaxation() {
    for (_, edges) in random_graphs(40) {
        let graph = build(&edges);
        let names: Vec<&str> = graph.nodes().collect();
        let n = names.len();

        // Bellman-Ford style all-pairs reference.
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for i in 0..n {
            dist[i][i] = 0.0;
        }
        for _ in 0..n {
            for edge in graph.edges() {
                let (s, d) = (edge.source as usize, edge.destination as usize);
                for row in dist.iter_mut() {
                    if row[s] + edge.cost < row[d] {
                        row[d] = row[s] + edge.cost;
                    }
                }
            }
        }

        for (i, from) in names.iter().enumerate() {
            for (j, to) in names.iter().enumerate() {
                match shortest_path(&graph, from, to) {
                    Ok(result) => {
                        assert_eq!(result.total_cost, dist[i][j], "{} -> {}", from, to);
                        let legs: f64 = result.legs.iter().map(|leg| leg.cost).sum();
                        assert_eq!(legs, result.total_cost);
                        for leg in &result.legs {
                            assert_eq!(graph.cost(&leg.from, &leg.to), Some(leg.cost));
                        }
                    }
                    Err(SupplyChainError::NoPath { .. }) => assert!(dist[i][j].is_infinite()),
                    Err(e) => panic!("unexpected error {}", e),
                }
            }
        }
    }
}

#[test]
fn spanning_forest_is_minimal_against_brute_force() {
    for (_, edges) in random_graphs(40) {
        let graph = build(&edges);
        let view = graph.undirected_view(Default::default());
        let candidates = view.edges();
        let n = view.node_count();

        let mut components = UnionFind::new(n);
        for e in candidates {
            components.union(e.a, e.b);
        }
        let expected_edges = n - components.num_components();

        let mut best = f64::INFINITY;
        for mask in 0u32..(1 << candidates.len()) {
            let mut uf = UnionFind::new(n);
            let mut weight = 0.0;
            let mut acyclic = true;
            let mut picked = 0;
            for (k, e) in candidates.iter().enumerate() {
                if mask & (1 << k) != 0 {
                    if !uf.union(e.a, e.b) {
                        acyclic = false;
                        break;
                    }
                    weight += e.weight;
                    picked += 1;
                }
            }
            if acyclic && picked == expected_edges && weight < best {
                best = weight;
            }
        }

        let forest = minimum_spanning_tree(&graph);
        assert_eq!(forest.edges.len(), expected_edges);
        assert_eq!(forest.trees.len(), components.num_components());
        assert_eq!(forest.total_weight, best);
    }
}
