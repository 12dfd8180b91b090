use crate::error::{Result, SupplyChainError};
use crate::graph::{NodeId, SupplyChainGraph};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// One traversed edge of a [`PathResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathLeg {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Source to destination, both inclusive.
    pub nodes: Vec<String>,
    pub legs: Vec<PathLeg>,
    pub total_cost: f64,
}

impl PathResult {
    pub fn source(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }
}

/// Tentative route to `node`. Ordering is by cost, then by the node names along the route,
/// which makes the settled route the lexicographically smallest among the cheapest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Label<'g> {
    cost: OrderedFloat<f64>,
    route: Vec<&'g str>,
    node: NodeId,
}

/// Cheapest directed route from `source` to `destination` (Dijkstra).
///
/// Ties between equal-cost routes are broken by comparing node names hop by hop.
/// Costs are compared as exact `f64` sums: routes that tie only in decimal arithmetic
/// (0.1 + 0.2 against 0.3) are not treated as ties, and the numerically cheaper sum wins.
pub fn shortest_path(
    graph: &SupplyChainGraph,
    source: &str,
    destination: &str,
) -> Result<PathResult> {
    let start = graph
        .node_id(source)
        .ok_or_else(|| SupplyChainError::UnknownNode(source.to_string()))?;
    let goal = graph
        .node_id(destination)
        .ok_or_else(|| SupplyChainError::UnknownNode(destination.to_string()))?;

    let mut settled = vec![false; graph.node_count()];
    let mut best: Vec<Option<Label>> = vec![None; graph.node_count()];
    let mut heap = BinaryHeap::new();

    heap.push(Reverse(Label {
        cost: OrderedFloat(0.0),
        route: vec![graph.node_name(start)],
        node: start,
    }));

    while let Some(Reverse(label)) = heap.pop() {
        let node = label.node as usize;
        if settled[node] {
            continue;
        }
        settled[node] = true;

        if label.node == goal {
            tracing::debug!(source, destination, cost = label.cost.0, "shortest path settled");
            return Ok(into_result(graph, label));
        }

        for (next, edge_cost) in graph.outgoing(label.node) {
            if settled[next as usize] {
                continue;
            }
            let mut route = label.route.clone();
            route.push(graph.node_name(next));
            let candidate = Label {
                cost: OrderedFloat(label.cost.0 + edge_cost),
                route,
                node: next,
            };

            let improves = best[next as usize]
                .as_ref()
                .map_or(true, |current| candidate < *current);
            if improves {
                best[next as usize] = Some(candidate.clone());
                heap.push(Reverse(candidate));
            }
        }
    }

    Err(SupplyChainError::NoPath {
        from: source.to_string(),
        to: destination.to_string(),
    })
}

fn into_result(graph: &SupplyChainGraph, label: Label<'_>) -> PathResult {
    let legs = label
        .route
        .windows(2)
        .map(|pair| PathLeg {
            from: pair[0].to_string(),
            to: pair[1].to_string(),
            // Every consecutive pair of a settled route is an edge of the graph.
            cost: graph.cost(pair[0], pair[1]).unwrap_or_default(),
        })
        .collect();

    PathResult {
        nodes: label.route.iter().map(|name| name.to_string()).collect(),
        legs,
        total_cost: label.cost.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn graph(edges: &[(&str, &str, f64)]) -> SupplyChainGraph {
        let mut builder = GraphBuilder::new();
        for &(s, d, c) in edges {
            builder.add_edge(s, d, c);
        }
        builder.build()
    }

    #[test]
    fn test_prefers_cheaper_multi_hop_route() -> anyhow::Result<()> {
        let g = graph(&[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)]);
        let result = shortest_path(&g, "A", "C")?;
        assert_eq!(result.nodes, vec!["A", "B", "C"]);
        assert_eq!(result.total_cost, 3.0);
        assert_eq!(result.hop_count(), 2);
        assert_eq!(result.source(), Some("A"));
        assert_eq!(result.destination(), Some("C"));
        Ok(())
    }

    #[test]
    fn test_same_node_is_zero_cost() -> anyhow::Result<()> {
        let g = graph(&[("A", "B", 1.0), ("A", "A", 5.0)]);
        let result = shortest_path(&g, "A", "A")?;
        assert_eq!(result.nodes, vec!["A"]);
        assert!(result.legs.is_empty());
        assert_eq!(result.total_cost, 0.0);
        Ok(())
    }

    #[test]
    fn test_edges_are_directed() {
        let g = graph(&[("A", "B", 1.0)]);
        let err = shortest_path(&g, "B", "A").unwrap_err();
        assert!(matches!(err, SupplyChainError::NoPath { .. }));
        assert_eq!(err.to_string(), "no path exists from 'B' to 'A'");
    }

    #[test]
    fn test_unknown_endpoints_are_named() {
        let g = graph(&[("A", "B", 1.0)]);
        match shortest_path(&g, "X", "B") {
            Err(SupplyChainError::UnknownNode(name)) => assert_eq!(name, "X"),
            other => panic!("expected UnknownNode, got {:?}", other),
        }
        match shortest_path(&g, "A", "Y") {
            Err(SupplyChainError::UnknownNode(name)) => assert_eq!(name, "Y"),
            other => panic!("expected UnknownNode, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_cost_routes_pick_smallest_names() -> anyhow::Result<()> {
        // The 'C' branch is inserted first but 'B' sorts earlier.
        let g = graph(&[
            ("A", "C", 1.0),
            ("C", "D", 1.0),
            ("A", "B", 1.0),
            ("B", "D", 1.0),
        ]);
        let result = shortest_path(&g, "A", "D")?;
        assert_eq!(result.nodes, vec!["A", "B", "D"]);
        assert_eq!(result.total_cost, 2.0);
        Ok(())
    }

    #[test]
    fn test_tie_break_compares_whole_route() -> anyhow::Result<()> {
        // Routes A-B-Z-T and A-C-D-T cost the same; 'B' < 'C' decides at the second hop.
        let g = graph(&[
            ("A", "C", 1.0),
            ("C", "D", 1.0),
            ("D", "T", 1.0),
            ("A", "B", 2.0),
            ("B", "Z", 0.5),
            ("Z", "T", 0.5),
        ]);
        let result = shortest_path(&g, "A", "T")?;
        assert_eq!(result.nodes, vec!["A", "B", "Z", "T"]);
        Ok(())
    }

    #[test]
    fn test_decimal_ties_use_exact_float_sums() -> anyhow::Result<()> {
        // 0.1 + 0.2 rounds above 0.3, so the 'C' route is strictly cheaper.
        let g = graph(&[
            ("A", "B", 0.1),
            ("B", "D", 0.2),
            ("A", "C", 0.3),
            ("C", "D", 0.0),
        ]);
        let result = shortest_path(&g, "A", "D")?;
        assert_eq!(result.nodes, vec!["A", "C", "D"]);
        assert_eq!(result.total_cost, 0.3);
        Ok(())
    }

    #[test]
    fn test_zero_cost_edges() -> anyhow::Result<()> {
        let g = graph(&[("A", "B", 0.0), ("B", "A", 0.0), ("B", "C", 0.0)]);
        let result = shortest_path(&g, "A", "C")?;
        assert_eq!(result.nodes, vec!["A", "B", "C"]);
        assert_eq!(result.total_cost, 0.0);
        Ok(())
    }

    #[test]
    fn test_legs_sum_to_total() -> anyhow::Result<()> {
        let g = graph(&[
            ("Plant", "Hub", 3.25),
            ("Hub", "Port", 1.5),
            ("Port", "Store", 0.75),
            ("Plant", "Store", 9.0),
        ]);
        let result = shortest_path(&g, "Plant", "Store")?;
        let sum: f64 = result.legs.iter().map(|leg| leg.cost).sum();
        assert_eq!(sum, result.total_cost);
        assert_eq!(result.total_cost, 5.5);
        Ok(())
    }
}
