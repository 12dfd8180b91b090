//! Text summaries and Graphviz DOT output for query results.
//!
//! Layout is left to the DOT consumer; only highlighting and weight labels are emitted.

use crate::graph::SupplyChainGraph;
use crate::path::PathResult;
use crate::spanning::SpanningForest;
use std::collections::HashSet;

/// Integral costs print without a fractional part.
pub fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 && cost.abs() < 1e15 {
        format!("{}", cost as i64)
    } else {
        format!("{}", cost)
    }
}

pub fn path_summary(result: &PathResult) -> String {
    format!(
        "Shortest Path from {} to {}: {}\nTotal Distance: {}",
        result.source().unwrap_or_default(),
        result.destination().unwrap_or_default(),
        result.nodes.join(" -> "),
        format_cost(result.total_cost)
    )
}

pub fn spanning_summary(forest: &SpanningForest) -> String {
    let mut output = String::from("Minimum Spanning Tree generated successfully!\n");
    if forest.component_count() > 1 {
        output.push_str(&format!(
            "Graph is disconnected: spanning forest of {} trees\n",
            forest.component_count()
        ));
    }
    for (i, tree) in forest.trees.iter().enumerate() {
        if forest.component_count() > 1 {
            output.push_str(&format!(
                "Tree {} ({} nodes, weight {}):\n",
                i + 1,
                tree.nodes.len(),
                format_cost(tree.total_weight)
            ));
        }
        for edge in &tree.edges {
            output.push_str(&format!(
                "  {} - {} ({})\n",
                edge.a,
                edge.b,
                format_cost(edge.weight)
            ));
        }
    }
    output.push_str(&format!("Total Weight: {}", format_cost(forest.total_weight)));
    output
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Whole directed graph with the nodes and edges of `result` drawn in red.
pub fn path_dot(graph: &SupplyChainGraph, result: &PathResult) -> String {
    let on_path: HashSet<&str> = result.nodes.iter().map(String::as_str).collect();
    let path_edges: HashSet<(&str, &str)> = result
        .legs
        .iter()
        .map(|leg| (leg.from.as_str(), leg.to.as_str()))
        .collect();

    let mut output = String::from("digraph shortest_path {\n");
    for name in graph.nodes() {
        if on_path.contains(name) {
            output.push_str(&format!("  {} [color=red, style=filled, fillcolor=red];\n", quote(name)));
        } else {
            output.push_str(&format!("  {};\n", quote(name)));
        }
    }
    for edge in graph.edges() {
        let from = graph.node_name(edge.source);
        let to = graph.node_name(edge.destination);
        let mut attrs = format!("label={}", quote(&format_cost(edge.cost)));
        if path_edges.contains(&(from, to)) {
            attrs.push_str(", color=red, penwidth=2");
        }
        output.push_str(&format!("  {} -> {} [{}];\n", quote(from), quote(to), attrs));
    }
    output.push_str("}\n");
    output
}

/// Undirected forest with each edge labelled by its weight.
pub fn spanning_dot(forest: &SpanningForest) -> String {
    let mut output = String::from("graph minimum_spanning_tree {\n");
    for tree in &forest.trees {
        for name in &tree.nodes {
            output.push_str(&format!("  {};\n", quote(name)));
        }
    }
    for edge in &forest.edges {
        output.push_str(&format!(
            "  {} -- {} [label={}];\n",
            quote(&edge.a),
            quote(&edge.b),
            quote(&format_cost(edge.weight))
        ));
    }
    output.push_str("}\n");
    output
}
