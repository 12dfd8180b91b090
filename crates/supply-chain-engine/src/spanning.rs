//! Minimum spanning forest over the undirected projection (Kruskal).

use crate::error::{Result, SupplyChainError};
use crate::graph::{ConflictPolicy, NodeId, SupplyChainGraph, UndirectedGraph};
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Disjoint sets with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u32>,
    num_components: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
            num_components: n,
        }
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }

    pub fn find(&mut self, x: NodeId) -> NodeId {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Merges the sets of `x` and `y`. Returns false if they were already joined.
    pub fn union(&mut self, x: NodeId, y: NodeId) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        let rx = self.rank[root_x as usize];
        let ry = self.rank[root_y as usize];
        if rx < ry {
            self.parent[root_x as usize] = root_y;
        } else if rx > ry {
            self.parent[root_y as usize] = root_x;
        } else {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += 1;
        }

        self.num_components -= 1;
        true
    }

    pub fn connected(&mut self, x: NodeId, y: NodeId) -> bool {
        self.find(x) == self.find(y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningEdge {
    pub a: String,
    pub b: String,
    pub weight: f64,
}

/// Spanning tree of one connected component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree {
    pub nodes: Vec<String>,
    pub edges: Vec<SpanningEdge>,
    pub total_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningForest {
    /// One tree per component, ordered by the first appearance of their nodes.
    pub trees: Vec<SpanningTree>,
    /// All selected edges, in the order Kruskal accepted them.
    pub edges: Vec<SpanningEdge>,
    pub total_weight: f64,
    pub node_count: usize,
}

impl SpanningForest {
    pub fn component_count(&self) -> usize {
        self.trees.len()
    }

    pub fn is_tree(&self) -> bool {
        self.trees.len() <= 1
    }

    /// The single spanning tree, or `Disconnected` when the projection has several components.
    pub fn into_tree(self) -> Result<SpanningTree> {
        if self.trees.len() > 1 {
            return Err(SupplyChainError::Disconnected {
                components: self.trees.len(),
            });
        }
        Ok(self.trees.into_iter().next().unwrap_or(SpanningTree {
            nodes: Vec::new(),
            edges: Vec::new(),
            total_weight: 0.0,
        }))
    }
}

/// Minimum spanning forest with the default [`ConflictPolicy`].
pub fn minimum_spanning_tree(graph: &SupplyChainGraph) -> SpanningForest {
    minimum_spanning_tree_with_policy(graph, ConflictPolicy::default())
}

pub fn minimum_spanning_tree_with_policy(
    graph: &SupplyChainGraph,
    policy: ConflictPolicy,
) -> SpanningForest {
    let view = graph.undirected_view(policy);
    let forest = kruskal(&view);
    tracing::debug!(
        %policy,
        edges = forest.edges.len(),
        components = forest.component_count(),
        total_weight = forest.total_weight,
        "spanning forest built"
    );
    forest
}

fn kruskal(view: &UndirectedGraph<'_>) -> SpanningForest {
    let candidates = view.edges();
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    // Stable: equal weights keep first-insertion order.
    order.sort_by_key(|&idx| OrderedFloat(candidates[idx].weight));

    let mut uf = UnionFind::new(view.node_count());
    let mut selected = Vec::new();
    for idx in order {
        let edge = candidates[idx];
        if uf.union(edge.a, edge.b) {
            selected.push(edge);
        }
    }

    // Group nodes by component root, components ordered by their smallest node id.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; view.node_count()];
    let mut trees: Vec<SpanningTree> = Vec::new();
    for node in 0..view.node_count() as NodeId {
        let root = uf.find(node) as usize;
        let slot = *slot_of_root[root].get_or_insert_with(|| {
            trees.push(SpanningTree {
                nodes: Vec::new(),
                edges: Vec::new(),
                total_weight: 0.0,
            });
            trees.len() - 1
        });
        trees[slot].nodes.push(view.node_name(node).to_string());
    }

    let mut edges = Vec::with_capacity(selected.len());
    let mut total_weight = 0.0;
    for edge in selected {
        let spanning = SpanningEdge {
            a: view.node_name(edge.a).to_string(),
            b: view.node_name(edge.b).to_string(),
            weight: edge.weight,
        };
        let root = uf.find(edge.a) as usize;
        if let Some(slot) = slot_of_root[root] {
            trees[slot].total_weight += edge.weight;
            trees[slot].edges.push(spanning.clone());
        }
        total_weight += edge.weight;
        edges.push(spanning);
    }

    SpanningForest {
        trees,
        edges,
        total_weight,
        node_count: view.node_count(),
    }
}
