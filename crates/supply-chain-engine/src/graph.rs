//! Directed weighted supply chain graph and its undirected projection.
//!
//! Nodes are interned into dense `u32` ids in order of first appearance. Edges are
//! keyed by their ordered endpoint pair: re-adding a pair overwrites its cost but keeps
//! the position the pair first took in the edge table.

use crate::ingest::extractor::EdgeRecord;
use crate::topology::GraphTopology;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

pub type NodeId = u32;
pub type EdgeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub destination: NodeId,
    pub cost: f64,
}

/// How the undirected projection resolves `a -> b` and `b -> a` carrying different costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Keep the cheaper direction.
    #[default]
    Min,
    /// Keep the more expensive direction.
    Max,
}

impl ConflictPolicy {
    fn resolve(self, current: f64, incoming: f64) -> f64 {
        match self {
            ConflictPolicy::Min => current.min(incoming),
            ConflictPolicy::Max => current.max(incoming),
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" | "minimum" => Ok(ConflictPolicy::Min),
            "max" | "maximum" => Ok(ConflictPolicy::Max),
            other => Err(format!("unknown conflict policy: {}", other)),
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Min => write!(f, "min"),
            ConflictPolicy::Max => write!(f, "max"),
        }
    }
}

/// Accumulates edges; the only way to obtain a [`SupplyChainGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: SupplyChainGraph,
    seen_sources: HashSet<NodeId>,
    seen_destinations: HashSet<NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.graph.index.get(name) {
            return id;
        }
        let id = self.graph.topology.add_node();
        self.graph.names.push(name.to_string());
        self.graph.index.insert(name.to_string(), id);
        id
    }

    pub fn add_edge(&mut self, source: &str, destination: &str, cost: f64) -> &mut Self {
        let src = self.intern(source);
        let dst = self.intern(destination);

        if self.seen_sources.insert(src) {
            self.graph.sources.push(src);
        }
        if self.seen_destinations.insert(dst) {
            self.graph.destinations.push(dst);
        }

        match self.graph.edge_index.get(&(src, dst)) {
            Some(&edge_id) => {
                self.graph.edges[edge_id as usize].cost = cost;
            }
            None => {
                let edge_id = self.graph.edges.len() as EdgeId;
                self.graph.edges.push(Edge {
                    source: src,
                    destination: dst,
                    cost,
                });
                self.graph.edge_index.insert((src, dst), edge_id);
                self.graph.topology.add_edge(src, dst, edge_id);
            }
        }
        self
    }

    pub fn add_record(&mut self, record: &EdgeRecord) -> &mut Self {
        self.add_edge(&record.source, &record.destination, record.cost)
    }

    pub fn build(self) -> SupplyChainGraph {
        self.graph
    }
}

#[derive(Debug, Clone, Default)]
pub struct SupplyChainGraph {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    topology: GraphTopology,
    edges: Vec<Edge>,
    edge_index: HashMap<(NodeId, NodeId), EdgeId>,
    sources: Vec<NodeId>,
    destinations: Vec<NodeId>,
}

impl SupplyChainGraph {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EdgeRecord>) -> Self {
        let mut builder = GraphBuilder::new();
        for record in records {
            builder.add_record(record);
        }
        builder.build()
    }

    pub fn node_count(&self) -> usize {
        self.topology.num_nodes()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Panics if `id` did not come from this graph.
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.names[id as usize]
    }

    /// Node names in order of first appearance.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn cost(&self, source: &str, destination: &str) -> Option<f64> {
        let key = (self.node_id(source)?, self.node_id(destination)?);
        self.edge_index
            .get(&key)
            .map(|&edge_id| self.edges[edge_id as usize].cost)
    }

    /// Outgoing `(neighbor, cost)` pairs of `node`.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.topology
            .neighbors(node)
            .map(move |(dst, edge_id)| (dst, self.edges[edge_id as usize].cost))
    }

    /// Distinct `Source` values in order of first appearance.
    pub fn list_sources(&self) -> Vec<&str> {
        self.sources.iter().map(|&id| self.node_name(id)).collect()
    }

    /// Distinct `Destination` values in order of first appearance.
    pub fn list_destinations(&self) -> Vec<&str> {
        self.destinations.iter().map(|&id| self.node_name(id)).collect()
    }

    pub fn undirected_view(&self, policy: ConflictPolicy) -> UndirectedGraph<'_> {
        let mut edges: Vec<UndirectedEdge> = Vec::new();
        let mut slots: HashMap<(NodeId, NodeId), usize> = HashMap::new();

        for edge in &self.edges {
            let key = if edge.source <= edge.destination {
                (edge.source, edge.destination)
            } else {
                (edge.destination, edge.source)
            };
            match slots.get(&key) {
                Some(&slot) => {
                    let existing = &mut edges[slot];
                    existing.weight = policy.resolve(existing.weight, edge.cost);
                }
                None => {
                    slots.insert(key, edges.len());
                    edges.push(UndirectedEdge {
                        a: edge.source,
                        b: edge.destination,
                        weight: edge.cost,
                    });
                }
            }
        }

        UndirectedGraph { graph: self, edges }
    }
}

/// An undirected edge. `a` and `b` keep the orientation of the first directed edge
/// seen for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UndirectedEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub weight: f64,
}

/// Undirected projection borrowing node names from its directed graph.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<'g> {
    graph: &'g SupplyChainGraph,
    edges: Vec<UndirectedEdge>,
}

impl<'g> UndirectedGraph<'g> {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node_name(&self, id: NodeId) -> &'g str {
        self.graph.node_name(id)
    }

    /// Edges in order of first insertion of their endpoint pair.
    pub fn edges(&self) -> &[UndirectedEdge] {
        &self.edges
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (self.graph.node_id(a)?, self.graph.node_id(b)?);
        self.edges
            .iter()
            .find(|e| (e.a == a && e.b == b) || (e.a == b && e.b == a))
            .map(|e| e.weight)
    }
}
