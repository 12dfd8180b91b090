pub mod topology {
    /// Adjacency list over dense node ids.
    /// Each entry is `(neighbor, edge_id)`; the edge id indexes the owning graph's edge table.
    #[derive(Debug, Clone, Default)]
    pub struct GraphTopology {
        pub adj: Vec<Vec<(u32, u32)>>,
    }

    impl GraphTopology {
        pub fn num_nodes(&self) -> usize {
            self.adj.len()
        }

        pub fn neighbors(&self, node_id: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
            self.adj
                .get(node_id as usize)
                .into_iter()
                .flatten()
                .copied()
        }

        pub fn add_node(&mut self) -> u32 {
            let id = self.adj.len() as u32;
            self.adj.push(Vec::new());
            id
        }

        pub fn add_edge(&mut self, src: u32, dst: u32, edge_id: u32) {
            if src as usize >= self.adj.len() || dst as usize >= self.adj.len() {
                return;
            }
            self.adj[src as usize].push((dst, edge_id));
        }
    }
}

pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod mcp;
pub mod mcp_stdio;
pub mod mcp_types;
pub mod path;
pub mod render;
pub mod server;
pub mod spanning;

pub use error::{Result, SupplyChainError};
pub use graph::{ConflictPolicy, SupplyChainGraph};
pub use path::{shortest_path, PathResult};
pub use spanning::{minimum_spanning_tree, SpanningForest, SpanningTree};
