use crate::error::Result;
use crate::graph::SupplyChainGraph;
use std::fs;
use std::path::PathBuf;

pub mod extractor;

use extractor::{CsvEdgeExtractor, EdgeRecord, Extractor};

/// Where an edge table comes from. The caller decides when to load it and how long to keep it.
#[derive(Debug, Clone)]
pub enum DataSource {
    File(PathBuf),
    Inline(String),
}

impl DataSource {
    fn read(&self) -> Result<String> {
        match self {
            DataSource::File(path) => Ok(fs::read_to_string(path)?),
            DataSource::Inline(content) => Ok(content.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Inline(content) => format!("<inline, {} bytes>", content.len()),
        }
    }
}

/// A fully validated edge table and the graph built from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<EdgeRecord>,
    pub graph: SupplyChainGraph,
}

impl Dataset {
    /// First `n` parsed rows.
    pub fn preview(&self, n: usize) -> &[EdgeRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

pub struct IngestionEngine {
    extractor: CsvEdgeExtractor,
}

impl Default for IngestionEngine {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl IngestionEngine {
    pub fn new(delimiter: u8) -> Self {
        Self {
            extractor: CsvEdgeExtractor::with_delimiter(delimiter),
        }
    }

    /// Parses every row before building; any row error aborts the load without a graph.
    pub fn load(&self, source: &DataSource) -> Result<Dataset> {
        let content = source.read()?;
        let records = self.extractor.extract(&content)?;
        let graph = SupplyChainGraph::from_records(&records);

        tracing::info!(
            source = %source.describe(),
            rows = records.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "edge table loaded"
        );

        Ok(Dataset { records, graph })
    }
}
