use crate::config::EngineConfig;
use crate::error::{Result, SupplyChainError};
use crate::graph::SupplyChainGraph;
use crate::ingest::{DataSource, Dataset, IngestionEngine};
use crate::path::{self, PathResult};
use crate::spanning::{self, SpanningForest};
use std::sync::Arc;

/// Query layer over the currently loaded dataset.
///
/// Each load rebuilds the graph from scratch and replaces the previous dataset only
/// when it succeeds. Queries never mutate the graph.
pub struct SupplyChainEngine {
    config: EngineConfig,
    ingestion: IngestionEngine,
    dataset: Option<Arc<Dataset>>,
}

impl SupplyChainEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ingestion: IngestionEngine::new(config.delimiter),
            config,
            dataset: None,
        }
    }

    pub fn load(&mut self, source: &DataSource) -> Result<Arc<Dataset>> {
        match self.ingestion.load(source) {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                self.dataset = Some(Arc::clone(&dataset));
                Ok(dataset)
            }
            Err(e) => {
                tracing::warn!(source = %source.describe(), error = %e, "load rejected");
                Err(e)
            }
        }
    }

    pub fn graph(&self) -> Result<&SupplyChainGraph> {
        self.dataset
            .as_deref()
            .map(|dataset| &dataset.graph)
            .ok_or(SupplyChainError::NoDataset)
    }

    pub fn list_sources(&self) -> Result<Vec<String>> {
        Ok(self.graph()?.list_sources().into_iter().map(String::from).collect())
    }

    pub fn list_destinations(&self) -> Result<Vec<String>> {
        Ok(self
            .graph()?
            .list_destinations()
            .into_iter()
            .map(String::from)
            .collect())
    }

    pub fn shortest_path(&self, source: &str, destination: &str) -> Result<PathResult> {
        let result = path::shortest_path(self.graph()?, source, destination);
        if let Err(e) = &result {
            tracing::info!(source, destination, error = %e, "shortest path query failed");
        }
        result
    }

    pub fn minimum_spanning_tree(&self) -> Result<SpanningForest> {
        Ok(spanning::minimum_spanning_tree_with_policy(
            self.graph()?,
            self.config.conflict_policy,
        ))
    }
}
