use thiserror::Error;

/// Columns every edge table must carry, matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Source", "Destination", "Cost"];

/// Errors raised while loading an edge table or answering a query.
///
/// Load errors (`MissingColumns`, `MalformedEdge`, `InvalidCost`, `Csv`, `Io`)
/// abort the whole load. Query errors leave the loaded graph untouched.
#[derive(Debug, Error)]
pub enum SupplyChainError {
    #[error(
        "missing required column(s) {}: the input must have columns 'Source', 'Destination', 'Cost'",
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<String> },

    /// Row numbers are 1-based and count data rows only (the header is not a row).
    #[error("malformed edge at row {row}: {reason}")]
    MalformedEdge { row: usize, reason: String },

    #[error("invalid cost at row {row}: {cost} (costs must be finite and non-negative)")]
    InvalidCost { row: usize, cost: f64 },

    #[error("unknown node: '{0}'")]
    UnknownNode(String),

    // `source` is reserved by thiserror for the error cause.
    #[error("no path exists from '{from}' to '{to}'")]
    NoPath { from: String, to: String },

    #[error("graph is disconnected: spanning forest has {components} trees")]
    Disconnected { components: usize },

    #[error("no dataset loaded")]
    NoDataset,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SupplyChainError>;
