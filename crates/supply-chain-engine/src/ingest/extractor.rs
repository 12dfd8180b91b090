use crate::error::{Result, SupplyChainError, REQUIRED_COLUMNS};
use serde::Serialize;

/// One validated row of an edge table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub source: String,
    pub destination: String,
    pub cost: f64,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, cost: f64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            cost,
        }
    }
}

pub trait Extractor {
    fn extract(&self, content: &str) -> Result<Vec<EdgeRecord>>;
}

pub struct CsvEdgeExtractor {
    pub delimiter: u8,
}

impl Default for CsvEdgeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvEdgeExtractor {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

/// Positions of the required columns inside a header row.
struct ColumnLayout {
    source: usize,
    destination: usize,
    cost: usize,
}

impl ColumnLayout {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let positions: Vec<Option<usize>> = REQUIRED_COLUMNS
            .iter()
            .map(|name| headers.iter().position(|h| h == *name))
            .collect();

        match positions[..] {
            [Some(source), Some(destination), Some(cost)] => Ok(Self {
                source,
                destination,
                cost,
            }),
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip(&positions)
                    .filter(|(_, pos)| pos.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();
                Err(SupplyChainError::MissingColumns { missing })
            }
        }
    }
}

impl Extractor for CsvEdgeExtractor {
    fn extract(&self, content: &str) -> Result<Vec<EdgeRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(content.as_bytes());

        let layout = ColumnLayout::resolve(rdr.headers()?)?;
        let mut edges = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            let row = index + 1;
            let record = result?;
            edges.push(parse_row(&record, &layout, row)?);
        }

        Ok(edges)
    }
}

fn required_field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<&'r str> {
    match record.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SupplyChainError::MalformedEdge {
            row,
            reason: format!("empty '{}' field", name),
        }),
    }
}

fn parse_row(record: &csv::StringRecord, layout: &ColumnLayout, row: usize) -> Result<EdgeRecord> {
    let source = required_field(record, layout.source, "Source", row)?;
    let destination = required_field(record, layout.destination, "Destination", row)?;
    let raw_cost = required_field(record, layout.cost, "Cost", row)?;

    let cost: f64 = raw_cost.parse().map_err(|_| SupplyChainError::MalformedEdge {
        row,
        reason: format!("cost '{}' is not a number", raw_cost),
    })?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(SupplyChainError::InvalidCost { row, cost });
    }

    Ok(EdgeRecord::new(source, destination, cost))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_rows_in_order() -> anyhow::Result<()> {
        let csv = "Source,Destination,Cost\nA,B,1\nB,C,2.5\n";
        let edges = CsvEdgeExtractor::new().extract(csv)?;
        assert_eq!(
            edges,
            vec![EdgeRecord::new("A", "B", 1.0), EdgeRecord::new("B", "C", 2.5)]
        );
        Ok(())
    }

    #[test]
    fn test_extra_columns_and_reordering_are_accepted() -> anyhow::Result<()> {
        let csv = "Cost,Mode,Destination,Source\n4,truck,C,A\n";
        let edges = CsvEdgeExtractor::new().extract(csv)?;
        assert_eq!(edges, vec![EdgeRecord::new("A", "C", 4.0)]);
        Ok(())
    }

    #[test]
    fn test_missing_cost_column_is_fatal() {
        let csv = "Source,Destination\nA,B\n";
        match CsvEdgeExtractor::new().extract(csv) {
            Err(SupplyChainError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["Cost".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let csv = "source,destination,cost\nA,B,1\n";
        let err = CsvEdgeExtractor::new().extract(csv).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Source, Destination, Cost"), "{}", message);
    }

    #[test]
    fn test_non_numeric_cost_names_the_row() {
        let csv = "Source,Destination,Cost\nA,B,1\nB,C,cheap\n";
        match CsvEdgeExtractor::new().extract(csv) {
            Err(SupplyChainError::MalformedEdge { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("cheap"));
            }
            other => panic!("expected MalformedEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_and_non_finite_costs_are_rejected() {
        for bad in ["-1", "NaN", "inf"] {
            let csv = format!("Source,Destination,Cost\nA,B,{}\n", bad);
            let err = CsvEdgeExtractor::new().extract(&csv).unwrap_err();
            assert!(
                matches!(err, SupplyChainError::InvalidCost { row: 1, .. }),
                "{} -> {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = "Source,Destination,Cost\nA,B\n";
        let err = CsvEdgeExtractor::new().extract(csv).unwrap_err();
        assert!(matches!(err, SupplyChainError::MalformedEdge { row: 1, .. }));
    }

    #[test]
    fn test_empty_source_is_malformed() {
        let csv = "Source,Destination,Cost\n,B,1\n";
        match CsvEdgeExtractor::new().extract(csv) {
            Err(SupplyChainError::MalformedEdge { row: 1, reason }) => {
                assert!(reason.contains("'Source'"), "{}", reason);
            }
            other => panic!("expected MalformedEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_destination_is_malformed() {
        let csv = "Source,Destination,Cost\nA,   ,1\n";
        match CsvEdgeExtractor::new().extract(csv) {
            Err(SupplyChainError::MalformedEdge { row: 1, reason }) => {
                assert!(reason.contains("'Destination'"), "{}", reason);
            }
            other => panic!("expected MalformedEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_delimiter() -> anyhow::Result<()> {
        let csv = "Source;Destination;Cost\nPlant;Depot;7\n";
        let edges = CsvEdgeExtractor::with_delimiter(b';').extract(csv)?;
        assert_eq!(edges, vec![EdgeRecord::new("Plant", "Depot", 7.0)]);
        Ok(())
    }
}
