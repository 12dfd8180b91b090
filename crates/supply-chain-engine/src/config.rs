use crate::graph::ConflictPolicy;
use std::env;
use std::path::PathBuf;

pub const DATA_ENV: &str = "SUPPLY_CHAIN_DATA";
pub const DELIMITER_ENV: &str = "SUPPLY_CHAIN_DELIMITER";
pub const CONFLICT_POLICY_ENV: &str = "SUPPLY_CHAIN_CONFLICT_POLICY";

/// Runtime settings, read from the environment with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Edge table loaded at startup, if any.
    pub data_path: Option<PathBuf>,
    pub delimiter: u8,
    pub conflict_policy: ConflictPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            delimiter: b',',
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(DELIMITER_ENV) {
            config.delimiter = parse_delimiter(&raw)?;
        }

        if let Some(raw) = lookup(CONFLICT_POLICY_ENV) {
            config.conflict_policy = raw.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }
}

fn parse_delimiter(raw: &str) -> anyhow::Result<u8> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match raw.as_bytes() {
            [byte] => Ok(*byte),
            _ => anyhow::bail!("{} must be a single byte, got '{}'", DELIMITER_ENV, raw),
        },
    }
}
