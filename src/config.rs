use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Thresholds used by the cleaning stage and the analyses.
///
/// Stored as a plain JSON object on disk; every key is optional:
/// ```json
/// {
///   "min_votes": 100,
///   "recent_since_year": 2000,
///   "recent_min_votes": 10000,
///   "recent_limit": 10,
///   "sample_rows": 5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Working-set rows need strictly more votes than this.
    pub min_votes: u64,
    pub recent_since_year: i32,
    /// Top-rated rows need strictly more votes than this.
    pub recent_min_votes: u64,
    pub recent_limit: usize,
    /// Rows echoed to the console after cleaning.
    pub sample_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            min_votes: 100,
            recent_since_year: 2000,
            recent_min_votes: 10_000,
            recent_limit: 10,
            sample_rows: 5,
        }
    }
}

impl AnalysisConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
