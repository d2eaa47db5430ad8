//! Configuration for the Extractor

use logsift_drain::config::{DEFAULT_MAX_CLUSTERS, EXHAUSTIVE_MAX_CLUSTERS};
use logsift_drain::DrainConfig;
use serde::{Deserialize, Serialize};

/// Lifetime of the oracle's learned vocabulary relative to `extract` calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleScope {
    /// Reset the oracle before every extraction; documents are independent
    #[default]
    PerCall,
    /// Keep classes across extractions; earlier documents bias later ones and
    /// share the class capacity
    Shared,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Upper bound on distinct pattern classes, forwarded to the oracle
    pub max_clusters: usize,

    /// Enable oracle profiling and extra diagnostics; never changes output
    pub verbose: bool,

    /// Reserved; carried through configuration but unused by extraction
    pub context: bool,

    /// Oracle lifetime across calls
    pub scope: OracleScope,

    /// Trim surrounding whitespace from emitted chunk text
    pub trim_chunks: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_clusters == 0 {
            return Err("max_clusters must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Overlay the extractor's settings on a Drain configuration
    pub fn drain_config(&self, base: DrainConfig) -> DrainConfig {
        base.with_max_clusters(self.max_clusters)
            .with_profiling(self.verbose)
    }
}

impl Default for ExtractorConfig {
    /// Compact summaries, independent extractions
    fn default() -> Self {
        Self {
            max_clusters: DEFAULT_MAX_CLUSTERS,
            verbose: false,
            context: false,
            scope: OracleScope::PerCall,
            trim_chunks: true,
        }
    }
}

impl ExtractorConfig {
    /// Compact preset: a handful of representative chunks
    pub fn compact() -> Self {
        Self::default()
    }

    /// Exhaustive preset: near-complete enumeration of distinct lines
    pub fn exhaustive() -> Self {
        Self {
            max_clusters: EXHAUSTIVE_MAX_CLUSTERS,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
