//! Configuration for the Drain oracle

use serde::{Deserialize, Serialize};

/// Capacity used when nothing else is configured
pub const DEFAULT_MAX_CLUSTERS: usize = 8;

/// Capacity of the exhaustive preset, for near-complete distinct-line listings
pub const EXHAUSTIVE_MAX_CLUSTERS: usize = 1000;

/// Configuration for the Drain oracle
///
/// # Examples
///
/// ```
/// use logsift_drain::DrainConfig;
///
/// let config = DrainConfig::default();
/// assert_eq!(config.max_clusters, 8);
///
/// let config = DrainConfig::exhaustive();
/// assert_eq!(config.max_clusters, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainConfig {
    /// Upper bound on live pattern classes
    pub max_clusters: usize,

    /// Depth of the prefix tree, counting the root and the token-count level.
    /// `depth - 2` leading tokens are used to route a chunk to its leaf.
    pub depth: usize,

    /// Minimum similarity for a chunk to join an existing class during training
    pub sim_threshold: f64,

    /// Maximum children per tree node before tokens route to the wildcard node
    pub max_children: usize,

    /// Characters treated as token separators in addition to whitespace
    pub extra_delimiters: Vec<String>,

    /// Route digit-bearing tokens to the wildcard node when building the tree
    pub mask_digits: bool,

    /// Collect per-operation timings
    pub profiling: bool,
}

impl DrainConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_clusters == 0 {
            return Err("max_clusters must be greater than 0".to_string());
        }
        if self.depth < 3 {
            return Err("depth must be at least 3".to_string());
        }
        if !(0.0..=1.0).contains(&self.sim_threshold) {
            return Err(format!(
                "sim_threshold {} out of range [0.0, 1.0]",
                self.sim_threshold
            ));
        }
        if self.max_children == 0 {
            return Err("max_children must be greater than 0".to_string());
        }
        if self.extra_delimiters.iter().any(|d| d.is_empty()) {
            return Err("extra_delimiters must not contain empty strings".to_string());
        }
        Ok(())
    }

    /// Set the class capacity
    pub fn with_max_clusters(mut self, max_clusters: usize) -> Self {
        self.max_clusters = max_clusters;
        self
    }

    /// Enable or disable profiling
    pub fn with_profiling(mut self, profiling: bool) -> Self {
        self.profiling = profiling;
        self
    }

    /// Number of leading tokens used to route a chunk through the tree
    pub(crate) fn prefix_levels(&self) -> usize {
        self.depth.saturating_sub(2)
    }
}

impl Default for DrainConfig {
    /// Compact summaries: a handful of classes
    fn default() -> Self {
        Self {
            max_clusters: DEFAULT_MAX_CLUSTERS,
            depth: 4,
            sim_threshold: 0.4,
            max_children: 100,
            extra_delimiters: Vec::new(),
            mask_digits: true,
            profiling: false,
        }
    }
}

impl DrainConfig {
    /// Compact preset, same as the default
    pub fn compact() -> Self {
        Self::default()
    }

    /// Exhaustive preset: enough classes to enumerate nearly every distinct line
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
