//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction logic and the
//! clustering strategy. Strategy implementations live in other crates.

use crate::{ClusterId, ClusterSummary, Observation};
use serde::{Deserialize, Serialize};

/// How hard `match_chunk` tries to resolve a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Only resolve when a template matches every token of the chunk
    Strict,
    /// Always resolve to the best available class, even for imperfect matches.
    /// Reports no match only when the oracle holds no class at all.
    #[default]
    Always,
}

/// Incremental, bounded-cardinality pattern classifier
///
/// Implemented by the infrastructure layer (logsift-drain)
///
/// An oracle carries mutable learned state. Whether one instance is reused
/// across unrelated documents is the caller's decision; `reset` is provided so
/// that a long-lived owner can still run independent extractions.
pub trait PatternOracle {
    /// Error type for oracle operations
    type Error;

    /// Incorporate a chunk into the model
    ///
    /// May create a class or strengthen an existing one. The number of live
    /// classes never exceeds `max_clusters`; once capacity is reached the chunk
    /// is folded into the closest existing class.
    fn observe(&mut self, text: &str) -> Result<Observation, Self::Error>;

    /// Resolve the class a chunk belongs to without creating one
    fn match_chunk(&self, text: &str, mode: MatchMode) -> Result<Option<ClusterId>, Self::Error>;

    /// Snapshot of every live class
    fn clusters(&self) -> Vec<ClusterSummary>;

    /// Upper bound on live classes
    fn max_clusters(&self) -> usize;

    /// Forget every learned class, keeping the configuration
    fn reset(&mut self);
}
