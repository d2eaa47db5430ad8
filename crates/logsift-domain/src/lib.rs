//! Logsift Domain Layer
//!
//! This crate contains the value types and capability traits shared by every
//! other logsift crate. It holds no algorithms: the chunking heuristic and the
//! two-pass extraction live in `logsift-extractor`, and concrete clustering
//! strategies live in `logsift-drain`.
//!
//! ## Key Concepts
//!
//! - **Chunk**: one logical, possibly multi-line, log entry with the line it starts on
//! - **Cluster**: a pattern class (template) that groups similar chunks
//! - **PatternOracle**: the pluggable incremental classifier that hands out clusters
//!
//! ## Architecture
//!
//! - Only `serde` as an external dependency, for output layers
//! - Trait definitions for the clustering boundary
//! - Implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod cluster;
pub mod traits;

// Re-exports for convenience
pub use chunk::Chunk;
pub use cluster::{ClusterChange, ClusterId, ClusterSummary, Observation};
pub use traits::{MatchMode, PatternOracle};
