//! Logsift Extractor
//!
//! Reduces a large, repetitive build log to one representative entry per
//! pattern class, in document order, with exact line numbers.
//!
//! # Overview
//!
//! CI logs repeat the same handful of line shapes thousands of times. The
//! Extractor splits the log into logical entries (soft-wrapped continuation
//! lines are merged into the entry they continue), trains a pattern oracle on
//! every entry, and then walks the log a second time keeping the first entry
//! that resolves to each class.
//!
//! # Architecture
//!
//! ```text
//! Text → Chunker → Oracle.observe (training)
//!      → Chunker → Oracle.match (selection) → first chunk per class → Result
//! ```
//!
//! # Key Features
//!
//! - **Lossless Chunking**: chunks concatenate back to the original text
//! - **Pluggable Clustering**: any `PatternOracle` implementation can be used
//! - **Explicit Oracle Scope**: fresh vocabulary per call or shared across calls
//! - **Bounded Output**: never more entries than the oracle's class capacity
//!
//! # Example Usage
//!
//! ```
//! use logsift_extractor::{Extractor, ExtractorConfig};
//!
//! let log = "INFO starting\nINFO starting\nERROR failed: true\n";
//! let mut extractor = Extractor::with_drain(ExtractorConfig::default()).unwrap();
//!
//! let result = extractor.extract(log).unwrap();
//! let lines: Vec<usize> = result.chunks.iter().map(|c| c.line_number).collect();
//! assert_eq!(lines, vec![0, 2]);
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::{chunk_log, continues_past, Chunks};
pub use config::{ExtractorConfig, OracleScope};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use types::{ExtractedChunk, ExtractionMetadata, ExtractionResult};
