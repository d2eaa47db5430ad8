//! Types for extraction results

use logsift_domain::{ClusterId, ClusterSummary};
use serde::{Deserialize, Serialize};

/// One representative chunk, the first occurrence of its pattern class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedChunk {
    /// 0-indexed line number the chunk starts on
    pub line_number: usize,

    /// Chunk text (trimmed when configured)
    pub chunk: String,

    /// Length in characters of the untrimmed chunk
    pub chunk_length: usize,

    /// Pattern class this chunk represents
    pub cluster_id: ClusterId,
}

/// Result of an extraction operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Representative chunks in ascending line order
    pub chunks: Vec<ExtractedChunk>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Chunks produced by the chunker
    pub total_chunks: usize,

    /// Lines in the input, counting an unterminated final line
    pub total_lines: usize,

    /// Live pattern classes after training
    pub cluster_count: usize,

    /// Live classes ranked by size, largest first, ties by id.
    /// Informational only: it never filters or reorders `chunks`.
    pub clusters_by_size: Vec<ClusterSummary>,

    /// Wall-clock time spent in the extraction
    pub processing_time_ms: u64,
}
