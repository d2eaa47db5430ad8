//! Core Extractor implementation

use crate::chunking::chunk_log;
use crate::config::{ExtractorConfig, OracleScope};
use crate::error::ExtractorError;
use crate::types::{ExtractedChunk, ExtractionMetadata, ExtractionResult};
use logsift_domain::{ClusterId, MatchMode, PatternOracle};
use logsift_drain::{DrainConfig, DrainOracle};
use std::collections::HashSet;
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// The Extractor reduces a log to the first chunk of every pattern class
///
/// It owns its oracle. Whether learned classes survive between calls is
/// decided by [`OracleScope`].
#[derive(Debug)]
pub struct Extractor<O>
where
    O: PatternOracle,
{
    oracle: O,
    config: ExtractorConfig,
}

impl<O> Extractor<O>
where
    O: PatternOracle,
    O::Error: Display,
{
    /// Create a new Extractor around an already configured oracle
    pub fn new(oracle: O, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        if oracle.max_clusters() != config.max_clusters {
            warn!(
                "Oracle capacity {} differs from configured max_clusters {}; the oracle's bound applies",
                oracle.max_clusters(),
                config.max_clusters
            );
        }

        Ok(Self { oracle, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Borrow the oracle, e.g. to inspect its classes after an extraction
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Consume the Extractor and hand back its oracle
    pub fn into_oracle(self) -> O {
        self.oracle
    }

    /// Extract one representative chunk per pattern class from `text`
    ///
    /// Two passes run over the input. The training pass observes every chunk;
    /// the selection pass re-chunks the text and keeps the first chunk that
    /// resolves to each class still pending. Any oracle failure aborts the
    /// call without a partial result.
    pub fn extract(&mut self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        let started = Instant::now();

        if self.config.scope == OracleScope::PerCall {
            self.oracle.reset();
        }

        debug!("Training pass over {} bytes", text.len());
        let mut chunks = chunk_log(text);
        let mut total_chunks = 0;
        for chunk in chunks.by_ref() {
            let observation = self.oracle.observe(chunk.text).map_err(oracle_error)?;
            trace!(
                line = chunk.start_line,
                cluster = %observation.cluster_id,
                change = ?observation.change,
                "Observed chunk"
            );
            total_chunks += 1;
        }
        let total_lines = chunks.lines_seen();

        let mut clusters_by_size = self.oracle.clusters();
        clusters_by_size.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
        let mut pending: HashSet<ClusterId> = clusters_by_size.iter().map(|c| c.id).collect();
        let cluster_count = pending.len();
        debug!("Training produced {} pattern classes", cluster_count);

        debug!("Selection pass");
        let mut selected = Vec::with_capacity(cluster_count);
        for chunk in chunk_log(text) {
            let cluster_id = self
                .oracle
                .match_chunk(chunk.text, MatchMode::Always)
                .map_err(oracle_error)?
                .ok_or(ExtractorError::Unmatched {
                    line: chunk.start_line,
                })?;

            if !pending.remove(&cluster_id) {
                continue;
            }

            let body = if self.config.trim_chunks {
                chunk.text.trim()
            } else {
                chunk.text
            };
            selected.push(ExtractedChunk {
                line_number: chunk.start_line,
                chunk: body.to_string(),
                chunk_length: chunk.char_len(),
                cluster_id,
            });
        }

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            "Extraction complete: {} of {} chunks kept across {} lines in {}ms",
            selected.len(),
            total_chunks,
            total_lines,
            processing_time_ms
        );

        Ok(ExtractionResult {
            chunks: selected,
            metadata: ExtractionMetadata {
                total_chunks,
                total_lines,
                cluster_count,
                clusters_by_size,
                processing_time_ms,
            },
        })
    }
}

impl Extractor<DrainOracle> {
    /// Create an Extractor backed by a default-tuned Drain oracle
    pub fn with_drain(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::with_drain_tuning(config, DrainConfig::default())
    }

    /// Create an Extractor backed by a Drain oracle with custom tuning;
    /// `max_clusters` and profiling still come from `config`
    pub fn with_drain_tuning(
        config: ExtractorConfig,
        tuning: DrainConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let oracle = DrainOracle::new(config.drain_config(tuning))?;
        Self::new(oracle, config)
    }
}

fn oracle_error<E: Display>(e: E) -> ExtractorError {
    ExtractorError::Oracle(e.to_string())
}
