//! Logsift Drain Layer
//!
//! Pattern oracle implementations of the `PatternOracle` trait from
//! `logsift-domain`.
//!
//! # Oracles
//!
//! - `DrainOracle`: fixed-depth prefix-tree log clusterer in the style of Drain
//! - `MockOracle`: deterministic exact-text classifier for testing
//!
//! # Examples
//!
//! ```
//! use logsift_drain::{DrainConfig, DrainOracle};
//! use logsift_domain::{MatchMode, PatternOracle};
//!
//! let mut oracle = DrainOracle::new(DrainConfig::default()).unwrap();
//! let first = oracle.observe("connected to 10.0.0.1 in 12ms").unwrap();
//! let second = oracle.observe("connected to 10.0.0.7 in 40ms").unwrap();
//! assert_eq!(first.cluster_id, second.cluster_id);
//!
//! let matched = oracle.match_chunk("connected to 10.0.0.9 in 3ms", MatchMode::Always).unwrap();
//! assert_eq!(matched, Some(first.cluster_id));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod drain;
mod profile;

use logsift_domain::{
    ClusterChange, ClusterId, ClusterSummary, MatchMode, Observation, PatternOracle,
};
use std::cell::Cell;
use std::collections::HashSet;
use thiserror::Error;

pub use config::DrainConfig;
pub use drain::DrainOracle;
pub use profile::{ProfileReport, SectionStats};

/// Errors that can occur during oracle operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrainError {
    /// Rejected configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal bookkeeping no longer agrees with itself
    #[error("Inconsistent oracle state: {0}")]
    InconsistentState(String),

    /// Failure injected by a test oracle
    #[error("Injected failure: {0}")]
    Injected(String),
}

/// Mock oracle for deterministic testing
///
/// Identical text always resolves to the same class; ids are handed out in
/// first-observation order. Once capacity is reached, unseen text folds into
/// the lowest-id class. `MatchMode::Always` resolves unseen text to that same
/// class.
///
/// # Examples
///
/// ```
/// use logsift_drain::MockOracle;
/// use logsift_domain::{MatchMode, PatternOracle};
///
/// let mut oracle = MockOracle::new(2).unwrap();
/// let a = oracle.observe("a\n").unwrap().cluster_id;
/// let b = oracle.observe("b\n").unwrap().cluster_id;
/// assert_ne!(a, b);
///
/// // Capacity reached: folds into the first class
/// assert_eq!(oracle.observe("c\n").unwrap().cluster_id, a);
/// assert_eq!(oracle.match_chunk("b\n", MatchMode::Strict).unwrap(), Some(b));
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    max_clusters: usize,
    classes: Vec<(String, u64)>,
    fail_observe: HashSet<String>,
    fail_match: HashSet<String>,
    observe_calls: usize,
    match_calls: Cell<usize>,
}

impl MockOracle {
    /// Create a new MockOracle with the given class capacity
    pub fn new(max_clusters: usize) -> Result<Self, DrainError> {
        if max_clusters == 0 {
            return Err(DrainError::InvalidConfig(
                "max_clusters must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            max_clusters,
            classes: Vec::new(),
            fail_observe: HashSet::new(),
            fail_match: HashSet::new(),
            observe_calls: 0,
            match_calls: Cell::new(0),
        })
    }

    /// Configure `observe` to fail for a specific text
    pub fn fail_observe_on(&mut self, text: impl Into<String>) {
        self.fail_observe.insert(text.into());
    }

    /// Configure `match_chunk` to fail for a specific text
    pub fn fail_match_on(&mut self, text: impl Into<String>) {
        self.fail_match.insert(text.into());
    }

    /// Number of `observe` calls since construction
    pub fn observe_calls(&self) -> usize {
        self.observe_calls
    }

    /// Number of `match_chunk` calls since construction
    pub fn match_calls(&self) -> usize {
        self.match_calls.get()
    }

    fn position(&self, text: &str) -> Option<usize> {
        self.classes.iter().position(|(known, _)| known == text)
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self {
            max_clusters: config::DEFAULT_MAX_CLUSTERS,
            classes: Vec::new(),
            fail_observe: HashSet::new(),
            fail_match: HashSet::new(),
            observe_calls: 0,
            match_calls: Cell::new(0),
        }
    }
}

impl PatternOracle for MockOracle {
    type Error = DrainError;

    fn observe(&mut self, text: &str) -> Result<Observation, Self::Error> {
        self.observe_calls += 1;

        if self.fail_observe.contains(text) {
            return Err(DrainError::Injected(format!("observe failed for {:?}", text)));
        }

        if let Some(idx) = self.position(text) {
            self.classes[idx].1 += 1;
            return Ok(Observation::new(
                ClusterId::from_value(idx as u64),
                ClusterChange::Unchanged,
            ));
        }

        if self.classes.len() < self.max_clusters {
            self.classes.push((text.to_string(), 1));
            let id = ClusterId::from_value((self.classes.len() - 1) as u64);
            return Ok(Observation::new(id, ClusterChange::Created));
        }

        self.classes[0].1 += 1;
        Ok(Observation::new(ClusterId::from_value(0), ClusterChange::Folded))
    }

    fn match_chunk(&self, text: &str, mode: MatchMode) -> Result<Option<ClusterId>, Self::Error> {
        self.match_calls.set(self.match_calls.get() + 1);

        if self.fail_match.contains(text) {
            return Err(DrainError::Injected(format!("match failed for {:?}", text)));
        }

        let found = self.position(text).map(|idx| ClusterId::from_value(idx as u64));
        Ok(match (found, mode) {
            (Some(id), _) => Some(id),
            (None, MatchMode::Strict) => None,
            (None, MatchMode::Always) => (!self.classes.is_empty()).then(|| ClusterId::from_value(0)),
        })
    }

    fn clusters(&self) -> Vec<ClusterSummary> {
        self.classes
            .iter()
            .enumerate()
            .map(|(idx, (text, size))| ClusterSummary {
                id: ClusterId::from_value(idx as u64),
                size: *size,
                template: text.trim().to_string(),
            })
            .collect()
    }

    fn max_clusters(&self) -> usize {
        self.max_clusters
    }

    fn reset(&mut self) {
        self.classes.clear();
    }
}
