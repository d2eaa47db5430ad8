//! Cluster module - pattern classes handed out by an oracle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a pattern class
///
/// Identifiers are assigned by the oracle that created the class and are only
/// meaningful for the lifetime of that oracle instance. Two oracles may hand
/// out the same value for unrelated classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Create a ClusterId from a raw value
    ///
    /// # Examples
    ///
    /// ```
    /// use logsift_domain::ClusterId;
    ///
    /// let id = ClusterId::from_value(7);
    /// assert_eq!(id.value(), 7);
    /// assert_eq!(id.to_string(), "C7");
    /// ```
    pub fn from_value(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Snapshot of a live pattern class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Class identity
    pub id: ClusterId,

    /// Number of chunks observed so far that were assigned to this class
    pub size: u64,

    /// Current template, variable tokens rendered as `<*>`
    pub template: String,
}

/// What an observation did to the oracle's model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterChange {
    /// A new class was created for this chunk
    Created,
    /// An existing class absorbed the chunk and its template was generalized
    TemplateChanged,
    /// An existing class absorbed the chunk unchanged
    Unchanged,
    /// Capacity was reached; the chunk was folded into the nearest class
    Folded,
}

/// Outcome of a single `observe` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Class the chunk was assigned to
    pub cluster_id: ClusterId,

    /// Effect on the model
    pub change: ClusterChange,
}

impl Observation {
    /// Create a new observation
    pub fn new(cluster_id: ClusterId, change: ClusterChange) -> Self {
        Self { cluster_id, change }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_id_display() {
        assert_eq!(ClusterId::from_value(0).to_string(), "C0");
        assert_eq!(ClusterId::from_value(42).to_string(), "C42");
    }

    #[test]
    fn test_cluster_id_serializes_as_number() {
        let json = serde_json::to_string(&ClusterId::from_value(5)).unwrap();
        assert_eq!(json, "5");
    }

    #[test]
    fn test_cluster_change_serialization() {
        let json = serde_json::to_string(&ClusterChange::TemplateChanged).unwrap();
        assert_eq!(json, "\"template_changed\"");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ClusterId ordering matches u64 ordering
        #[test]
        fn test_cluster_id_ordering_property(a: u64, b: u64) {
            let id_a = ClusterId::from_value(a);
            let id_b = ClusterId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
