//! Data types collected while scanning a diff log
//!
//! `TransformState` is the accumulator every line processor writes into. It is
//! created fresh for each transformation run and handed to the template
//! renderer afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Change tally for a single resource type (e.g. `AWS::DynamoDB::Table`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetric {
    /// Number of diff lines that touched this resource type
    pub count: usize,

    /// Whether any of those lines announced a replacement.
    /// Only ever transitions from false to true within a run.
    pub replaced: bool,
}

impl ResourceMetric {
    /// Record one more change, keeping an earlier replacement sticky
    pub fn record(&mut self, replaced: bool) {
        self.count += 1;
        self.replaced = self.replaced || replaced;
    }
}

/// Shared accumulator mutated by the line processors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformState {
    /// Last seen "Number of stacks with differences: N" line
    pub number_of_differences_line: String,

    /// Lines announcing "(requires replacement)" or "(may cause replacement)"
    pub number_of_replacements: usize,

    /// Per resource type change counters
    pub changed_resources_by_type: BTreeMap<String, ResourceMetric>,

    /// Lines starting with `+` or `-` after symbol normalization
    pub total_changed_lines: usize,

    /// Changed lines that carry a content hash token
    pub hash_only_changed_lines: usize,
}

impl TransformState {
    /// Create an empty state for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change for the given resource type
    pub fn record_resource(&mut self, resource_type: &str, replaced: bool) {
        self.changed_resources_by_type
            .entry(resource_type.to_string())
            .or_default()
            .record(replaced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_metric_replaced_is_sticky() {
        let mut metric = ResourceMetric::default();

        metric.record(true);
        metric.record(false);

        assert_eq!(metric.count, 2);
        assert!(metric.replaced);
    }

    #[test]
    fn test_record_resource_creates_entry() {
        let mut state = TransformState::new();

        state.record_resource("AWS::S3::Bucket", false);
        state.record_resource("AWS::S3::Bucket", false);
        state.record_resource("AWS::IAM::Role", true);

        assert_eq!(
            state.changed_resources_by_type["AWS::S3::Bucket"],
            ResourceMetric {
                count: 2,
                replaced: false
            }
        );
        assert_eq!(
            state.changed_resources_by_type["AWS::IAM::Role"],
            ResourceMetric {
                count: 1,
                replaced: true
            }
        );
    }

    #[test]
    fn test_state_serializes_to_json() {
        let mut state = TransformState::new();
        state.record_resource("AWS::Lambda::Function", false);
        state.total_changed_lines = 3;

        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["total_changed_lines"], 3);
        assert_eq!(
            json["changed_resources_by_type"]["AWS::Lambda::Function"]["count"],
            1
        );
    }
}
