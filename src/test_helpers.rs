//! Shared fixtures for unit tests

#![cfg(test)]

use crate::config::NotifierConfig;

/// A `cdk diff` log with IAM statement changes, resource changes, a
/// replacement and two hash-only asset updates
pub fn sample_cdk_diff() -> &'static str {
    include_str!("../tests/data/cdk-diff.log")
}

/// Default configuration for a GitHub run on `cdk.log`
pub fn test_config() -> NotifierConfig {
    NotifierConfig::new("cdk.log")
}
