use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::provider::Vcs;
use crate::traits::FileSystem;

/// Optional YAML config file (`--config`)
///
/// Every key is optional; values given on the command line or through the
/// environment take precedence.
///
/// ```yaml
/// log_file: cdk.log
/// tag_id: api-stack
/// vcs: github-enterprise
/// template: extendedWithResources
/// github_max_comment_length: 100000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub log_file: Option<PathBuf>,
    pub tag_id: Option<String>,
    pub vcs: Option<Vcs>,
    pub disable_collapse: Option<bool>,
    pub show_overview: Option<bool>,
    pub template: Option<String>,
    pub custom_template: Option<String>,
    pub job_link: Option<String>,
    pub github_max_comment_length: Option<usize>,
    pub split_comments: Option<bool>,
    pub write_diff_file: Option<bool>,
}

impl ConfigFile {
    /// Load a config file through the given filesystem
    pub fn from_file(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let content = fs.read_to_string(path)?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ConfigFile = serde_yaml::from_str(content)?;
        Ok(config)
    }
}
