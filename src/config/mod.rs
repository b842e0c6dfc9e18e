//! Runtime configuration
//!
//! Values come from, highest precedence first: command line flags,
//! environment variables (both handled by clap), the optional YAML config
//! file and finally built-in defaults.

mod file;

pub use file::ConfigFile;

use serde::Serialize;
use std::path::PathBuf;

use crate::error::{NotifierError, NotifierResult};
use crate::provider::Vcs;
use crate::template::DEFAULT_TEMPLATE_NAME;

/// Tag id used when none is configured
pub const DEFAULT_TAG_ID: &str = "stack";

/// Fully resolved settings for one notifier run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotifierConfig {
    pub log_file: PathBuf,
    pub tag_id: String,
    pub vcs: Vcs,
    pub disable_collapse: bool,
    pub show_overview: bool,
    pub template: String,
    pub custom_template: Option<String>,
    pub job_link: Option<String>,
    pub github_max_comment_length: Option<usize>,
    pub split_comments: bool,
    pub write_diff_file: bool,
}

impl NotifierConfig {
    /// Defaults for the given log file
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            tag_id: DEFAULT_TAG_ID.to_string(),
            vcs: Vcs::default(),
            disable_collapse: false,
            show_overview: false,
            template: DEFAULT_TEMPLATE_NAME.to_string(),
            custom_template: None,
            job_link: None,
            github_max_comment_length: None,
            split_comments: false,
            write_diff_file: false,
        }
    }

    /// Check the resolved values
    pub fn validate(&self) -> NotifierResult<()> {
        if self.log_file.as_os_str().is_empty() {
            return Err(NotifierError::InvalidConfig(
                "missing log file. Set --log-file or env var LOG_FILE".to_string(),
            ));
        }

        if self.tag_id.trim().is_empty() {
            return Err(NotifierError::InvalidConfig(
                "tag id must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether the diff is wrapped into a `<details>` section
    pub fn collapsible(&self) -> bool {
        self.vcs.supports_collapsible() && !self.disable_collapse
    }

    /// Maximum comment length for the configured provider
    pub fn max_comment_length(&self) -> usize {
        self.vcs.max_comment_length(self.github_max_comment_length)
    }
}

/// Values given on the command line or through the environment
///
/// `None` means "not set here" so lower layers can fill it.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_file: Option<PathBuf>,
    pub tag_id: Option<String>,
    pub vcs: Option<String>,
    pub disable_collapse: Option<bool>,
    pub show_overview: Option<bool>,
    pub template: Option<String>,
    pub custom_template: Option<String>,
    pub job_link: Option<String>,
    pub github_max_comment_length: Option<usize>,
    pub split_comments: Option<bool>,
    pub write_diff_file: Option<bool>,
}

impl ConfigOverrides {
    /// Merge with an optional config file and the defaults, then validate
    pub fn resolve(self, file: Option<ConfigFile>) -> NotifierResult<NotifierConfig> {
        let file = file.unwrap_or_default();

        let log_file = self.log_file.or(file.log_file).unwrap_or_default();
        let mut config = NotifierConfig::new(log_file);

        if let Some(tag_id) = self.tag_id.or(file.tag_id) {
            config.tag_id = tag_id;
        }

        config.vcs = match self.vcs {
            Some(vcs) => vcs.parse()?,
            None => file.vcs.unwrap_or_default(),
        };

        config.disable_collapse = self.disable_collapse.or(file.disable_collapse).unwrap_or(false);
        config.show_overview = self.show_overview.or(file.show_overview).unwrap_or(false);

        if let Some(template) = self.template.or(file.template) {
            config.template = template;
        }

        config.custom_template = self
            .custom_template
            .or(file.custom_template)
            .filter(|value| !value.is_empty());
        config.job_link = self.job_link.or(file.job_link).filter(|value| !value.is_empty());
        config.github_max_comment_length = self
            .github_max_comment_length
            .or(file.github_max_comment_length)
            .filter(|length| *length > 0);
        config.split_comments = self.split_comments.or(file.split_comments).unwrap_or(false);
        config.write_diff_file = self.write_diff_file.or(file.write_diff_file).unwrap_or(false);

        config.validate()?;

        tracing::debug!(
            log_file = %config.log_file.display(),
            tag_id = %config.tag_id,
            vcs = %config.vcs,
            template = %config.template,
            "resolved configuration"
        );

        Ok(config)
    }
}
