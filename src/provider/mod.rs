//! Version control system knowledge needed to shape a comment
//!
//! Nothing in here talks to a VCS API. It only knows the per-provider limits
//! and conventions a caller needs before posting the rendered comment.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NotifierError;

/// Maximum number of characters GitHub accepts in a single comment
pub const GITHUB_MAX_COMMENT_LENGTH: usize = 65536;

/// Maximum number of characters Bitbucket accepts in a single comment
pub const BITBUCKET_MAX_COMMENT_LENGTH: usize = 32768;

/// Maximum number of characters GitLab accepts in a single note
pub const GITLAB_MAX_COMMENT_LENGTH: usize = 1_000_000;

/// Prefix of every comment header, used to find an existing comment again
pub const HEADER_PREFIX: &str = "## cdk diff for";

lazy_static! {
    static ref DIFF_CHANGES: Regex = Regex::new(r"(?m)(Policy Changes|Resources\n|Statement Changes)")
        .expect("Invalid diff changes regex");
}

/// Supported version control systems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vcs {
    #[default]
    Github,
    GithubEnterprise,
    Gitlab,
    Bitbucket,
}

impl Vcs {
    /// Identifier used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Vcs::Github => "github",
            Vcs::GithubEnterprise => "github-enterprise",
            Vcs::Gitlab => "gitlab",
            Vcs::Bitbucket => "bitbucket",
        }
    }

    /// Whether the markdown renderer supports `<details>` sections
    pub fn supports_collapsible(&self) -> bool {
        !matches!(self, Vcs::Bitbucket)
    }

    /// Maximum comment length in characters
    ///
    /// `enterprise_override` is only honoured for GitHub Enterprise, where a
    /// nonzero value replaces the github.com limit.
    pub fn max_comment_length(&self, enterprise_override: Option<usize>) -> usize {
        match self {
            Vcs::Github => GITHUB_MAX_COMMENT_LENGTH,
            Vcs::GithubEnterprise => match enterprise_override {
                Some(length) if length > 0 => length,
                _ => GITHUB_MAX_COMMENT_LENGTH,
            },
            Vcs::Gitlab => GITLAB_MAX_COMMENT_LENGTH,
            Vcs::Bitbucket => BITBUCKET_MAX_COMMENT_LENGTH,
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vcs {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(Vcs::Github),
            "github-enterprise" | "githubenterprise" => Ok(Vcs::GithubEnterprise),
            "gitlab" => Ok(Vcs::Gitlab),
            "bitbucket" => Ok(Vcs::Bitbucket),
            other => Err(NotifierError::InvalidConfig(format!(
                "unsupported version control system '{}' (expected github, github-enterprise, gitlab or bitbucket)",
                other
            ))),
        }
    }
}

/// Header line identifying the comment for a tag id
pub fn header_tag_id(tag_id: &str) -> String {
    format!("{} {}", HEADER_PREFIX, tag_id)
}

/// Whether a rendered diff contains any stack changes worth posting
pub fn diff_has_changes(body: &str) -> bool {
    DIFF_CHANGES.is_match(body)
}
