use std::fmt;
use std::path::PathBuf;

/// Error types for the log-to-comment pipeline
#[derive(Debug)]
pub enum NotifierError {
    /// Template could not be parsed or rendered
    Template { name: String, message: String },

    /// Custom template path exists but could not be read
    CustomTemplateRead { path: PathBuf, message: String },

    /// Configuration value is missing or malformed
    InvalidConfig(String),

    /// Maximum comment size leaves no room for content next to the separators
    CommentBudget {
        max_size: usize,
        separators_len: usize,
    },
}

impl fmt::Display for NotifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifierError::Template { name, message } => {
                write!(f, "Failed to render template '{}': {}", name, message)
            }
            NotifierError::CustomTemplateRead { path, message } => {
                write!(
                    f,
                    "Failed to read custom template {}: {}",
                    path.display(),
                    message
                )
            }
            NotifierError::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            NotifierError::CommentBudget {
                max_size,
                separators_len,
            } => {
                write!(
                    f,
                    "Maximum comment size {} is too small for continuation separators of {} characters",
                    max_size, separators_len
                )
            }
        }
    }
}

impl std::error::Error for NotifierError {}

/// Result type for pipeline operations
pub type NotifierResult<T> = Result<T, NotifierError>;
