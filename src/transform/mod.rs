//! CDK diff log transformation
//!
//! This module turns the raw, colored output of `cdk diff` into markdown diff
//! friendly text while collecting metrics about the change.
//!
//! # Pipeline
//!
//! - **ANSI stripping**: remove color and control sequences
//! - **Processor chain**: run every line through an ordered list of
//!   processors that count stacks, resource changes, replacements and
//!   hash-only changes, and rewrite change markers into `+`/`-`
//!
//! # Example
//!
//! ```ignore
//! use crate::transform::{strip_ansi, LogTransformer};
//!
//! let transformer = LogTransformer::new();
//! let result = transformer.transform(&strip_ansi(&raw_log));
//!
//! println!("{}", result.content);
//! println!("replacements: {}", result.state.number_of_replacements);
//! ```

mod ansi;
mod processors;
mod transformer;
mod types;

pub use ansi::strip_ansi;
pub use transformer::LogTransformer;
pub use types::{ResourceMetric, TransformState};
