//! Fitting a rendered comment into provider limits
//!
//! Providers reject comments above a fixed size. A comment is either cut and
//! marked as truncated, or split into several comments that point at each
//! other with continuation separators.

mod split;
mod truncate;

pub use split::{SEP_FOOTER, sep_header_id, split_comment};
pub use truncate::truncate;
