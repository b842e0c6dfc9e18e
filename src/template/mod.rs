//! Comment body rendering
//!
//! A comment is rendered from one of the built-in Handlebars templates or a
//! user supplied one, against the transformed diff and its metrics.

mod context;
mod renderer;
mod templates;

pub use context::{DEFAULT_TEMPLATE_NAME, RenderContext};
pub use renderer::CommentRenderer;
