pub mod metrics;
pub mod render;

pub use metrics::MetricsCommand;
pub use render::RenderCommand;
