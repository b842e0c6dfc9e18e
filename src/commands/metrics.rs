use crate::context::Context;
use crate::pipeline::transform_log;
use crate::transform::TransformState;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Handles the 'metrics' command - prints the collected change metrics
pub struct MetricsCommand;

impl MetricsCommand {
    /// Execute the metrics command
    pub fn execute(ctx: &Context, log_file: &Path) -> Result<()> {
        let metrics = Self::run(ctx, log_file)?;

        let json = serde_json::to_string_pretty(&metrics).context("Failed to serialize to JSON")?;
        println!("{}", json);

        Ok(())
    }

    /// Strip and transform the log without rendering a comment
    pub fn run(ctx: &Context, log_file: &Path) -> Result<TransformState> {
        let log = ctx
            .fs
            .read_to_string(log_file)
            .context("Failed to read cdk log file")?;

        let (_, metrics) = transform_log(&log);
        Ok(metrics)
    }
}
