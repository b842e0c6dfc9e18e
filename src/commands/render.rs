use crate::config::{ConfigFile, ConfigOverrides, NotifierConfig};
use crate::context::Context;
use crate::pipeline::{NotifierOutput, run_pipeline};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Line printed between split comments in text output
pub const COMMENT_DELIMITER: &str = "----- cdk-notifier: next comment -----";

/// Handles the 'render' command - turns a diff log into comment bodies
pub struct RenderCommand;

impl RenderCommand {
    /// Execute the render command
    pub fn execute(ctx: &Context, config: &NotifierConfig, output_format: &str) -> Result<()> {
        let output = Self::run(ctx, config)?;

        Self::print_summary(ctx, config, &output);
        Self::output_results(&output, output_format)?;

        Ok(())
    }

    /// Resolve the configuration from overrides and an optional config file
    pub fn load_config(
        ctx: &Context,
        overrides: ConfigOverrides,
        config_path: Option<&Path>,
    ) -> Result<NotifierConfig> {
        let file = match config_path {
            Some(path) => Some(
                ConfigFile::from_file(&*ctx.fs, path)
                    .with_context(|| format!("Failed to load config file: {:?}", path))?,
            ),
            None => None,
        };

        let config = overrides.resolve(file)?;
        Ok(config)
    }

    /// Read the log, run the pipeline and write the diff file if requested
    pub fn run(ctx: &Context, config: &NotifierConfig) -> Result<NotifierOutput> {
        let log = ctx
            .fs
            .read_to_string(&config.log_file)
            .context("Failed to read cdk log file")?;

        let output = run_pipeline(&log, config, &*ctx.fs)?;

        if config.write_diff_file {
            let diff_path = Self::diff_file_path(&config.log_file);
            ctx.fs.write(&diff_path, &output.body)?;
            ctx.output
                .success(&format!("Wrote rendered diff to {}", diff_path.display()));
        }

        Ok(output)
    }

    /// `<log file>.diff`
    pub fn diff_file_path(log_file: &Path) -> PathBuf {
        let mut name = log_file.as_os_str().to_owned();
        name.push(".diff");
        PathBuf::from(name)
    }

    fn print_summary(ctx: &Context, config: &NotifierConfig, output: &NotifierOutput) {
        let metrics = &output.metrics;

        ctx.output.section(&format!("cdk diff for {}", config.tag_id));

        if !metrics.number_of_differences_line.is_empty() {
            ctx.output.dimmed(metrics.number_of_differences_line.trim());
        }

        ctx.output.key_value("VCS", config.vcs.as_str());
        ctx.output
            .key_value("Changed lines", &metrics.total_changed_lines.to_string());
        ctx.output.key_value(
            "Hash-only changed lines",
            &metrics.hash_only_changed_lines.to_string(),
        );
        ctx.output.key_value(
            "Resources requiring replacement",
            &metrics.number_of_replacements.to_string(),
        );

        for (resource_type, metric) in &metrics.changed_resources_by_type {
            let value = if metric.replaced {
                format!("{} (replacement)", metric.count)
            } else {
                metric.count.to_string()
            };
            ctx.output.key_value(resource_type, &value);
        }

        if !output.has_changes {
            ctx.output.info("No stack changes detected");
        }

        if output.hash_only {
            ctx.output
                .warning("All changed lines only differ in asset hashes");
        }

        if output.comments.len() > 1 {
            ctx.output.info(&format!(
                "Comment split into {} parts of at most {} characters",
                output.comments.len(),
                config.max_comment_length()
            ));
        }
    }

    /// Comments separated by [`COMMENT_DELIMITER`] lines
    fn format_text(comments: &[String]) -> String {
        let mut text = String::new();
        for (index, comment) in comments.iter().enumerate() {
            if index > 0 {
                text.push_str(COMMENT_DELIMITER);
                text.push('\n');
            }
            text.push_str(comment);
            text.push('\n');
        }
        text
    }

    fn output_results(output: &NotifierOutput, format: &str) -> Result<()> {
        match format {
            "text" => {
                print!("{}", Self::format_text(&output.comments));
            }
            "json" => {
                let json = serde_json::to_string_pretty(output)
                    .context("Failed to serialize to JSON")?;
                println!("{}", json);
            }
            "yaml" => {
                let yaml =
                    serde_yaml::to_string(output).context("Failed to serialize to YAML")?;
                println!("{}", yaml);
            }
            _ => {
                anyhow::bail!(
                    "Unsupported output format: {}. Use 'text', 'json' or 'yaml'",
                    format
                );
            }
        }

        Ok(())
    }
}
