mod commands;
mod comment;
mod config;
mod context;
mod error;
mod output;
mod pipeline;
mod provider;
mod template;
mod test_helpers;
mod traits;
mod transform;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{MetricsCommand, RenderCommand};
use config::ConfigOverrides;
use context::Context;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "cdk-notifier")]
#[command(about = "Turn cdk diff logs into pull/merge request comments", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the comment for a cdk diff log and print it to stdout
    Render {
        #[command(flatten)]
        args: RenderArgs,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the change metrics collected from a cdk diff log as JSON
    Metrics {
        /// Path to the cdk log file
        #[arg(short, long, env = "LOG_FILE")]
        log_file: PathBuf,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Path to the cdk log file
    #[arg(short, long, env = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Unique identifier for the stack within the pipeline [default: stack]
    #[arg(short, long, env = "TAG_ID")]
    tag_id: Option<String>,

    /// Version control system (github, github-enterprise, gitlab, bitbucket) [default: github]
    #[arg(long, env = "VERSION_CONTROL_SYSTEM")]
    vcs: Option<String>,

    /// Do not wrap the diff into a collapsible section
    #[arg(long, env = "DISABLE_COLLAPSE", num_args = 0..=1, default_missing_value = "true")]
    disable_collapse: Option<bool>,

    /// Show the stack overview (same as --template extended)
    #[arg(long, env = "SHOW_OVERVIEW", num_args = 0..=1, default_missing_value = "true")]
    show_overview: Option<bool>,

    /// Built-in template (default, extended, extendedWithResources) [default: default]
    #[arg(long, env = "TEMPLATE")]
    template: Option<String>,

    /// Path to a template file, or an inline Handlebars template
    #[arg(long, env = "CUSTOM_TEMPLATE")]
    custom_template: Option<String>,

    /// Link to the CI job shown next to the comment header
    #[arg(long, env = "JOB_LINK")]
    job_link: Option<String>,

    /// Maximum comment length for GitHub Enterprise
    #[arg(long, env = "GITHUB_MAX_COMMENT_LENGTH")]
    github_max_comment_length: Option<usize>,

    /// Split long comments instead of truncating them
    #[arg(long, env = "SPLIT_COMMENTS", num_args = 0..=1, default_missing_value = "true")]
    split_comments: Option<bool>,

    /// Also write the rendered comment to <log-file>.diff
    #[arg(long, env = "WRITE_DIFF_FILE", num_args = 0..=1, default_missing_value = "true")]
    write_diff_file: Option<bool>,

    /// Optional YAML config file
    #[arg(short, long, env = "CDK_NOTIFIER_CONFIG")]
    config: Option<PathBuf>,
}

impl RenderArgs {
    fn overrides(self) -> (ConfigOverrides, Option<PathBuf>) {
        let overrides = ConfigOverrides {
            log_file: self.log_file,
            tag_id: self.tag_id,
            vcs: self.vcs,
            disable_collapse: self.disable_collapse,
            show_overview: self.show_overview,
            template: self.template,
            custom_template: self.custom_template,
            job_link: self.job_link,
            github_max_comment_length: self.github_max_comment_length,
            split_comments: self.split_comments,
            write_diff_file: self.write_diff_file,
        };
        (overrides, self.config)
    }
}

fn init_logging(verbosity: &str) -> Result<()> {
    let level = tracing::Level::from_str(verbosity)
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", verbosity))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbosity)?;

    let ctx = Context::new();

    match cli.command {
        Commands::Render { args, format } => {
            let (overrides, config_path) = args.overrides();
            let config = RenderCommand::load_config(&ctx, overrides, config_path.as_deref())?;
            RenderCommand::execute(&ctx, &config, &format)?;
        }
        Commands::Metrics { log_file } => {
            MetricsCommand::execute(&ctx, &log_file)?;
        }
    }

    Ok(())
}
