//! End to end log-to-comment processing
//!
//! raw log → ANSI stripping → processor chain → template → truncate or split

use serde::Serialize;

use crate::comment::{SEP_FOOTER, sep_header_id, split_comment, truncate};
use crate::config::NotifierConfig;
use crate::error::NotifierResult;
use crate::provider::diff_has_changes;
use crate::template::{CommentRenderer, RenderContext};
use crate::traits::FileSystem;
use crate::transform::{LogTransformer, TransformState, strip_ansi};

/// Everything a caller needs to post, update or delete a comment
#[derive(Debug, Clone, Serialize)]
pub struct NotifierOutput {
    /// Rendered comment, truncated unless comments are split
    pub body: String,

    /// Comments ready to post, more than one only when splitting
    pub comments: Vec<String>,

    pub metrics: TransformState,

    /// Whether the diff contains resource, statement or policy changes
    pub has_changes: bool,

    /// Every changed line only differs in a content hash
    pub hash_only: bool,
}

/// Run ANSI stripping and the processor chain only
pub fn transform_log(log: &str) -> (String, TransformState) {
    let transformation = LogTransformer::new().transform(&strip_ansi(log));
    (transformation.content, transformation.state)
}

/// Turn a raw diff log into one or more comments
pub fn run_pipeline(
    log: &str,
    config: &NotifierConfig,
    fs: &dyn FileSystem,
) -> NotifierResult<NotifierOutput> {
    let (content, metrics) = transform_log(log);
    let has_changes = diff_has_changes(&content);

    let context = RenderContext::new(&config.tag_id, &content)
        .with_metrics(&metrics)
        .with_job_link(config.job_link.as_deref())
        .with_collapsible(config.collapsible())
        .with_show_overview(config.show_overview)
        .with_template(&config.template)
        .with_custom_template(config.custom_template.as_deref());

    let renderer = CommentRenderer::new()?;
    let rendered = renderer.render(&context, fs)?;

    let max_length = config.max_comment_length();
    let (body, comments) = if config.split_comments {
        let comments = split_comment(
            &rendered,
            max_length,
            SEP_FOOTER,
            &sep_header_id(&config.tag_id),
        )?;
        (rendered, comments)
    } else {
        let body = truncate(&rendered, max_length);
        (body.clone(), vec![body])
    };

    let hash_only = is_hash_only(&metrics);
    tracing::debug!(
        comments = comments.len(),
        has_changes,
        hash_only,
        "pipeline finished"
    );

    Ok(NotifierOutput {
        body,
        comments,
        metrics,
        has_changes,
        hash_only,
    })
}

/// Whether all changed lines are hash-only changes
pub fn is_hash_only(metrics: &TransformState) -> bool {
    metrics.total_changed_lines > 0
        && metrics.total_changed_lines == metrics.hash_only_changed_lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifierError;
    use crate::provider::Vcs;
    use crate::test_helpers::{sample_cdk_diff, test_config};
    use crate::traits::MockFileSystem;

    #[test]
    fn test_sample_log_default_template() {
        let fs = MockFileSystem::new();
        let output = run_pipeline(sample_cdk_diff(), &test_config(), &fs).unwrap();

        assert_eq!(output.comments.len(), 1);
        assert!(output.has_changes);
        assert!(!output.hash_only);
        assert_eq!(output.metrics.number_of_replacements, 1);

        let comment = &output.comments[0];
        assert!(comment.starts_with("\n## cdk diff for stack \n<details>\n<summary>Click to expand</summary>"));
        assert!(comment.contains("```diff\n"));
        assert!(comment.ends_with("```\n</details>\n"));
        assert!(!comment.contains('\u{1b}'));
    }

    #[test]
    fn test_ansi_is_stripped_before_processing() {
        let fs = MockFileSystem::new();
        let log = "\u{1b}[32m[+]\u{1b}[39m AWS::SQS::Queue Queue Queue4A7E3555\n";

        let output = run_pipeline(log, &test_config(), &fs).unwrap();

        assert_eq!(output.metrics.changed_resources_by_type["AWS::SQS::Queue"].count, 1);
        assert!(output.body.contains("+[+] AWS::SQS::Queue Queue Queue4A7E3555"));
    }

    #[test]
    fn test_bitbucket_is_not_collapsible() {
        let fs = MockFileSystem::new();
        let mut config = test_config();
        config.vcs = Vcs::Bitbucket;

        let output = run_pipeline("+[+] x", &config, &fs).unwrap();
        assert!(!output.body.contains("<details>"));
    }

    #[test]
    fn test_long_comment_is_truncated() {
        let fs = MockFileSystem::new();
        let mut config = test_config();
        config.vcs = Vcs::GithubEnterprise;
        config.github_max_comment_length = Some(200);
        let log = "+ line\n".repeat(100);

        let output = run_pipeline(&log, &config, &fs).unwrap();

        assert_eq!(output.comments.len(), 1);
        assert_eq!(output.body.chars().count(), 200);
        assert!(output.body.ends_with("exceeds the maximum comment length."));
    }

    #[test]
    fn test_long_comment_is_split() {
        let fs = MockFileSystem::new();
        let mut config = test_config();
        config.vcs = Vcs::GithubEnterprise;
        config.github_max_comment_length = Some(400);
        config.split_comments = true;
        let log = "+ line\n".repeat(100);

        let output = run_pipeline(&log, &config, &fs).unwrap();

        assert!(output.comments.len() > 1);
        for comment in &output.comments {
            assert!(comment.chars().count() <= 400);
        }
        assert!(output.comments[1].starts_with("## cdk diff for stack\nContinued from previous comment."));
        assert!(output.comments[0].ends_with("Continued in next comment."));
        assert!(output.body.chars().count() > 400);
    }

    #[test]
    fn test_split_budget_too_small() {
        let fs = MockFileSystem::new();
        let mut config = test_config();
        config.vcs = Vcs::GithubEnterprise;
        config.github_max_comment_length = Some(50);
        config.split_comments = true;

        let err = run_pipeline(&"+ line\n".repeat(20), &config, &fs).unwrap_err();
        assert!(matches!(err, NotifierError::CommentBudget { .. }));
    }

    #[test]
    fn test_hash_only_change() {
        let fs = MockFileSystem::new();
        let log = "[~] AWS::Lambda::Function Handler\n └─ [~] Code\n     └─ [~] .S3Key:\n         ├─ [-] 8b7a5e1f0c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f.zip\n         └─ [+] 1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b.zip\n";

        let output = run_pipeline(log, &test_config(), &fs).unwrap();

        assert_eq!(output.metrics.hash_only_changed_lines, 2);
        assert_eq!(output.metrics.total_changed_lines, 2);
        assert!(output.hash_only);
    }

    #[test]
    fn test_no_changes() {
        let fs = MockFileSystem::new();
        let log = "Stack ApiStack\nThere were no differences\n\n✨  Number of stacks with differences: 0\n";

        let output = run_pipeline(log, &test_config(), &fs).unwrap();

        assert!(!output.has_changes);
        assert!(!output.hash_only);
        assert_eq!(output.metrics.total_changed_lines, 0);
    }

    #[test]
    fn test_is_hash_only_requires_changes() {
        assert!(!is_hash_only(&TransformState::new()));
    }

    #[test]
    fn test_bad_custom_template_fails() {
        let fs = MockFileSystem::new();
        let mut config = test_config();
        config.custom_template = Some("{{#if}}".to_string());

        assert!(matches!(
            run_pipeline("+[+] x", &config, &fs),
            Err(NotifierError::Template { .. })
        ));
    }
}
