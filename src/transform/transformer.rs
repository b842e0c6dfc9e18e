use super::processors::ProcessorChain;
use super::types::TransformState;

/// Result of a transformation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    /// Rewritten log content
    pub content: String,

    /// Metrics collected while scanning
    pub state: TransformState,
}

/// Runs a processor chain over every line of a diff log
pub struct LogTransformer {
    chain: ProcessorChain,
}

impl Default for LogTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogTransformer {
    /// Create a transformer with the `cdk diff` processor chain
    pub fn new() -> Self {
        Self::with_chain(ProcessorChain::cdk_diff())
    }

    /// Create a transformer with a custom processor chain
    pub fn with_chain(chain: ProcessorChain) -> Self {
        Self { chain }
    }

    /// Scan the log line by line, in order, exactly once
    ///
    /// Lines are split on `\n` and joined back with `\n`, so the number of
    /// lines and a trailing newline are preserved.
    pub fn transform(&self, log: &str) -> Transformation {
        let mut state = TransformState::new();
        let lines: Vec<String> = log
            .split('\n')
            .map(|line| self.chain.process_line(line.to_string(), &mut state))
            .collect();

        tracing::debug!(
            lines = lines.len(),
            changed = state.total_changed_lines,
            hash_only = state.hash_only_changed_lines,
            "Transformed diff log"
        );

        Transformation {
            content: lines.join("\n"),
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_cdk_diff;
    use crate::transform::types::ResourceMetric;

    #[test]
    fn test_transform_multiline_markers() {
        let transformer = LogTransformer::new();
        let result = transformer.transform("[+] line1 \n ---[+] line2");
        assert_eq!(result.content, "+[+] line1 \n+---[+] line2");

        let result = transformer.transform("[+] line1 \n --[[-[-] line2");
        assert_eq!(result.content, "+[+] line1 \n---[[-[-] line2");
    }

    #[test]
    fn test_transform_preserves_trailing_newline() {
        let transformer = LogTransformer::new();
        let result = transformer.transform("Stack A\n\n");
        assert_eq!(result.content, "Stack A\n\n");
    }

    #[test]
    fn test_transform_without_matches_is_identity() {
        let transformer = LogTransformer::new();
        let log = "Stack MyStack\nThere were no differences\n";

        let result = transformer.transform(log);

        assert_eq!(result.content, log);
        assert_eq!(result.state, TransformState::new());
    }

    #[test]
    fn test_transform_sample_log_metrics() {
        let transformer = LogTransformer::new();
        let result = transformer.transform(sample_cdk_diff());
        let state = &result.state;

        assert_eq!(
            state.number_of_differences_line,
            "✨  Number of stacks with differences: 1"
        );
        assert_eq!(state.number_of_replacements, 1);
        assert_eq!(
            state.changed_resources_by_type["AWS::DynamoDB::Table"],
            ResourceMetric {
                count: 2,
                replaced: true
            }
        );
        assert_eq!(
            state.changed_resources_by_type["AWS::Lambda::Function"],
            ResourceMetric {
                count: 1,
                replaced: false
            }
        );
        assert_eq!(
            state.changed_resources_by_type["AWS::IAM::Role"],
            ResourceMetric {
                count: 1,
                replaced: false
            }
        );
        assert_eq!(state.hash_only_changed_lines, 2);
        assert_eq!(state.total_changed_lines, 8);
    }

    #[test]
    fn test_each_run_starts_with_fresh_state() {
        let transformer = LogTransformer::new();
        transformer.transform("(requires replacement)");
        let second = transformer.transform("nothing here");

        assert_eq!(second.state.number_of_replacements, 0);
    }
}
