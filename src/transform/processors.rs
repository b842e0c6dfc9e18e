//! Line processors for CDK diff logs
//!
//! Each processor inspects one line, may record something in the shared
//! [`TransformState`] and returns the (possibly rewritten) line. Processors
//! never fail: a line that does not match is handed back untouched.

use lazy_static::lazy_static;
use regex::Regex;

use super::types::TransformState;

/// Signature shared by all line processors
pub type LineProcessor = fn(String, &mut TransformState) -> String;

/// Label printed by `cdk diff` once all stacks were compared
pub const STACK_COUNT_LABEL: &str = "Number of stacks with differences:";

/// Phrases `cdk diff` appends to properties whose change replaces the resource
pub const REPLACEMENT_PHRASES: [&str; 2] = ["(requires replacement)", "(may cause replacement)"];

lazy_static! {
    // [+] / [-] resource markers, or │ + │ / │ - │ cells in IAM tables
    static ref DIFF_SYMBOL: Regex = Regex::new(
        r"(?:\[(?P<resource>[+-]+)\])|(?:│ (?P<security>[+-]+) │)"
    )
    .expect("Invalid diff symbol regex");

    // [~] AWS::DynamoDB::Table Table TableCD117FA1 replace
    static ref RESOURCE_CHANGE: Regex = Regex::new(
        r"^\s*\[([-+~])\] (AWS::\w+::\w+).*?(replaced?)?\s*$"
    )
    .expect("Invalid resource change regex");

    // Content addressed asset hashes (sha256, optionally with a one char suffix)
    static ref HASH_TOKEN: Regex = Regex::new(r"[0-9a-fA-F]{64,65}")
        .expect("Invalid hash token regex");
}

/// Capture the "Number of stacks with differences" line (last one wins)
pub fn extract_stack_count(line: String, state: &mut TransformState) -> String {
    if line.contains(STACK_COUNT_LABEL) {
        state.number_of_differences_line = line.clone();
    }
    line
}

/// Count changes per resource type and remember replacements
pub fn extract_resource_change(line: String, state: &mut TransformState) -> String {
    if let Some(caps) = RESOURCE_CHANGE.captures(&line) {
        let resource_type = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let replaced = caps.get(3).is_some();

        tracing::trace!(resource_type, replaced, "Detected resource change");
        state.record_resource(resource_type, replaced);
    }
    line
}

/// Count lines flagged as requiring (or possibly causing) a replacement
pub fn count_replacements(line: String, state: &mut TransformState) -> String {
    if REPLACEMENT_PHRASES.iter().any(|phrase| line.contains(phrase)) {
        state.number_of_replacements += 1;
    }
    line
}

/// Rewrite the first character of a changed line into a markdown diff symbol
///
/// `[+] AWS::S3::Bucket` becomes `+[+] AWS::S3::Bucket`, while lines that do
/// not start with `[` lose their first character so the indentation stays
/// the same, e.g. `│ + │ ...` becomes `+ + │ ...`.
pub fn normalize_diff_symbol(line: String, _state: &mut TransformState) -> String {
    let Some(symbol) = find_diff_symbol(&line) else {
        return line;
    };

    tracing::trace!(symbol, line = line.as_str(), "Detected change symbol");

    let rest = if line.starts_with('[') {
        line.as_str()
    } else {
        trim_first_char(&line)
    };

    format!("{}{}", symbol, rest)
}

/// Count changed lines and the subset of them carrying only a hash token
pub fn classify_hash_change(line: String, state: &mut TransformState) -> String {
    if !(line.starts_with('+') || line.starts_with('-')) {
        return line;
    }

    state.total_changed_lines += 1;
    if HASH_TOKEN.is_match(&line) {
        state.hash_only_changed_lines += 1;
    }
    line
}

fn find_diff_symbol(line: &str) -> Option<&str> {
    let caps = DIFF_SYMBOL.captures(line)?;
    caps.name("resource")
        .or_else(|| caps.name("security"))
        .map(|m| m.as_str())
}

fn trim_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}

/// A named processor in the chain
#[derive(Clone, Copy)]
pub struct ProcessorStage {
    pub name: &'static str,
    pub process: LineProcessor,
}

impl std::fmt::Debug for ProcessorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorStage")
            .field("name", &self.name)
            .finish()
    }
}

/// Ordered list of line processors, fixed once built
#[derive(Debug, Clone)]
pub struct ProcessorChain {
    stages: Vec<ProcessorStage>,
}

impl ProcessorChain {
    /// Create a chain without any stage
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the chain used for `cdk diff` logs
    ///
    /// The order matters: the hash classifier only sees lines the symbol
    /// normalizer already marked with `+` or `-`.
    pub fn cdk_diff() -> Self {
        Self::empty()
            .with_stage("stack-count", extract_stack_count)
            .with_stage("resource-change", extract_resource_change)
            .with_stage("replacement-count", count_replacements)
            .with_stage("diff-symbol", normalize_diff_symbol)
            .with_stage("hash-classifier", classify_hash_change)
    }

    /// Append a stage to the end of the chain
    pub fn with_stage(mut self, name: &'static str, process: LineProcessor) -> Self {
        self.stages.push(ProcessorStage { name, process });
        self
    }

    /// Names of the stages in execution order
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name).collect()
    }

    /// Run every stage on a single line
    pub fn process_line(&self, line: String, state: &mut TransformState) -> String {
        let mut line = line;
        for stage in &self.stages {
            line = (stage.process)(line, state);
        }
        line
    }
}

impl Default for ProcessorChain {
    fn default() -> Self {
        Self::cdk_diff()
    }
}
