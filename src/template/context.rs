use serde::Serialize;
use std::collections::BTreeMap;

use crate::provider::HEADER_PREFIX;
use crate::transform::{ResourceMetric, TransformState};

/// Name of the template used when nothing else is configured
pub const DEFAULT_TEMPLATE_NAME: &str = "default";

/// Values exposed to comment templates
///
/// Custom templates reference these fields by name, e.g. `{{tag_id}}` or
/// `{{#each changed_resources}}{{@key}}: {{this.count}}{{/each}}`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub tag_id: String,
    pub content: String,
    pub job_link: String,
    pub backticks: String,
    pub header_prefix: String,
    pub collapsible: bool,
    pub show_overview: bool,
    pub number_of_differences: String,
    pub number_of_replacements: usize,
    pub changed_resources: BTreeMap<String, ResourceMetric>,
    pub total_changed_lines: usize,
    pub hash_only_changed_lines: usize,

    /// Name of the built-in template to render
    pub template: String,

    /// Template file path or inline template source, wins over `template`
    #[serde(skip)]
    pub custom_template: Option<String>,
}

impl RenderContext {
    /// Create a context for the given tag id and transformed diff content
    pub fn new(tag_id: &str, content: &str) -> Self {
        Self {
            tag_id: tag_id.to_string(),
            content: content.to_string(),
            job_link: String::new(),
            backticks: "```".to_string(),
            header_prefix: HEADER_PREFIX.to_string(),
            collapsible: false,
            show_overview: false,
            number_of_differences: String::new(),
            number_of_replacements: 0,
            changed_resources: BTreeMap::new(),
            total_changed_lines: 0,
            hash_only_changed_lines: 0,
            template: DEFAULT_TEMPLATE_NAME.to_string(),
            custom_template: None,
        }
    }

    /// Copy the metrics collected by the processor chain
    pub fn with_metrics(mut self, state: &TransformState) -> Self {
        self.number_of_differences = state.number_of_differences_line.clone();
        self.number_of_replacements = state.number_of_replacements;
        self.changed_resources = state.changed_resources_by_type.clone();
        self.total_changed_lines = state.total_changed_lines;
        self.hash_only_changed_lines = state.hash_only_changed_lines;
        self
    }

    /// Set the CI job link shown next to the header
    pub fn with_job_link(mut self, job_link: Option<&str>) -> Self {
        self.job_link = job_link.unwrap_or_default().to_string();
        self
    }

    /// Wrap the diff into a collapsible section
    pub fn with_collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    /// Legacy switch forcing the extended template
    pub fn with_show_overview(mut self, show_overview: bool) -> Self {
        self.show_overview = show_overview;
        self
    }

    /// Select a built-in template by name
    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    /// Use a custom template file or inline template
    pub fn with_custom_template(mut self, custom_template: Option<&str>) -> Self {
        self.custom_template = custom_template
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self
    }
}
