use std::path::Path;

use super::context::RenderContext;
use crate::error::{NotifierError, NotifierResult};
use crate::traits::FileSystem;

/// Header, optional collapsible wrapper and the fenced diff
pub const DEFAULT_TEMPLATE: &str = "
{{header_prefix}} {{tag_id}} {{job_link}}{{#if collapsible}}
<details>
<summary>Click to expand</summary>{{/if}}

{{backticks}}diff
{{content}}
{{backticks}}{{#if collapsible}}
</details>{{/if}}
";

/// Default template plus the stack count and replacement warning
pub const EXTENDED_TEMPLATE: &str = "
{{header_prefix}} {{tag_id}} {{job_link}}
{{number_of_differences}}{{#if number_of_replacements}}
⚠️ Number of resources that require replacement: {{number_of_replacements}}{{/if}}{{#if collapsible}}
<details>
<summary>Click to expand</summary>{{/if}}

{{backticks}}diff
{{content}}
{{backticks}}{{#if collapsible}}
</details>{{/if}}
";

/// Extended template plus one line per changed resource type
pub const EXTENDED_WITH_RESOURCES_TEMPLATE: &str = "
{{header_prefix}} {{tag_id}} {{job_link}}
{{number_of_differences}}{{#if number_of_replacements}}
⚠️ Number of resources that require replacement: {{number_of_replacements}}{{/if}}{{#if changed_resources}}
### Resources that are subject of change{{#each changed_resources}}
{{@key}}: {{this.count}}{{#if this.replaced}} (required replacement){{/if}}{{/each}}{{/if}}{{#if collapsible}}
<details>
<summary>Click to expand</summary>{{/if}}

{{backticks}}diff
{{content}}
{{backticks}}{{#if collapsible}}
</details>{{/if}}
";

/// Built-in comment layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Default,
    Extended,
    ExtendedWithResources,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Default,
        TemplateKind::Extended,
        TemplateKind::ExtendedWithResources,
    ];

    /// Look up a built-in template by its configured name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(TemplateKind::Default),
            "extended" => Some(TemplateKind::Extended),
            "extendedWithResources" => Some(TemplateKind::ExtendedWithResources),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Default => "default",
            TemplateKind::Extended => "extended",
            TemplateKind::ExtendedWithResources => "extendedWithResources",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            TemplateKind::Default => DEFAULT_TEMPLATE,
            TemplateKind::Extended => EXTENDED_TEMPLATE,
            TemplateKind::ExtendedWithResources => EXTENDED_WITH_RESOURCES_TEMPLATE,
        }
    }
}

/// Where the template for a render comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Named(TemplateKind),
    Custom(String),
}

/// Pick the template for a render
///
/// A custom value wins over the named template. If it points to an existing
/// file the file contents are used, otherwise the value itself is the
/// template. `show_overview` forces the extended template and unknown names
/// fall back to the default one.
pub fn choose_template(context: &RenderContext, fs: &dyn FileSystem) -> NotifierResult<TemplateSource> {
    if let Some(custom) = &context.custom_template {
        let path = Path::new(custom);
        if fs.exists(path) {
            tracing::debug!(path = %path.display(), "using custom template file");
            let source =
                fs.read_to_string(path)
                    .map_err(|e| NotifierError::CustomTemplateRead {
                        path: path.to_path_buf(),
                        message: format!("{:#}", e),
                    })?;
            return Ok(TemplateSource::Custom(source));
        }

        tracing::warn!("custom template is not a file, treating it as template source");
        return Ok(TemplateSource::Custom(custom.clone()));
    }

    if context.show_overview {
        tracing::debug!("show overview is set, using extended template");
        return Ok(TemplateSource::Named(TemplateKind::Extended));
    }

    match TemplateKind::from_name(&context.template) {
        Some(kind) => {
            tracing::debug!(template = kind.name(), "using built-in template");
            Ok(TemplateSource::Named(kind))
        }
        None => {
            tracing::warn!(
                template = %context.template,
                "unknown template, falling back to default"
            );
            Ok(TemplateSource::Named(TemplateKind::Default))
        }
    }
}
