use handlebars::{Handlebars, Helper, HelperResult, Output};

use super::context::RenderContext;
use super::templates::{TemplateKind, TemplateSource, choose_template};
use crate::error::{NotifierError, NotifierResult};
use crate::traits::FileSystem;

/// Renders comment bodies using Handlebars
///
/// The built-in templates are registered once at construction; custom
/// templates are compiled per render.
pub struct CommentRenderer {
    handlebars: Handlebars<'static>,
}

impl CommentRenderer {
    /// Create a renderer with the built-in templates and helpers registered
    pub fn new() -> NotifierResult<Self> {
        let mut handlebars = Handlebars::new();

        // Diff content is markdown, never HTML-escape it
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("eq", Box::new(eq_helper));
        handlebars.register_helper("upper", Box::new(upper_helper));
        handlebars.register_helper("lower", Box::new(lower_helper));

        for kind in TemplateKind::ALL {
            handlebars
                .register_template_string(kind.name(), kind.source())
                .map_err(|e| NotifierError::Template {
                    name: kind.name().to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Render the comment body for a context
    pub fn render(&self, context: &RenderContext, fs: &dyn FileSystem) -> NotifierResult<String> {
        match choose_template(context, fs)? {
            TemplateSource::Named(kind) => self
                .handlebars
                .render(kind.name(), context)
                .map_err(|e| NotifierError::Template {
                    name: kind.name().to_string(),
                    message: e.to_string(),
                }),
            TemplateSource::Custom(source) => self
                .handlebars
                .render_template(&source, context)
                .map_err(|e| NotifierError::Template {
                    name: "custom".to_string(),
                    message: e.to_string(),
                }),
        }
    }
}

/// Helper function for equality comparison
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).map(|v| v.value());
    let param2 = h.param(1).map(|v| v.value());

    if let (Some(p1), Some(p2)) = (param1, param2) {
        if p1 == p2 {
            out.write("true")?;
        }
    }

    Ok(())
}

/// Helper function to uppercase a string
fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(value) = h.param(0).and_then(|v| v.value().as_str()) {
        out.write(&value.to_uppercase())?;
    }

    Ok(())
}

/// Helper function to lowercase a string
fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(value) = h.param(0).and_then(|v| v.value().as_str()) {
        out.write(&value.to_lowercase())?;
    }

    Ok(())
}
