//! Template renderer

#[cfg(test)]
use mockall::mock;

use super::{RenderContext, TemplateError};

/// Renders a named template against a [`RenderContext`]
pub trait TemplateRenderer: Clone + Send + Sync + 'static {
    /// Render a template
    ///
    /// # Arguments
    /// * `template` - The template identifier, usually a path relative to the template root.
    /// * `context` - The variables available to the template.
    ///
    /// # Returns
    /// The rendered text, or a [`TemplateError`] if the template is missing or fails to render.
    fn render(&self, template: &str, context: &RenderContext) -> Result<String, TemplateError>;
}

#[cfg(test)]
mock! {
    pub TemplateRenderer {}

    impl Clone for TemplateRenderer {
        fn clone(&self) -> Self;
    }

    impl TemplateRenderer for TemplateRenderer {
        fn render(&self, template: &str, context: &RenderContext) -> Result<String, TemplateError>;
    }
}
