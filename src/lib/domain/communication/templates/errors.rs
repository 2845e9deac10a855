//! Template errors

use thiserror::Error;

/// Errors raised while rendering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template is registered under the requested name
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// The template exists but could not be rendered
    #[error("could not render template {template}: {reason}")]
    RenderError {
        /// The template being rendered
        template: String,

        /// What went wrong
        reason: String,
    },
}
