//! Template rendering module

mod context;
mod errors;
mod renderer;

pub use context::RenderContext;
pub use errors::TemplateError;
pub use renderer::TemplateRenderer;
