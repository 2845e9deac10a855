//! MiniJinja template renderer

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use minijinja::{path_loader, Environment, ErrorKind, Value};
use tracing::debug;

use crate::domain::communication::templates::{RenderContext, TemplateError, TemplateRenderer};

/// Template configuration
#[derive(Clone, Debug, Parser)]
pub struct TemplateConfig {
    /// Directory templates are loaded from
    #[clap(long, env = "TEMPLATE_DIR", default_value = "templates")]
    pub template_dir: PathBuf,
}

/// Renders templates with MiniJinja
///
/// HTML autoescaping follows MiniJinja's defaults: on for `.html`, `.htm` and
/// `.xml` templates, off otherwise.
#[derive(Clone, Debug)]
pub struct MiniJinjaRenderer {
    environment: Arc<Environment<'static>>,
}

impl MiniJinjaRenderer {
    /// Load templates lazily from a directory
    pub fn from_directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Loading email templates");

        let mut environment = Environment::new();
        environment.set_loader(path_loader(path));

        Self {
            environment: Arc::new(environment),
        }
    }

    /// Register templates from `(name, source)` pairs
    pub fn from_templates<N, S>(
        templates: impl IntoIterator<Item = (N, S)>,
    ) -> Result<Self, TemplateError>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let mut environment = Environment::new();

        for (name, source) in templates {
            let name = name.into();

            environment
                .add_template_owned(name.clone(), source.into())
                .map_err(|e| template_error(&name, e))?;
        }

        Ok(Self {
            environment: Arc::new(environment),
        })
    }
}

impl From<&TemplateConfig> for MiniJinjaRenderer {
    fn from(config: &TemplateConfig) -> Self {
        Self::from_directory(config.template_dir.clone())
    }
}

fn template_error(template: &str, err: minijinja::Error) -> TemplateError {
    debug!("minijinja::Error -> TemplateError");

    match err.kind() {
        ErrorKind::TemplateNotFound => TemplateError::TemplateNotFound(template.to_string()),
        _ => TemplateError::RenderError {
            template: template.to_string(),
            reason: err.to_string(),
        },
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &RenderContext) -> Result<String, TemplateError> {
        self.environment
            .get_template(template)
            .and_then(|t| t.render(Value::from_serialize(context)))
            .map_err(|e| template_error(template, e))
    }
}
