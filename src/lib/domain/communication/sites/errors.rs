//! Site errors

use thiserror::Error;

/// Errors raised while looking up the current site
#[derive(Debug, Error)]
pub enum SiteError {
    /// No current site is configured
    #[error("no current site is configured")]
    NotConfigured,
}
