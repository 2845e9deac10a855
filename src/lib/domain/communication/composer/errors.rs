//! Composer errors

use css_inline::InlineError;
use thiserror::Error;

use crate::domain::communication::{
    mailer::TransportError, queue::QueueError, sites::SiteError, templates::TemplateError,
};

use super::TransportKind;

/// Errors surfaced by [`EmailComposer::send_email`](super::EmailComposer::send_email).
///
/// Collaborator errors are passed through unchanged.
#[derive(Debug, Error)]
pub enum SendEmailError {
    /// The subject or body template failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The current site could not be looked up
    #[error(transparent)]
    Site(#[from] SiteError),

    /// The direct transport failed to send
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The queued transport refused the message
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// CSS could not be inlined into the HTML body
    #[error(transparent)]
    InlineCss(#[from] InlineError),
}

/// Fatal errors in how the composer was wired up
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The queued transport was selected but no queue was provided
    #[error("the {0} transport is configured but no mail queue is available")]
    QueueUnavailable(TransportKind),

    /// The direct transport was selected but no mailer was provided
    #[error("the {0} transport is configured but no mailer is available")]
    MailerUnavailable(TransportKind),
}
