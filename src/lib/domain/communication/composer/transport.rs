//! Transport selection

use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

use crate::domain::communication::{mailer::Mailer, queue::MailQueue};

use super::ConfigurationError;

/// Which transport outgoing email is handed to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportKind {
    /// Send immediately as a multipart message
    #[default]
    Direct,

    /// Store for asynchronous, priority-ordered delivery
    Queued,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Queued => write!(f, "queued"),
        }
    }
}

/// An unrecognised transport name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transport: {0} (expected `direct` or `queued`)")]
pub struct UnknownTransportKind(String);

impl FromStr for TransportKind {
    type Err = UnknownTransportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "queued" => Ok(Self::Queued),
            _ => Err(UnknownTransportKind(s.to_string())),
        }
    }
}

/// The selected transport
#[derive(Debug, Clone)]
pub enum Transport<M, Q>
where
    M: Mailer,
    Q: MailQueue,
{
    /// Direct delivery through a [`Mailer`]
    Direct(Arc<M>),

    /// Queued delivery through a [`MailQueue`]
    Queued(Arc<Q>),
}

impl<M, Q> Transport<M, Q>
where
    M: Mailer,
    Q: MailQueue,
{
    /// Selects the transport for `kind` from whichever collaborators are available.
    ///
    /// # Returns
    /// The selected [`Transport`], or a [`ConfigurationError`] if the collaborator
    /// that `kind` needs was not provided.
    pub fn from_kind(
        kind: TransportKind,
        mailer: Option<Arc<M>>,
        queue: Option<Arc<Q>>,
    ) -> Result<Self, ConfigurationError> {
        match kind {
            TransportKind::Direct => mailer
                .map(Self::Direct)
                .ok_or(ConfigurationError::MailerUnavailable(kind)),
            TransportKind::Queued => queue
                .map(Self::Queued)
                .ok_or(ConfigurationError::QueueUnavailable(kind)),
        }
    }

    /// The kind of the selected transport
    pub fn kind(&self) -> TransportKind {
        match self {
            Self::Direct(_) => TransportKind::Direct,
            Self::Queued(_) => TransportKind::Queued,
        }
    }
}
