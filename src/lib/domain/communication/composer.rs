//! Email composer module

mod email_composer;
mod errors;
mod request;
mod transport;

pub use email_composer::{collapse_lines, ComposedEmail, EmailComposer, RenderedMessage};
pub use errors::{ConfigurationError, SendEmailError};
pub use request::EmailRequest;
pub use transport::{Transport, TransportKind, UnknownTransportKind};
