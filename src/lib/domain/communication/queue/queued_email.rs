//! Queued email

use crate::domain::communication::email_addresses::{EmailAddress, Recipient};

use super::Priority;

/// A message handed to a [`MailQueue`](super::MailQueue)
///
/// Extra headers are not carried on the queued path.
#[derive(Clone, Debug, PartialEq)]
pub struct QueuedEmail {
    /// The subject of the email, always a single line
    pub subject: String,

    /// The plain text body
    pub plain_body: String,

    /// The HTML body
    pub html_body: String,

    /// The sender of the email
    pub from: EmailAddress,

    /// The recipients of the email, in order
    pub to: Vec<Recipient>,

    /// Delivery priority
    pub priority: Priority,
}
