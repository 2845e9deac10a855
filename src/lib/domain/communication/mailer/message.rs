//! Email message

use std::collections::BTreeMap;

use crate::domain::communication::email_addresses::{EmailAddress, Recipient};

/// Name of the reply-to header
pub const REPLY_TO: &str = "Reply-To";

/// Extra header names mapped to their values
pub type Headers = BTreeMap<String, String>;

/// A multipart message for a direct transport
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// The sender of the email
    pub from: EmailAddress,

    /// The recipients of the email, in order
    pub to: Vec<Recipient>,

    /// The subject of the email, always a single line
    pub subject: String,

    /// The plain text body, sent as the primary part
    pub plain_body: String,

    /// The HTML body, sent as an alternative part
    pub html_body: String,

    /// Extra headers, including `Reply-To` when set
    pub headers: Headers,
}
