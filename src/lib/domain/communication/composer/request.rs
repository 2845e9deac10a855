//! Email request

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::communication::{
    email_addresses::{EmailAddress, Recipient},
    mailer::{Headers, REPLY_TO},
    queue::Priority,
};

/// Everything the caller supplies for a single templated email
#[derive(Clone, Debug, PartialEq)]
pub struct EmailRequest {
    /// Template rendered into the subject line
    pub subject_template: String,

    /// Template rendered into the HTML body
    pub body_template: String,

    /// Sender address
    pub from: EmailAddress,

    /// Recipients, in order
    pub recipients: Vec<Recipient>,

    /// Priority, only used by the queued transport
    pub priority: Priority,

    /// Address replies should go to
    pub reply_to: Option<EmailAddress>,

    /// Extra headers, only used by the direct transport
    pub headers: Headers,

    /// Extra template variables
    pub context: BTreeMap<String, Value>,
}

impl EmailRequest {
    /// Create a request with medium priority, no reply-to, no extra headers and no variables
    pub fn new(
        subject_template: impl Into<String>,
        body_template: impl Into<String>,
        from: EmailAddress,
        recipients: Vec<Recipient>,
    ) -> Self {
        Self {
            subject_template: subject_template.into(),
            body_template: body_template.into(),
            from,
            recipients,
            priority: Priority::default(),
            reply_to: None,
            headers: Headers::new(),
            context: BTreeMap::new(),
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the reply-to address
    pub fn with_reply_to(mut self, reply_to: EmailAddress) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Add an extra header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a template variable
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The headers to send: a copy of [`Self::headers`] with `Reply-To` applied last.
    ///
    /// Any caller header named `Reply-To`, in any case, is replaced by the reply-to address.
    pub fn outgoing_headers(&self) -> Headers {
        let mut headers = self.headers.clone();

        if let Some(reply_to) = &self.reply_to {
            headers.retain(|name, _| !name.eq_ignore_ascii_case(REPLY_TO));
            headers.insert(REPLY_TO.to_string(), reply_to.to_string());
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EmailRequest {
        EmailRequest::new(
            "subj.tpl",
            "body.tpl",
            EmailAddress::new_unchecked("a@x.com"),
            vec![Recipient::new("Bob", EmailAddress::new_unchecked("b@x.com"))],
        )
    }

    #[test]
    fn test_defaults() {
        let request = request();

        assert_eq!(request.priority, Priority::Medium);
        assert!(request.reply_to.is_none());
        assert!(request.outgoing_headers().is_empty());
    }

    #[test]
    fn test_reply_to_is_added_to_outgoing_headers() {
        let request = request()
            .with_header("X-Campaign", "spring")
            .with_reply_to(EmailAddress::new_unchecked("support@x.com"));

        let headers = request.outgoing_headers();

        assert_eq!(headers.get(REPLY_TO).map(String::as_str), Some("support@x.com"));
        assert_eq!(headers.get("X-Campaign").map(String::as_str), Some("spring"));
    }

    #[test]
    fn test_reply_to_replaces_caller_header_of_any_case() {
        let request = request()
            .with_header("reply-to", "attacker@evil.com")
            .with_reply_to(EmailAddress::new_unchecked("support@x.com"));

        let headers = request.outgoing_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(REPLY_TO).map(String::as_str), Some("support@x.com"));
    }

    #[test]
    fn test_caller_headers_are_not_mutated() {
        let request = request()
            .with_header("X-Campaign", "spring")
            .with_reply_to(EmailAddress::new_unchecked("support@x.com"));

        let _ = request.outgoing_headers();
        let _ = request.outgoing_headers();

        assert_eq!(request.headers.len(), 1);
        assert!(!request.headers.contains_key(REPLY_TO));
    }
}
