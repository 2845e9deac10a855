#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Renders and sends a templated email from the command line

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::Value;
use templated_mailer::{
    domain::communication::{
        composer::{EmailComposer, EmailRequest, Transport, TransportKind},
        email_addresses::{EmailAddress, Recipient},
        queue::Priority,
        sites::RequestMetadata,
    },
    infrastructure::{
        email::smtp::{SMTPConfig, SMTPMailer},
        plaintext::html2text::{Html2TextConverter, PlaintextConfig},
        queue::memory::InMemoryMailQueue,
        sites::SiteSettings,
        templates::minijinja::{MiniJinjaRenderer, TemplateConfig},
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[clap(about = "Render and send a templated email")]
pub struct Args {
    /// Site defaults used when no request host is given
    #[clap(flatten)]
    pub site: SiteSettings,

    /// SMTP connection details
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// Where templates are loaded from
    #[clap(flatten)]
    pub templates: TemplateConfig,

    /// Plaintext rendering
    #[clap(flatten)]
    pub plaintext: PlaintextConfig,

    /// Transport outgoing email is handed to
    #[clap(long, env = "EMAIL_TRANSPORT", default_value = "direct")]
    pub transport: TransportKind,

    /// How many messages the queued transport holds before rejecting more
    #[clap(long, env = "MAIL_QUEUE_CAPACITY", default_value = "100")]
    pub queue_capacity: usize,

    /// Inline `<style>` rules into the HTML body
    #[clap(long, env = "INLINE_CSS")]
    pub inline_css: bool,

    /// Template rendered into the subject
    #[clap(long)]
    pub subject_template: String,

    /// Template rendered into the HTML body
    #[clap(long)]
    pub body_template: String,

    /// Sender address
    #[clap(long, env = "DEFAULT_FROM_EMAIL")]
    pub from: EmailAddress,

    /// Recipient, either `address` or `Name <address>`; repeatable
    #[clap(long = "to", required = true)]
    pub recipients: Vec<Recipient>,

    /// Delivery priority: high, medium, low or deferred
    #[clap(long, default_value = "medium")]
    pub priority: Priority,

    /// Address replies should go to
    #[clap(long)]
    pub reply_to: Option<EmailAddress>,

    /// Extra header as `Name: value`; repeatable
    #[clap(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Template variable as `key=value`, where value may be JSON; repeatable
    #[clap(long = "var", value_parser = parse_variable)]
    pub variables: Vec<(String, Value)>,

    /// Host of the request that triggered the email
    #[clap(long = "host", id = "request_host")]
    pub request_host: Option<String>,

    /// Whether that request was made over HTTPS
    #[clap(long)]
    pub secure: bool,
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected `Name: value`, got `{raw}`"))?;

    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_variable(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected `key=value`, got `{raw}`"))?;

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    Ok((key.trim().to_string(), value))
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mailer = Arc::new(SMTPMailer::new(args.smtp.clone()));
    let queue = Arc::new(InMemoryMailQueue::new(args.queue_capacity));

    let transport = Transport::from_kind(args.transport, Some(mailer.clone()), Some(queue.clone()))?;

    let composer = EmailComposer::new(
        Arc::new(MiniJinjaRenderer::from(&args.templates)),
        Arc::new(Html2TextConverter::from(&args.plaintext)),
        Arc::new(args.site.current_site()),
        args.site.site_config(),
        transport,
    )
    .with_css_inlining(args.inline_css);

    let request = args
        .request_host
        .as_deref()
        .map(|host| RequestMetadata::new(host, args.secure));

    let mut email = EmailRequest::new(
        args.subject_template,
        args.body_template,
        args.from,
        args.recipients,
    )
    .with_priority(args.priority);

    if let Some(reply_to) = args.reply_to {
        email = email.with_reply_to(reply_to);
    }

    email.headers.extend(args.headers);
    email.context.extend(args.variables);

    composer.send_email(request.as_ref(), &email).await?;

    // The queue dies with this process, so flush it before exiting.
    if composer.transport_kind() == TransportKind::Queued {
        let sent = queue.drain(mailer.as_ref()).await;

        for entry in queue.deferred() {
            warn!(id = %entry.id, subject = %entry.email.subject, "Email left undelivered in the queue");
        }

        info!(sent, "Drained mail queue");
    }

    info!(recipients = email.recipients.len(), "Done");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_header() -> TestResult {
        assert_eq!(
            parse_header("X-Campaign: spring")?,
            ("X-Campaign".to_string(), "spring".to_string())
        );
        assert!(parse_header("no separator").is_err());

        Ok(())
    }

    #[test]
    fn test_parse_variable_accepts_json_or_text() -> TestResult {
        assert_eq!(
            parse_variable("count=3")?,
            ("count".to_string(), serde_json::json!(3))
        );
        assert_eq!(
            parse_variable("name=Alice")?,
            ("name".to_string(), Value::String("Alice".to_string()))
        );

        Ok(())
    }

    #[test]
    fn test_parse_arguments() -> TestResult {
        let args = Args::try_parse_from([
            "send-email",
            "--subject-template",
            "emails/welcome_subject.txt",
            "--body-template",
            "emails/welcome_body.html",
            "--from",
            "a@x.com",
            "--to",
            "Bob <b@x.com>",
            "--to",
            "c@x.com",
            "--priority",
            "high",
            "--transport",
            "queued",
            "--var",
            "name=Alice",
            "--host",
            "example.com",
            "--secure",
            "--smtp-host",
            "mail.example.com",
        ])?;

        assert_eq!(args.recipients.len(), 2);
        assert_eq!(args.priority, Priority::High);
        assert_eq!(args.transport, TransportKind::Queued);
        assert_eq!(args.variables.len(), 1);
        assert_eq!(args.request_host.as_deref(), Some("example.com"));
        assert!(args.secure);
        assert_eq!(args.smtp.host, "mail.example.com");
        assert_eq!(args.queue_capacity, 100);

        Ok(())
    }
}
