//! SMTP email transport implementation

use anyhow::Result;
use async_trait::async_trait;
use clap::{ArgAction, Parser};
use lettre::{
    address::AddressError,
    message::{
        header::{HeaderName, HeaderValue},
        Mailbox, MultiPart,
    },
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::{
    email_addresses::{EmailAddress, Recipient},
    mailer::{Mailer, Message, TransportError, REPLY_TO},
};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER", default_value = "")]
    pub username: String,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD", default_value = "")]
    pub password: String,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value_t = true, action = ArgAction::Set)]
    pub verify_tls: bool,

    /// Upgrade the connection with STARTTLS instead of connecting over TLS
    #[clap(long = "smtp-starttls", env = "SMTP_STARTTLS", default_value_t = true, action = ArgAction::Set)]
    pub starttls: bool,
}

/// SMTP mailer
#[derive(Debug, Default, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Build the SMTP transport described by the configuration
    pub fn mailer(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let parameters = TlsParameters::builder(self.config.host.to_string())
            .dangerous_accept_invalid_certs(!self.config.verify_tls)
            .build()?;

        let (relay, tls) = if self.config.starttls {
            (
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?,
                Tls::Required(parameters),
            )
        } else {
            (
                AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?,
                Tls::Wrapper(parameters),
            )
        };

        let relay = relay.port(self.config.port).tls(tls);

        let relay = if self.config.username.is_empty() {
            relay
        } else {
            relay.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
        };

        Ok(relay.build())
    }
}

impl From<AddressError> for TransportError {
    fn from(_err: AddressError) -> Self {
        debug!("AddressError -> TransportError");

        TransportError::InvalidEmail
    }
}

impl From<lettre::error::Error> for TransportError {
    fn from(err: lettre::error::Error) -> Self {
        debug!("lettre::error::Error -> TransportError");

        TransportError::UnknownError(err.into())
    }
}

fn mailbox(name: Option<&str>, address: &EmailAddress) -> Result<Mailbox, TransportError> {
    Ok(Mailbox::new(
        name.map(str::to_string),
        address.as_str().parse()?,
    ))
}

fn recipient_mailbox(recipient: &Recipient) -> Result<Mailbox, TransportError> {
    mailbox(recipient.display_name(), &recipient.address)
}

/// Builds a multipart/alternative lettre message: plaintext first, HTML as the alternative.
///
/// `Reply-To` is sent as an address header, any other header verbatim.
pub fn build_message(message: &Message) -> Result<lettre::Message, TransportError> {
    let mut builder = lettre::Message::builder()
        .from(mailbox(None, &message.from)?)
        .subject(message.subject.clone());

    for recipient in &message.to {
        builder = builder.to(recipient_mailbox(recipient)?);
    }

    for (name, value) in &message.headers {
        builder = if name.eq_ignore_ascii_case(REPLY_TO) {
            builder.reply_to(value.parse::<Mailbox>()?)
        } else {
            let header = HeaderName::new_from_ascii(name.clone())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;

            builder.raw_header(HeaderValue::new(header, value.clone()))
        };
    }

    Ok(builder.multipart(MultiPart::alternative_plain_html(
        message.plain_body.clone(),
        message.html_body.clone(),
    ))?)
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        let email = build_message(message)?;

        match self.mailer()?.send(email).await {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("lettre::transport::smtp::Error -> TransportError");

                Err(TransportError::SendError(e.to_string()))
            }
        }
    }
}
