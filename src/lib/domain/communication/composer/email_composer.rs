//! Email composer

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::communication::{
    mailer::{Headers, Mailer, Message},
    plaintext::HtmlToText,
    queue::{MailQueue, QueuedEmail},
    sites::{resolve_origin, CurrentSite, RequestMetadata, SiteConfig},
    templates::{RenderContext, TemplateRenderer},
};

use super::{EmailRequest, SendEmailError, Transport, TransportKind};

/// Removes every line break from `text`, joining the lines with no separator.
///
/// Used on subjects so a template can never produce a multi-line header.
pub fn collapse_lines(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                c,
                '\n' | '\r'
                    | '\u{0b}'
                    | '\u{0c}'
                    | '\u{1c}'
                    | '\u{1d}'
                    | '\u{1e}'
                    | '\u{85}'
                    | '\u{2028}'
                    | '\u{2029}'
            )
        })
        .collect()
}

/// A rendered subject and body pair
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedMessage {
    /// Single-line subject
    pub subject: String,

    /// HTML body
    pub html_body: String,

    /// Plaintext body derived from the HTML body
    pub plain_body: String,
}

/// An email ready to be handed to a transport
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedEmail {
    /// The context both templates were rendered against
    pub context: RenderContext,

    /// The headers to send
    pub headers: Headers,

    /// The rendered content
    pub message: RenderedMessage,
}

/// Composes templated emails and hands them to a [`Transport`]
#[derive(Debug, Clone)]
pub struct EmailComposer<R, C, S, M, Q>
where
    R: TemplateRenderer,
    C: HtmlToText,
    S: CurrentSite,
    M: Mailer,
    Q: MailQueue,
{
    renderer: Arc<R>,
    converter: Arc<C>,
    sites: Arc<S>,
    site_config: SiteConfig,
    transport: Transport<M, Q>,
    inline_css: bool,
}

impl<R, C, S, M, Q> EmailComposer<R, C, S, M, Q>
where
    R: TemplateRenderer,
    C: HtmlToText,
    S: CurrentSite,
    M: Mailer,
    Q: MailQueue,
{
    /// Creates a new email composer.
    pub fn new(
        renderer: Arc<R>,
        converter: Arc<C>,
        sites: Arc<S>,
        site_config: SiteConfig,
        transport: Transport<M, Q>,
    ) -> Self {
        Self {
            renderer,
            converter,
            sites,
            site_config,
            transport,
            inline_css: false,
        }
    }

    /// Inline `<style>` rules into the HTML body before it is sent.
    ///
    /// The plaintext body is always derived from the HTML as rendered.
    pub fn with_css_inlining(mut self, inline_css: bool) -> Self {
        self.inline_css = inline_css;
        self
    }

    /// The kind of transport emails are handed to
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Renders an email without sending it.
    ///
    /// # Arguments
    /// * `request` - Metadata about the request that triggered the email, if any.
    /// * `email` - The [`EmailRequest`] to render.
    ///
    /// # Returns
    /// The [`ComposedEmail`], or a [`SendEmailError`] if the site lookup, a template
    /// or CSS inlining failed.
    pub async fn compose(
        &self,
        request: Option<&RequestMetadata>,
        email: &EmailRequest,
    ) -> Result<ComposedEmail, SendEmailError> {
        let headers = email.outgoing_headers();

        let mut context = RenderContext::new();

        if let Some(request) = request {
            context.extend(request.variables.clone());
        }

        context.extend(email.context.clone());

        let origin = resolve_origin(request, &self.site_config, self.sites.as_ref()).await?;

        context.insert("domain", origin.domain);
        context.insert("protocol", origin.protocol);

        let subject = self.renderer.render(&email.subject_template, &context)?;
        let subject = collapse_lines(&subject);

        let html_body = self.renderer.render(&email.body_template, &context)?;
        let plain_body = self.converter.convert(&html_body);

        let html_body = if self.inline_css {
            css_inline::inline(&html_body)?
        } else {
            html_body
        };

        debug!(
            subject_template = %email.subject_template,
            body_template = %email.body_template,
            variables = context.len(),
            "Composed email"
        );

        Ok(ComposedEmail {
            context,
            headers,
            message: RenderedMessage {
                subject,
                html_body,
                plain_body,
            },
        })
    }

    /// Renders an email and hands it to the configured transport.
    ///
    /// Exactly one transport is called, once, and only after rendering succeeded.
    ///
    /// # Arguments
    /// * `request` - Metadata about the request that triggered the email, if any.
    /// * `email` - The [`EmailRequest`] to send.
    ///
    /// # Returns
    /// [`Ok`] once the message has been sent or queued, or the first [`SendEmailError`] hit.
    pub async fn send_email(
        &self,
        request: Option<&RequestMetadata>,
        email: &EmailRequest,
    ) -> Result<(), SendEmailError> {
        let ComposedEmail {
            headers, message, ..
        } = self.compose(request, email).await?;

        match &self.transport {
            Transport::Queued(queue) => {
                let queued = QueuedEmail {
                    subject: message.subject,
                    plain_body: message.plain_body,
                    html_body: message.html_body,
                    from: email.from.clone(),
                    to: email.recipients.clone(),
                    priority: email.priority,
                };

                queue.enqueue(&queued).await?;

                info!(
                    transport = %TransportKind::Queued,
                    priority = %email.priority,
                    recipients = email.recipients.len(),
                    "Queued email"
                );
            }
            Transport::Direct(mailer) => {
                let message = Message {
                    from: email.from.clone(),
                    to: email.recipients.clone(),
                    subject: message.subject,
                    plain_body: message.plain_body,
                    html_body: message.html_body,
                    headers,
                };

                mailer.send(&message).await?;

                info!(
                    transport = %TransportKind::Direct,
                    recipients = email.recipients.len(),
                    "Sent email"
                );
            }
        }

        Ok(())
    }
}
