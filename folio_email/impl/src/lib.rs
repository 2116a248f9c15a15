use std::time::Duration;

use anyhow::{anyhow, Context};
use folio_email_contracts::{Email, EmailBody, EmailService};
use folio_models::email_address::EmailAddress;
use folio_utils::Apply;
use lettre::{
    message::{header::ContentType, Mailbox, MessageBuilder, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

/// Connection settings of the smtp relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Use implicit TLS instead of opportunistic STARTTLS.
    pub secure: bool,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Configure the transport. The connection itself is established lazily
    /// and pooled, so this never touches the network.
    pub fn new(settings: SmtpSettings) -> anyhow::Result<Self> {
        let from = settings
            .user
            .parse()
            .context("The smtp user is not a valid sender address")?;

        let tls_parameters = TlsParameters::new(settings.host.clone())
            .context("Failed to build tls parameters")?;
        let tls = if settings.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        debug!(host = %settings.host, port = settings.port, secure = settings.secure, "configuring smtp transport");

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(settings.user, settings.password))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        Self::new(SmtpSettings {
            host: "localhost".into(),
            port: 25,
            user: "dummy@example.com".into(),
            password: "dummy".into(),
            secure: false,
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    fn message(&self, email: Email) -> anyhow::Result<Message> {
        let from = Mailbox::new(email.sender_name, self.from.clone().into_inner());

        let builder = Message::builder()
            .from(from)
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject);

        let message = match email.body {
            EmailBody::Text(text) => builder.header(ContentType::TEXT_PLAIN).body(text),
            EmailBody::Alternative { text, html } => {
                builder.multipart(MultiPart::alternative_plain_html(text, html))
            }
        };

        message.context("Failed to build email message")
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
