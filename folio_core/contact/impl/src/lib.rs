use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use folio_di::Build;
use folio_email_contracts::{Email, EmailBody, EmailService};
use folio_models::{
    contact::{ContactMessage, ContactSubmission},
    email_address::EmailAddress,
};
use folio_templates_contracts::{
    AutoReplyTemplate, ContactNotificationTemplate, RenderedTemplate, TemplateService,
};
use tracing::{error, info, warn};

pub use validate::validate;

mod validate;

pub const AUTO_REPLY_SUBJECT: &str = "Thank you for your message!";

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Mailbox receiving the notifications.
    pub recipient: Option<Arc<EmailAddress>>,
    pub auto_reply_enabled: bool,
    /// Display name of the site owner, used as sender of the auto-reply.
    pub owner_name: Arc<str>,
    /// Upper bound for every single send.
    pub send_timeout: Duration,
}

/// Result of the best-effort auto-reply step.
#[must_use]
#[derive(Debug)]
enum AutoReplyOutcome {
    Disabled,
    Sent,
    Failed(anyhow::Error),
}

impl<EmailS, Template> ContactFeatureService for ContactFeatureServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactSubmitError> {
        let message = validate(submission)?;

        let recipient = self
            .config
            .recipient
            .as_deref()
            .cloned()
            .ok_or(ContactSubmitError::RecipientNotConfigured)?;

        let result = match self.notification(&message, recipient) {
            Ok(notification) => self.deliver(notification).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            error!("Failed to send contact notification: {err:#}");
            return Err(ContactSubmitError::Send);
        }
        info!("Contact notification sent");

        match self.send_auto_reply(&message).await {
            AutoReplyOutcome::Disabled => {}
            AutoReplyOutcome::Sent => {
                info!(recipient = %message.author.email, "Auto-reply sent");
            }
            AutoReplyOutcome::Failed(err) => {
                warn!(recipient = %message.author.email, "Failed to send auto-reply: {err:#}");
            }
        }

        Ok(())
    }
}

impl<EmailS, Template> ContactFeatureServiceImpl<EmailS, Template>
where
    EmailS: EmailService,
    Template: TemplateService,
{
    fn notification(
        &self,
        message: &ContactMessage,
        recipient: EmailAddress,
    ) -> anyhow::Result<Email> {
        let subject = message.effective_subject();

        let RenderedTemplate { text, html } = self.template.render(&ContactNotificationTemplate {
            name: message.author.name.to_string(),
            email: message.author.email.to_string(),
            subject: subject.into(),
            message: message.content.to_string(),
        })?;

        Ok(Email {
            sender_name: Some(message.author.name.to_string()),
            recipient: recipient.into(),
            reply_to: Some(message.author.email.clone().into()),
            subject: format!("Contact Form: {subject}"),
            body: EmailBody::Alternative { text, html },
        })
    }

    fn auto_reply(&self, message: &ContactMessage) -> anyhow::Result<Email> {
        let RenderedTemplate { text, html } = self.template.render(&AutoReplyTemplate {
            name: message.author.name.to_string(),
            owner_name: self.config.owner_name.to_string(),
        })?;

        Ok(Email {
            sender_name: Some(self.config.owner_name.to_string()),
            recipient: message.author.email.clone().into(),
            reply_to: None,
            subject: AUTO_REPLY_SUBJECT.into(),
            body: EmailBody::Alternative { text, html },
        })
    }

    async fn send_auto_reply(&self, message: &ContactMessage) -> AutoReplyOutcome {
        if !self.config.auto_reply_enabled {
            return AutoReplyOutcome::Disabled;
        }

        let result = match self.auto_reply(message) {
            Ok(email) => self.deliver(email).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => AutoReplyOutcome::Sent,
            Err(err) => AutoReplyOutcome::Failed(err),
        }
    }

    async fn deliver(&self, email: Email) -> anyhow::Result<()> {
        let timeout = self.config.send_timeout;
        match tokio::time::timeout(timeout, self.email.send(email)).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(anyhow!("The smtp relay rejected the message")),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(anyhow!("Sending timed out after {timeout:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core_contact_contracts::ContactValidationError;
    use folio_email_contracts::MockEmailService;
    use folio_models::contact::DEFAULT_SUBJECT;
    use folio_templates_contracts::MockTemplateService;
    use folio_utils::assert_matches;

    use super::*;

    fn config(auto_reply_enabled: bool) -> ContactFeatureConfig {
        ContactFeatureConfig {
            recipient: Some(Arc::new("owner@example.com".parse().unwrap())),
            auto_reply_enabled,
            owner_name: "Sam".into(),
            send_timeout: Duration::from_secs(10),
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            subject: Some("Hello".into()),
            message: "This is a test message.".into(),
        }
    }

    fn notification_template() -> ContactNotificationTemplate {
        ContactNotificationTemplate {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            subject: "Hello".into(),
            message: "This is a test message.".into(),
        }
    }

    fn auto_reply_template() -> AutoReplyTemplate {
        AutoReplyTemplate {
            name: "Jane Doe".into(),
            owner_name: "Sam".into(),
        }
    }

    fn rendered(name: &str) -> RenderedTemplate {
        RenderedTemplate {
            text: format!("{name} text"),
            html: format!("<p>{name} html</p>"),
        }
    }

    fn notification_email() -> Email {
        Email {
            sender_name: Some("Jane Doe".into()),
            recipient: "owner@example.com".parse().unwrap(),
            reply_to: Some("jane@example.com".parse().unwrap()),
            subject: "Contact Form: Hello".into(),
            body: EmailBody::Alternative {
                text: "notification text".into(),
                html: "<p>notification html</p>".into(),
            },
        }
    }

    fn auto_reply_email() -> Email {
        Email {
            sender_name: Some("Sam".into()),
            recipient: "jane@example.com".parse().unwrap(),
            reply_to: None,
            subject: "Thank you for your message!".into(),
            body: EmailBody::Alternative {
                text: "auto reply text".into(),
                html: "<p>auto reply html</p>".into(),
            },
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"));
        let email = MockEmailService::new().with_send(notification_email(), true);

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(false),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_with_auto_reply() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"))
            .with_render(auto_reply_template(), rendered("auto reply"));
        let email = MockEmailService::new()
            .with_send(notification_email(), true)
            .with_send(auto_reply_email(), true);

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_default_subject() {
        // Arrange
        let template = MockTemplateService::new().with_render(
            ContactNotificationTemplate {
                subject: DEFAULT_SUBJECT.into(),
                ..notification_template()
            },
            rendered("notification"),
        );
        let email = MockEmailService::new().with_send(
            Email {
                subject: "Contact Form: New Contact Form Submission".into(),
                ..notification_email()
            },
            true,
        );

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(false),
        };

        // Act
        let result = sut
            .submit(ContactSubmission {
                subject: None,
                ..submission()
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_trimmed() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"));
        let email = MockEmailService::new().with_send(notification_email(), true);

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(false),
        };

        // Act
        let result = sut
            .submit(ContactSubmission {
                name: " Jane Doe ".into(),
                email: "jane@example.com\n".into(),
                subject: Some("  Hello".into()),
                message: "This is a test message.\n\n".into(),
            })
            .await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn invalid() {
        for (submission, expected) in [
            (
                ContactSubmission {
                    name: "J".into(),
                    ..submission()
                },
                ContactValidationError::Name,
            ),
            (
                ContactSubmission {
                    email: "jane@example".into(),
                    ..submission()
                },
                ContactValidationError::Email,
            ),
            (
                ContactSubmission {
                    subject: Some("Hi".into()),
                    ..submission()
                },
                ContactValidationError::Subject,
            ),
            (
                ContactSubmission {
                    message: "Too short".into(),
                    ..submission()
                },
                ContactValidationError::Message,
            ),
        ] {
            // Arrange
            let sut = ContactFeatureServiceImpl {
                email: MockEmailService::new(),
                template: MockTemplateService::new(),
                config: config(true),
            };

            // Act
            let result = sut.submit(submission).await;

            // Assert
            assert_matches!(result, Err(ContactSubmitError::Invalid(err)) if *err == expected);
        }
    }

    #[tokio::test]
    async fn multiline_name_is_rejected() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            template: MockTemplateService::new(),
            config: config(true),
        };

        // Act
        let result = sut
            .submit(ContactSubmission {
                name: "Jane\nDoe".into(),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Invalid(ContactValidationError::Name))
        );
    }

    #[tokio::test]
    async fn recipient_not_configured() {
        // Arrange
        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            template: MockTemplateService::new(),
            config: ContactFeatureConfig {
                recipient: None,
                ..config(true)
            },
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::RecipientNotConfigured));
    }

    #[tokio::test]
    async fn notification_rejected() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"));
        let email = MockEmailService::new().with_send(notification_email(), false);

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send));
    }

    #[tokio::test]
    async fn notification_error() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"));
        let email = MockEmailService::new().with_send_error(notification_email());

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send));
        assert_eq!(
            ContactSubmitError::Send.to_string(),
            "Failed to send email. Please try again later."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn notification_timeout() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"));
        let email = MockEmailService::new().with_send_hanging(notification_email());

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send));
    }

    #[tokio::test]
    async fn notification_render_error() {
        // Arrange
        let mut template = MockTemplateService::new();
        template
            .expect_render::<ContactNotificationTemplate>()
            .once()
            .return_once(|_| Err(anyhow!("template error")));

        let sut = ContactFeatureServiceImpl {
            email: MockEmailService::new(),
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send));
    }

    #[tokio::test]
    async fn auto_reply_error_is_ignored() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"))
            .with_render(auto_reply_template(), rendered("auto reply"));
        let email = MockEmailService::new()
            .with_send(notification_email(), true)
            .with_send_error(auto_reply_email());

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn auto_reply_rejected_is_ignored() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"))
            .with_render(auto_reply_template(), rendered("auto reply"));
        let email = MockEmailService::new()
            .with_send(notification_email(), true)
            .with_send(auto_reply_email(), false);

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn auto_reply_timeout_is_ignored() {
        // Arrange
        let template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"))
            .with_render(auto_reply_template(), rendered("auto reply"));
        let email = MockEmailService::new()
            .with_send(notification_email(), true)
            .with_send_hanging(auto_reply_email());

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn auto_reply_render_error_is_ignored() {
        // Arrange
        let mut template = MockTemplateService::new()
            .with_render(notification_template(), rendered("notification"));
        template
            .expect_render::<AutoReplyTemplate>()
            .once()
            .return_once(|_| Err(anyhow!("template error")));
        let email = MockEmailService::new().with_send(notification_email(), true);

        let sut = ContactFeatureServiceImpl {
            email,
            template,
            config: config(true),
        };

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        result.unwrap();
    }
}
