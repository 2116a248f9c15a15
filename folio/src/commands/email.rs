use anyhow::ensure;
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{Email, EmailBody, EmailService};
use folio_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
    /// Check whether the SMTP server accepts connections
    Ping,
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
            EmailCommand::Ping => ping(config).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.smtp)?;

    let ok = email_service
        .send(Email {
            sender_name: Some(config.contact.owner_name),
            recipient,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: EmailBody::Text("Email deliverability seems to be working!".into()),
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}

async fn ping(config: Config) -> anyhow::Result<()> {
    let email_service = email::connect(&config.smtp)?;

    let result = email_service.ping().await;
    println!("{}", result.is_ok());

    result
}
