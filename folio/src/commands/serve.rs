use anyhow::Context;
use folio_config::Config;
use folio_di::Provide;
use folio_email_contracts::EmailService;
use tracing::{error, info};

use crate::{
    email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    config
        .contact
        .recipient_email
        .as_ref()
        .context("RECIPIENT_EMAIL must be set to receive contact form submissions")?;

    let email = email::connect(&config.smtp)?;

    info!("Verifying connection to smtp server");
    tokio::spawn({
        let email = email.clone();
        async move {
            match email.ping().await {
                Ok(()) => info!("SMTP server is ready to send emails"),
                Err(err) => error!("SMTP connection error: {err:#}"),
            }
        }
    });

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, email);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
