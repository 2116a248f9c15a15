use anyhow::Context;
use folio_config::SmtpConfig;
use folio_email_impl::{EmailServiceImpl, SmtpSettings};

/// Configure the SMTP transport
pub fn connect(config: &SmtpConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(SmtpSettings {
        host: config.host.clone(),
        port: config.port,
        user: config.user.clone(),
        password: config.password.clone(),
        secure: config.secure,
        timeout: config.timeout.into(),
    })
    .context("Failed to configure SMTP transport")
}
