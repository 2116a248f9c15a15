use std::{fmt, net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use folio_models::email_address::EmailAddress;
use serde::Deserialize;

mod duration;

/// Built-in defaults, layered below every other source.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Environment variable holding additional config files, separated like `PATH`.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG";

/// Environment variables that override individual config keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "http.port"),
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.user"),
    ("SMTP_PASSWORD", "smtp.password"),
    ("SMTP_TIMEOUT", "smtp.timeout"),
    ("RECIPIENT_EMAIL", "contact.recipient_email"),
    ("OWNER_NAME", "contact.owner_name"),
];

/// Environment variables that enable a flag if and only if set to `true`.
const ENV_FLAGS: &[(&str, &str)] = &[
    ("SMTP_SECURE", "smtp.secure"),
    ("AUTO_REPLY_ENABLED", "contact.auto_reply_enabled"),
];

/// Load the config from the defaults, the files listed in [`CONFIG_PATHS_ENV`]
/// and the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATHS_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();

    load_from(&paths, |key| std::env::var(key).ok())
}

/// Same as [`load`], with explicit config files and environment lookup.
pub fn load_from(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let lookup = |var: &str| env(var).filter(|value| !value.is_empty());

    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            builder.set_override_option(key, lookup(var))
        })?;

    let builder = ENV_FLAGS.iter().try_fold(builder, |builder, &(var, key)| {
        builder.set_override_option(key, lookup(var).map(|value| value == "true"))
    })?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub smtp: SmtpConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub secure: bool,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient_email: Option<EmailAddress>,
    pub auto_reply_enabled: bool,
    pub owner_name: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("secure", &self.secure)
            .field("timeout", &self.timeout)
            .finish()
    }
}
