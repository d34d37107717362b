use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Implicit TLS (SMTPS) instead of STARTTLS.
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            secure: false,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl SmtpConfig {
    /// Credentials count as configured only when both parts are present.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_target_email")]
    pub target_email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            target_email: default_target_email(),
        }
    }
}

fn default_target_email() -> String {
    "thewebstr25@gmail.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (PORT, SMTP_HOST, ...)
    /// 2. Prefixed environment variables (WEBSTR__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("smtp.host", "localhost")?
            .set_default("smtp.port", 587)?
            .set_default("smtp.secure", false)?
            .set_default("smtp.username", "")?
            .set_default("smtp.password", "")?
            .set_default("contact.target_email", default_target_email())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("WEBSTR")
                .separator("__")
                .try_parsing(true),
        );

        // Legacy environment variables without prefix, kept for parity with
        // the deployment scripts that predate the config file.
        if let Ok(port) = env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(host) = env::var("SMTP_HOST") {
            builder = builder.set_override("smtp.host", host)?;
        }
        if let Ok(port) = env::var("SMTP_PORT") {
            builder = builder.set_override("smtp.port", port)?;
        }
        if let Ok(secure) = env::var("SMTP_SECURE") {
            builder = builder.set_override("smtp.secure", secure == "true")?;
        }
        if let Ok(user) = env::var("SMTP_USER") {
            builder = builder.set_override("smtp.username", user)?;
        }
        if let Ok(pass) = env::var("SMTP_PASS") {
            builder = builder.set_override("smtp.password", pass)?;
        }
        if let Ok(target) = env::var("TARGET_EMAIL") {
            builder = builder.set_override("contact.target_email", target)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.contact.target_email.is_empty() {
            return Err("Contact target email must not be empty".to_string());
        }
        Ok(())
    }
}
