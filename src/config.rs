//! Configuration management for turfbook
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TurfbookError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurfbookConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Venue catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Email relay settings
    #[serde(default)]
    pub email: EmailConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for non-API paths
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Maximum accepted request body in KiB
    #[serde(default = "default_body_limit")]
    pub body_limit_kb: u32,
}

/// Venue catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// File path or http(s) URL of the turf catalog
    #[serde(default = "default_catalog_source")]
    pub source: String,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u32,
}

/// Email relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Send through SMTP; when false notifications are only logged
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_smtp_relay")]
    pub smtp_relay: String,
    /// SMTP login, also used as the sender address
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Mailbox receiving every submission
    #[serde(default = "default_recipient")]
    pub recipient: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_body_limit() -> u32 {
    64
}

fn default_catalog_source() -> String {
    "public/turfs.csv".to_string()
}

fn default_fetch_timeout() -> u32 {
    10
}

fn default_smtp_relay() -> String {
    "smtp.gmail.com".to_string()
}

fn default_from_name() -> String {
    "Play Before Retire".to_string()
}

fn default_recipient() -> String {
    "playbeforeretire@gmail.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            request_timeout_seconds: default_request_timeout(),
            body_limit_kb: default_body_limit(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
            fetch_timeout_seconds: default_fetch_timeout(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_relay: default_smtp_relay(),
            username: None,
            password: None,
            from_name: default_from_name(),
            recipient: default_recipient(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TurfbookConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TURFBOOK_EMAIL__PASSWORD -> email.password
        builder = builder.add_source(
            Environment::with_prefix("TURFBOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TurfbookConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("turfbook").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit();
        }
        if self.catalog.source.is_empty() {
            self.catalog.source = default_catalog_source();
        }
        if self.catalog.fetch_timeout_seconds == 0 {
            self.catalog.fetch_timeout_seconds = default_fetch_timeout();
        }
        if self.email.smtp_relay.is_empty() {
            self.email.smtp_relay = default_smtp_relay();
        }
        if self.email.from_name.is_empty() {
            self.email.from_name = default_from_name();
        }
        if self.email.recipient.is_empty() {
            self.email.recipient = default_recipient();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_email()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate email relay credentials and addresses
    pub fn validate_email(&self) -> Result<()> {
        if !self.email.recipient.contains('@') {
            return Err(TurfbookError::config(format!(
                "Email recipient '{}' is not an email address",
                self.email.recipient
            ))
            .into());
        }

        if !self.email.enabled {
            return Ok(());
        }

        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        if !present(&self.email.username) || !present(&self.email.password) {
            return Err(TurfbookError::config(
                "Email username and password are required when email is enabled",
            )
            .into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TurfbookError::config("Server port cannot be 0").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                TurfbookError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.catalog.fetch_timeout_seconds > 300 {
            return Err(
                TurfbookError::config("Catalog fetch timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.body_limit_kb > 10_240 {
            return Err(TurfbookError::config("Body limit cannot exceed 10240 KiB").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TurfbookError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TurfbookError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
