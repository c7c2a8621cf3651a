//! Configuration management for the Krushi dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::KrushiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the Krushi dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KrushiConfig {
    /// Advisory backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Browser-style geolocation settings
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Transient notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Advisory backend configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL the `/api/...` paths are appended to
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Request timeout in seconds, unbounded when absent
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Geolocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Upper bound for a position request in seconds
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_seconds: u64,
    /// Whether a high accuracy fix is requested
    #[serde(default)]
    pub high_accuracy: bool,
    /// Fixed latitude reported as the device position
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Fixed longitude reported as the device position
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Seconds before a notification is dismissed
    #[serde(default = "default_notification_ttl")]
    pub ttl_seconds: u64,
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
fn default_backend_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_geolocation_timeout() -> u64 {
    10
}

fn default_notification_ttl() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_geolocation_timeout(),
            high_accuracy: false,
            latitude: None,
            longitude: None,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_notification_ttl(),
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

impl GeolocationConfig {
    /// The configured fixed position, when both coordinates are set
    #[must_use]
    pub fn fixed_position(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl KrushiConfig {
    /// Load configuration from a file and `KRUSHI_*` environment variables.
    /// Without a path the file in the user config directory is used.
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

        // KRUSHI_BACKEND__BASE_URL overrides backend.base_url
        builder = builder.add_source(
            Environment::with_prefix("KRUSHI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: KrushiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("krushi").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.backend.base_url.is_empty() {
            self.backend.base_url = default_backend_base_url();
        }
        if self.geolocation.timeout_seconds == 0 {
            self.geolocation.timeout_seconds = default_geolocation_timeout();
        }
        if self.notifications.ttl_seconds == 0 {
            self.notifications.ttl_seconds = default_notification_ttl();
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
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_position()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if let Some(timeout) = self.backend.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(KrushiError::config(
                    "Backend timeout must be between 1 and 300 seconds",
                )
                .into());
            }
        }

        if self.geolocation.timeout_seconds > 60 {
            return Err(
                KrushiError::config("Geolocation timeout cannot exceed 60 seconds").into(),
            );
        }

        if self.notifications.ttl_seconds > 60 {
            return Err(KrushiError::config(
                "Notification lifetime cannot exceed 60 seconds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(KrushiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(KrushiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(KrushiError::config(
                "Backend base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Validate the fixed geolocation position, if any
    fn validate_position(&self) -> Result<()> {
        match (self.geolocation.latitude, self.geolocation.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(KrushiError::config(format!(
                        "Latitude must be between -90 and 90, got: {lat}"
                    ))
                    .into());
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(KrushiError::config(format!(
                        "Longitude must be between -180 and 180, got: {lon}"
                    ))
                    .into());
                }
                Ok(())
            }
            (None, None) => Ok(()),
            _ => Err(KrushiError::config(
                "Geolocation latitude and longitude must be set together",
            )
            .into()),
        }
    }
}
