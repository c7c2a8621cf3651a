//! Device geolocation as a single awaitable operation
//!
//! Providers report a position; [`locate`] bounds the request with the
//! configured timeout and folds every failure into [`GeolocationError`].

use crate::config::GeolocationConfig;
use crate::models::Coordinates;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why no position could be obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unavailable,
    #[error("User denied Geolocation")]
    PermissionDenied,
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("Timeout expired")]
    Timeout,
}

/// Options for a position request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub timeout: Duration,
    pub enable_high_accuracy: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            enable_high_accuracy: false,
        }
    }
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            timeout: config.timeout(),
            enable_high_accuracy: config.high_accuracy,
        }
    }
}

/// Source of the device position
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Whether the provider can be asked at all
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError>;
}

/// Request the current position, bounded by `options.timeout`
pub async fn locate<G: GeolocationProvider + ?Sized>(
    provider: &G,
    options: &PositionOptions,
) -> Result<Coordinates, GeolocationError> {
    if !provider.is_available() {
        return Err(GeolocationError::Unavailable);
    }

    debug!(
        "Requesting position (timeout {:?}, high accuracy {})",
        options.timeout, options.enable_high_accuracy
    );

    tokio::time::timeout(options.timeout, provider.current_position(options))
        .await
        .unwrap_or(Err(GeolocationError::Timeout))
}

/// A provider that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct StaticPosition(pub Coordinates);

#[async_trait]
impl GeolocationProvider for StaticPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// A host without geolocation support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationProvider for NoGeolocation {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}

/// Pick a provider from configuration: a fixed position when one is set
#[must_use]
pub fn from_config(config: &GeolocationConfig) -> Box<dyn GeolocationProvider> {
    match config.fixed_position() {
        Some((lat, lon)) => Box::new(StaticPosition(Coordinates::new(lat, lon))),
        None => Box::new(NoGeolocation),
    }
}

#[async_trait]
impl<G: GeolocationProvider + ?Sized> GeolocationProvider for Box<G> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, GeolocationError> {
        (**self).current_position(options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    #[async_trait]
    impl GeolocationProvider for NeverAnswers {
        async fn current_position(
            &self,
            _options: &PositionOptions,
        ) -> Result<Coordinates, GeolocationError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_static_position() {
        let provider = StaticPosition(Coordinates::new(18.52, 73.85));
        let position = locate(&provider, &PositionOptions::default()).await;
        assert_eq!(position, Ok(Coordinates::new(18.52, 73.85)));
    }

    #[tokio::test]
    async fn test_unavailable_provider_is_not_asked() {
        let position = locate(&NoGeolocation, &PositionOptions::default()).await;
        assert_eq!(position, Err(GeolocationError::Unavailable));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_enforced() {
        let position = locate(&NeverAnswers, &PositionOptions::default()).await;
        assert_eq!(position, Err(GeolocationError::Timeout));
    }

    #[test]
    fn test_options_from_config() {
        let options = PositionOptions::from(&GeolocationConfig::default());
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(!options.enable_high_accuracy);
    }

    #[tokio::test]
    async fn test_from_config_uses_fixed_position() {
        let config = GeolocationConfig {
            latitude: Some(13.08),
            longitude: Some(80.27),
            ..GeolocationConfig::default()
        };
        let provider = from_config(&config);
        assert!(provider.is_available());
        let position = locate(&provider, &PositionOptions::default()).await;
        assert_eq!(position, Ok(Coordinates::new(13.08, 80.27)));

        assert!(!from_config(&GeolocationConfig::default()).is_available());
    }
}
