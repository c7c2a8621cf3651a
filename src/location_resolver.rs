//! Location Resolution Module
//!
//! This module produces the location string that pre-fills the dashboard
//! forms. Sources are tried in order: backend detection, device geolocation
//! mapped onto the reference city table, then the fixed default.

use crate::api::AdvisoryBackend;
use crate::geolocation::{self, GeolocationProvider, PositionOptions};
use crate::models::{Coordinates, DEFAULT_LOCATION, LocationDetails, REFERENCE_CITIES};
use crate::notification::Severity;
use tracing::{debug, info};

/// Which path produced the location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Server,
    Geolocation,
    Default,
}

/// Outcome of a resolution run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub location: String,
    pub source: LocationSource,
    /// Backend-supplied profile, only present for [`LocationSource::Server`]
    pub details: Option<LocationDetails>,
}

impl ResolvedLocation {
    /// The notification announcing this result
    #[must_use]
    pub fn notification(&self) -> (String, Severity) {
        match self.source {
            LocationSource::Server => (
                format!("Location detected: {}", self.location),
                Severity::Success,
            ),
            LocationSource::Geolocation => (
                format!("Location detected: {}", self.location),
                Severity::Info,
            ),
            LocationSource::Default => (
                format!("Using default location: {}", self.location),
                Severity::Info,
            ),
        }
    }
}

/// Map a coordinate to the first reference city whose radius contains it.
///
/// This is first match in table order, not nearest match.
#[must_use]
pub fn city_for_coordinates(position: Coordinates) -> &'static str {
    REFERENCE_CITIES
        .iter()
        .find(|city| city.contains(position))
        .map_or(DEFAULT_LOCATION, |city| city.name)
}

/// Service for resolving the user's location
pub struct LocationResolver;

impl LocationResolver {
    /// Run the full resolution chain. Never fails.
    pub async fn resolve<B, G>(
        backend: &B,
        geolocation: &G,
        options: &PositionOptions,
    ) -> ResolvedLocation
    where
        B: AdvisoryBackend + ?Sized,
        G: GeolocationProvider + ?Sized,
    {
        match backend.detect_location().await {
            Ok(detected) => {
                info!("Backend detected location: {}", detected.location);
                return ResolvedLocation {
                    location: detected.location,
                    source: LocationSource::Server,
                    details: detected.details,
                };
            }
            Err(e) => debug!("Server location detection failed: {}", e),
        }

        Self::resolve_from_device(geolocation, options).await
    }

    /// Geolocation step and default fallback
    async fn resolve_from_device<G>(geolocation: &G, options: &PositionOptions) -> ResolvedLocation
    where
        G: GeolocationProvider + ?Sized,
    {
        match geolocation::locate(geolocation, options).await {
            Ok(position) => {
                let location = city_for_coordinates(position);
                debug!(
                    "Mapped position ({}) to {}",
                    position.format_coordinates(),
                    location
                );
                ResolvedLocation {
                    location: location.to_string(),
                    source: LocationSource::Geolocation,
                    details: None,
                }
            }
            Err(e) => {
                debug!("Geolocation failed: {}", e);
                ResolvedLocation {
                    location: DEFAULT_LOCATION.to_string(),
                    source: LocationSource::Default,
                    details: None,
                }
            }
        }
    }
}
