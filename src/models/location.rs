//! Location model for coordinates, reference cities and detection results

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Location used when neither detection path produces one
pub const DEFAULT_LOCATION: &str = "Delhi, India";

/// Reference cities in lookup order. Lookup takes the first entry whose
/// radius contains the coordinate, so order is significant.
pub const REFERENCE_CITIES: [CityReference; 7] = [
    CityReference::new("Mumbai, Maharashtra", 19.0760, 72.8777, 1.0),
    CityReference::new("Delhi, India", 28.7041, 77.1025, 1.0),
    CityReference::new("Bangalore, Karnataka", 12.9716, 77.5946, 1.0),
    CityReference::new("Chennai, Tamil Nadu", 13.0827, 80.2707, 1.0),
    CityReference::new("Kolkata, West Bengal", 22.5726, 88.3639, 1.0),
    CityReference::new("Pune, Maharashtra", 18.5204, 73.8567, 1.0),
    CityReference::new("Hyderabad, Telangana", 17.3850, 78.4867, 1.0),
];

/// A position reported by a geolocation provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A fixed (name, latitude, longitude, radius) lookup entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityReference {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Match radius in plain degrees
    pub match_radius: f64,
}

impl CityReference {
    #[must_use]
    pub const fn new(name: &'static str, latitude: f64, longitude: f64, match_radius: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
            match_radius,
        }
    }

    /// Planar distance in degrees, not a great-circle distance
    #[must_use]
    pub fn distance_to(&self, position: Coordinates) -> f64 {
        ((position.latitude - self.latitude).powi(2)
            + (position.longitude - self.longitude).powi(2))
        .sqrt()
    }

    #[must_use]
    pub fn contains(&self, position: Coordinates) -> bool {
        self.distance_to(position) < self.match_radius
    }
}

/// Agricultural profile of a detected location, as supplied by the backend.
///
/// The profile is informational, so a field of an unexpected shape
/// (`"avg_rainfall": "700mm"`, `"soil_types": null`) decodes to its default
/// instead of failing the whole detection result.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LocationDetails {
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub climate_zone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub avg_temperature: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub avg_rainfall: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub soil_types: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub major_crops: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub agricultural_season: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub water_sources: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub farming_challenges: Vec<String>,
}

/// Payload of a successful `/api/detect-location` call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetectedLocation {
    pub location: String,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<LocationDetails>,
}

/// Decode `T`, or its default when the value has some other shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
