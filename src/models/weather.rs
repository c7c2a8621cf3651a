//! Weather readings as served by `/api/weather/{location}`

use serde::{Deserialize, Serialize};

/// Current conditions at a location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Location name as resolved by the weather service
    pub location: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Atmospheric pressure in hPa
    #[serde(default)]
    pub pressure: f64,
    /// Human-readable description of weather conditions
    pub weather: String,
    /// Wind speed in m/s
    #[serde(default)]
    pub wind_speed: f64,
    /// Rainfall in mm
    #[serde(default)]
    pub rainfall: f64,
    /// ISO timestamp of the observation
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One day of the multi-day forecast
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
    pub weather: String,
    #[serde(default)]
    pub rainfall: f64,
    #[serde(default)]
    pub wind_speed: f64,
}

/// Payload of a successful weather lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_readings_deserialize() {
        let current: CurrentWeather = serde_json::from_str(
            r#"{"location": "Delhi", "temperature": 32, "humidity": 45, "pressure": 1013,
                "weather": "partly cloudy", "wind_speed": 3.2, "rainfall": 2,
                "timestamp": "2024-06-01T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(current.temperature, 32.0);
        assert_eq!(current.rainfall, 2.0);
    }
}
