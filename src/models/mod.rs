//! Data models for the Krushi dashboard
//!
//! This module contains the request and response shapes of the advisory
//! backend, organized by concern:
//! - Location: coordinates, reference cities and detection results
//! - Crop: recommendation requests and ranked suggestions
//! - Weather: current conditions and daily forecast
//! - Market: price trends and predictions
//! - Water: irrigation requests and advice

pub mod crop;
pub mod location;
pub mod market;
pub mod water;
pub mod weather;

// Re-export all public types for convenient access
pub use crop::{CropRecommendation, CropRecommendationRequest, CropRecommendations};
pub use location::{
    CityReference, Coordinates, DEFAULT_LOCATION, DetectedLocation, LocationDetails,
    REFERENCE_CITIES,
};
pub use market::{MarketReport, PricePoint, PricePrediction, PriceTrend, TrendDirection};
pub use water::{IrrigationAdvice, ScheduleDay, WaterAdvice, WaterAdviceRequest};
pub use weather::{CurrentWeather, ForecastDay, WeatherReport};
