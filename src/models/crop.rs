//! Crop recommendation request and response shapes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::market::PriceTrend;
use super::weather::CurrentWeather;

/// Body of `POST /api/recommend-crops`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CropRecommendationRequest {
    pub location: String,
    pub soil_type: String,
    pub water_availability: String,
    pub farm_size: f64,
}

/// A single ranked crop suggestion
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CropRecommendation {
    pub crop: String,
    /// Confidence in percent
    pub confidence: f64,
    /// Suitability out of 100
    pub suitability_score: f64,
    pub season: String,
    pub water_requirement: String,
    pub market_demand: String,
    #[serde(default)]
    pub location_specific_advice: Vec<String>,
}

/// Payload of a successful recommendation call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CropRecommendations {
    pub recommendations: Vec<CropRecommendation>,
    #[serde(default)]
    pub weather: Option<CurrentWeather>,
    /// Price trends for the top crops, keyed by crop name
    #[serde(default)]
    pub market_trends: HashMap<String, PriceTrend>,
}
