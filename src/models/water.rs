//! Irrigation advice request and response shapes

use serde::{Deserialize, Serialize};

use super::weather::ForecastDay;

/// Body of `POST /api/water-management`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WaterAdviceRequest {
    pub crop_type: String,
    pub soil_type: String,
    pub location: String,
}

/// One day of the irrigation plan
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleDay {
    /// 1-based day index
    pub day: u32,
    #[serde(default)]
    pub date: Option<String>,
    pub irrigation_needed: bool,
    /// Water to apply in mm, zero when no irrigation is needed
    #[serde(default)]
    pub water_amount: f64,
    pub reason: String,
}

/// Irrigation advice for a crop
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IrrigationAdvice {
    pub crop: String,
    /// Seasonal requirement in mm
    pub water_requirement: f64,
    pub irrigation_schedule: Vec<ScheduleDay>,
    #[serde(default)]
    pub water_conservation_tips: Vec<String>,
    #[serde(default)]
    pub critical_stages: Vec<String>,
    /// Target soil moisture in percent
    pub soil_moisture_target: f64,
}

/// Payload of a successful water management call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WaterAdvice {
    pub advice: IrrigationAdvice,
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}
