//! In-memory backend and fixtures shared by unit tests

use crate::api::AdvisoryBackend;
use crate::models::{
    CropRecommendation, CropRecommendationRequest, CropRecommendations, CurrentWeather,
    DetectedLocation, ForecastDay, IrrigationAdvice, MarketReport, PricePrediction, PriceTrend,
    ScheduleDay, TrendDirection, WaterAdvice, WaterAdviceRequest, WeatherReport,
};
use crate::{KrushiError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned answer for one endpoint
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Rejected(String),
    Offline,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Rejected(message) => Err(KrushiError::rejected(message.clone())),
            Reply::Offline => Err(KrushiError::network("connection refused")),
        }
    }
}

/// Backend double that records every call
pub struct MockBackend {
    pub detected: Reply<DetectedLocation>,
    pub recommendations: Reply<CropRecommendations>,
    pub weather: Reply<WeatherReport>,
    pub market: Reply<MarketReport>,
    pub water: Reply<WaterAdvice>,
    /// Artificial latency per endpoint name
    pub delays: HashMap<&'static str, Duration>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            detected: Reply::Offline,
            recommendations: Reply::Offline,
            weather: Reply::Offline,
            market: Reply::Offline,
            water: Reply::Offline,
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub fn with_detected(mut self, detected: DetectedLocation) -> Self {
        self.detected = Reply::Ok(detected);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    async fn record(&self, endpoint: &'static str, detail: String) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(detail);
        if let Some(delay) = self.delays.get(endpoint) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl AdvisoryBackend for MockBackend {
    async fn detect_location(&self) -> Result<DetectedLocation> {
        self.record("detect", "GET detect-location".to_string()).await;
        self.detected.get()
    }

    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> Result<CropRecommendations> {
        let body = serde_json::to_string(request).unwrap();
        self.record("recommend", format!("POST recommend-crops {body}"))
            .await;
        self.recommendations.get()
    }

    async fn weather(&self, location: &str) -> Result<WeatherReport> {
        self.record("weather", format!("GET weather/{location}")).await;
        self.weather.get()
    }

    async fn market_trends(&self, crop: &str) -> Result<MarketReport> {
        self.record("market", format!("GET market-trends/{crop}")).await;
        self.market.get()
    }

    async fn water_management(&self, request: &WaterAdviceRequest) -> Result<WaterAdvice> {
        let body = serde_json::to_string(request).unwrap();
        self.record("water", format!("POST water-management {body}"))
            .await;
        self.water.get()
    }
}

pub fn crop(name: &str, confidence: f64) -> CropRecommendation {
    CropRecommendation {
        crop: name.to_string(),
        confidence,
        suitability_score: 80.0,
        season: "kharif".to_string(),
        water_requirement: "high".to_string(),
        market_demand: "high".to_string(),
        location_specific_advice: Vec::new(),
    }
}

pub fn current_weather(location: &str) -> CurrentWeather {
    CurrentWeather {
        location: location.to_string(),
        temperature: 32.0,
        humidity: 45.0,
        pressure: 1013.0,
        weather: "partly cloudy".to_string(),
        wind_speed: 3.2,
        rainfall: 2.0,
        timestamp: None,
    }
}

pub fn forecast(days: usize) -> Vec<ForecastDay> {
    (0..days)
        .map(|i| ForecastDay {
            date: format!("2024-01-{:02}", i + 5),
            temperature: 25.0 + (i % 3) as f64 * 2.0,
            humidity: 60.0,
            weather: "sunny".to_string(),
            rainfall: 0.0,
            wind_speed: 2.5,
        })
        .collect()
}

pub fn market_report(crop: &str) -> MarketReport {
    MarketReport {
        trends: PriceTrend {
            crop: crop.to_string(),
            current_price: 2450.5,
            trend_direction: TrendDirection::Up,
            volatility: 18.2,
            market_analysis: "Monsoon patterns drive prices.".to_string(),
            historical_data: Vec::new(),
        },
        predictions: vec![
            PricePrediction {
                month: "July 2024".to_string(),
                predicted_price: 2510.0,
                confidence: 82.456,
                trend: TrendDirection::Up,
            },
            PricePrediction {
                month: "August 2024".to_string(),
                predicted_price: 2390.75,
                confidence: 74.0,
                trend: TrendDirection::Down,
            },
        ],
    }
}

pub fn irrigation_advice(crop: &str) -> IrrigationAdvice {
    IrrigationAdvice {
        crop: crop.to_string(),
        water_requirement: 1200.0,
        irrigation_schedule: vec![
            ScheduleDay {
                day: 1,
                date: Some("2024-01-05".to_string()),
                irrigation_needed: true,
                water_amount: 6.5,
                reason: "High temperature - increased water requirement".to_string(),
            },
            ScheduleDay {
                day: 2,
                date: Some("2024-01-06".to_string()),
                irrigation_needed: false,
                water_amount: 0.0,
                reason: "No irrigation needed - sufficient rainfall expected".to_string(),
            },
        ],
        water_conservation_tips: vec![
            "Use mulching to reduce evaporation".to_string(),
            "Irrigate early morning".to_string(),
        ],
        critical_stages: vec!["tillering".to_string(), "flowering".to_string()],
        soil_moisture_target: 80.0,
    }
}
