//! Advisory backend client
//!
//! This module provides the HTTP client for the five `/api/...` endpoints the
//! dashboard consumes. Every endpoint answers with a JSON envelope carrying a
//! `success` flag; failures come back as HTTP 500 with an `error` text, so the
//! body is decoded regardless of the status code.

use crate::config::BackendConfig;
use crate::models::{
    CropRecommendationRequest, CropRecommendations, DetectedLocation, MarketReport, WaterAdvice,
    WaterAdviceRequest, WeatherReport,
};
use crate::{KrushiError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// The backend operations the dashboard depends on
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    /// `GET /api/detect-location`
    async fn detect_location(&self) -> Result<DetectedLocation>;

    /// `POST /api/recommend-crops`
    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> Result<CropRecommendations>;

    /// `GET /api/weather/{location}`
    async fn weather(&self, location: &str) -> Result<WeatherReport>;

    /// `GET /api/market-trends/{crop}`
    async fn market_trends(&self, crop: &str) -> Result<MarketReport>;

    /// `POST /api/water-management`
    async fn water_management(&self, request: &WaterAdviceRequest) -> Result<WaterAdvice>;
}

/// Response envelope shared by every endpoint
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    body: Map<String, Value>,
}

impl Envelope {
    fn into_payload<T: DeserializeOwned>(self) -> Result<T> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(KrushiError::rejected(message));
        }

        serde_json::from_value(Value::Object(self.body))
            .map_err(|e| KrushiError::network(format!("Invalid response payload: {e}")))
    }
}

/// HTTP client for the advisory backend
pub struct AdvisoryApiClient {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl AdvisoryApiClient {
    /// Create a new backend client
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("Krushi/", env!("CARGO_PKG_VERSION")));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let client = builder
            .build()
            .map_err(|e| KrushiError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        let start = Instant::now();
        let response = self.client.get(&url).send().await?;
        Self::decode(response, start).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let start = Instant::now();
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response, start).await
    }

    async fn decode<T: DeserializeOwned>(response: Response, start: Instant) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        let envelope: Envelope = serde_json::from_str(&text).map_err(|e| {
            warn!("Backend answered HTTP {} with a non-JSON body", status);
            KrushiError::network(format!("Unexpected response (HTTP {status}): {e}"))
        })?;

        let elapsed = start.elapsed();
        if envelope.success {
            info!(
                "Backend call succeeded in {:.3}s (HTTP {})",
                elapsed.as_secs_f64(),
                status
            );
        } else {
            warn!(
                "Backend rejected request in {:.3}s (HTTP {}): {:?}",
                elapsed.as_secs_f64(),
                status,
                envelope.error
            );
        }

        envelope.into_payload()
    }
}

#[async_trait]
impl AdvisoryBackend for AdvisoryApiClient {
    #[instrument(skip(self))]
    async fn detect_location(&self) -> Result<DetectedLocation> {
        self.get("detect-location").await
    }

    #[instrument(skip(self), fields(location = %request.location))]
    async fn recommend_crops(
        &self,
        request: &CropRecommendationRequest,
    ) -> Result<CropRecommendations> {
        self.post("recommend-crops", request).await
    }

    #[instrument(skip(self))]
    async fn weather(&self, location: &str) -> Result<WeatherReport> {
        self.get(&format!("weather/{}", urlencoding::encode(location)))
            .await
    }

    #[instrument(skip(self))]
    async fn market_trends(&self, crop: &str) -> Result<MarketReport> {
        self.get(&format!("market-trends/{}", urlencoding::encode(crop)))
            .await
    }

    #[instrument(skip(self), fields(crop = %request.crop_type))]
    async fn water_management(&self, request: &WaterAdviceRequest) -> Result<WaterAdvice> {
        self.post("water-management", request).await
    }
}
