//! Market trend and price prediction shapes

use serde::{Deserialize, Serialize};

/// Volatility above which a market is reported as volatile
pub const HIGH_VOLATILITY_THRESHOLD: f64 = 15.0;

/// Direction of a price movement
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    /// Anything the backend sends other than `up`
    #[serde(other)]
    Down,
}

impl TrendDirection {
    #[must_use]
    pub fn is_up(self) -> bool {
        self == TrendDirection::Up
    }
}

/// One historical price observation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub market: Option<String>,
}

/// Current market position of a crop
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PriceTrend {
    pub crop: String,
    /// Price per quintal in rupees
    pub current_price: f64,
    pub trend_direction: TrendDirection,
    /// Volatility in percent
    pub volatility: f64,
    #[serde(default)]
    pub market_analysis: String,
    #[serde(default)]
    pub historical_data: Vec<PricePoint>,
}

impl PriceTrend {
    #[must_use]
    pub fn is_volatile(&self) -> bool {
        self.volatility > HIGH_VOLATILITY_THRESHOLD
    }
}

/// Predicted price for an upcoming month
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricePrediction {
    /// Month label, e.g. `July 2024`
    pub month: String,
    pub predicted_price: f64,
    pub confidence: f64,
    pub trend: TrendDirection,
}

/// Payload of a successful market lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarketReport {
    pub trends: PriceTrend,
    #[serde(default)]
    pub predictions: Vec<PricePrediction>,
}
