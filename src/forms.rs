//! Form fields and the adapters that turn them into backend requests
//!
//! Fields are addressed by element id. An adapter reads its fields, rejects
//! the action when a required one is empty, and otherwise builds the request.

use crate::models::{CropRecommendationRequest, WaterAdviceRequest};
use crate::{KrushiError, Result};
use std::collections::BTreeMap;

pub const LOCATION: &str = "location";
pub const SOIL_TYPE: &str = "soil-type";
pub const WATER_AVAILABILITY: &str = "water-availability";
pub const FARM_SIZE: &str = "farm-size";
pub const WEATHER_LOCATION: &str = "weather-location";
pub const MARKET_CROP: &str = "market-crop";
pub const WATER_CROP: &str = "water-crop";
pub const WATER_SOIL: &str = "water-soil";
pub const WATER_LOCATION: &str = "water-location";

/// Fields written by location resolution
pub const LOCATION_FIELDS: [&str; 3] = [LOCATION, WEATHER_LOCATION, WATER_LOCATION];

/// Farm size used when the field is empty or unusable
pub const DEFAULT_FARM_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub value: String,
    /// Set when the value was filled in by location detection
    pub auto_filled: bool,
}

/// Current values of the dashboard's inputs
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    fields: BTreeMap<String, Field>,
}

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, empty when it was never set
    #[must_use]
    pub fn value(&self, id: &str) -> &str {
        self.fields.get(id).map_or("", |field| field.value.as_str())
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.get(id)
    }

    /// User input; clears the auto-filled marker
    pub fn set(&mut self, id: &str, value: impl Into<String>) {
        self.fields.insert(
            id.to_string(),
            Field {
                value: value.into(),
                auto_filled: false,
            },
        );
    }

    /// Write a detected location into every location field
    pub fn set_location(&mut self, location: &str) {
        for id in LOCATION_FIELDS {
            self.fields.insert(
                id.to_string(),
                Field {
                    value: location.to_string(),
                    auto_filled: true,
                },
            );
        }
    }

    /// Fail with `message` unless every id has a non-empty value
    fn require(&self, ids: &[&str], message: &str) -> Result<()> {
        if ids.iter().any(|id| self.value(id).is_empty()) {
            return Err(KrushiError::validation(message));
        }
        Ok(())
    }
}

/// Crop recommendation adapter
pub fn crop_recommendation_request(fields: &FormFields) -> Result<CropRecommendationRequest> {
    fields.require(
        &[LOCATION, SOIL_TYPE, WATER_AVAILABILITY],
        "Please fill in all required fields",
    )?;

    Ok(CropRecommendationRequest {
        location: fields.value(LOCATION).to_string(),
        soil_type: fields.value(SOIL_TYPE).to_string(),
        water_availability: fields.value(WATER_AVAILABILITY).to_string(),
        farm_size: farm_size(fields.value(FARM_SIZE)),
    })
}

/// Weather adapter, yields the location path segment
pub fn weather_location(fields: &FormFields) -> Result<String> {
    fields.require(&[WEATHER_LOCATION], "Please enter a location")?;
    Ok(fields.value(WEATHER_LOCATION).to_string())
}

/// Market adapter, yields the crop path segment
pub fn market_crop(fields: &FormFields) -> Result<String> {
    fields.require(&[MARKET_CROP], "Please select a crop")?;
    Ok(fields.value(MARKET_CROP).to_string())
}

/// Water advice adapter
pub fn water_advice_request(fields: &FormFields) -> Result<WaterAdviceRequest> {
    fields.require(
        &[WATER_CROP, WATER_SOIL, WATER_LOCATION],
        "Please fill in all fields",
    )?;

    Ok(WaterAdviceRequest {
        crop_type: fields.value(WATER_CROP).to_string(),
        soil_type: fields.value(WATER_SOIL).to_string(),
        location: fields.value(WATER_LOCATION).to_string(),
    })
}

/// Farm size from raw input. Reads the longest numeric prefix; empty,
/// non-numeric, NaN and zero all become [`DEFAULT_FARM_SIZE`].
#[must_use]
pub fn farm_size(raw: &str) -> f64 {
    match parse_float_prefix(raw) {
        Some(size) if size != 0.0 && !size.is_nan() => size,
        _ => DEFAULT_FARM_SIZE,
    }
}

/// Parse the numeric prefix of `raw` after leading whitespace, e.g. `2.5 acres`
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
