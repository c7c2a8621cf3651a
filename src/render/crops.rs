//! Crop recommendation cards

use super::{RenderPlan, labeled};
use crate::models::{CropRecommendation, CropRecommendations, CurrentWeather};
use maud::{Markup, html};

pub const RESULTS_SECTION: &str = "recommendations-results";
pub const CROP_CARDS: &str = "crop-cards";

const ADVICE_STYLE: &str = "margin-top: 1rem; padding: 0.5rem; background: #fff3cd; border-radius: 5px; font-size: 0.9rem;";

/// One card per crop, then a weather card when weather came along
#[must_use]
pub fn render_recommendations(result: &CropRecommendations) -> RenderPlan {
    let cards = html! {
        @for crop in &result.recommendations {
            (crop_card(crop))
        }
        @if let Some(weather) = &result.weather {
            (weather_card(weather))
        }
    };

    RenderPlan::new(RESULTS_SECTION).with(CROP_CARDS, cards)
}

fn crop_card(crop: &CropRecommendation) -> Markup {
    html! {
        div class="crop-card" {
            h4 { (crop.crop) }
            div class="crop-info" {
                span { (labeled("Confidence", format!("{}%", crop.confidence))) }
                span { (labeled("Season", &crop.season)) }
                span { (labeled("Water Need", &crop.water_requirement)) }
                span { (labeled("Market Demand", &crop.market_demand)) }
            }
            div class="confidence-bar" {
                div class="confidence-fill" style={ "width: " (crop.confidence) "%" } {}
            }
            p { (labeled("Suitability Score", format!("{}/100", crop.suitability_score))) }
            @if !crop.location_specific_advice.is_empty() {
                div style=(ADVICE_STYLE) {
                    strong { "Location Advice:" }
                    br;
                    @for (i, line) in crop.location_specific_advice.iter().enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
            }
        }
    }
}

fn weather_card(weather: &CurrentWeather) -> Markup {
    html! {
        div class="weather-card" {
            h4 { "Current Weather in " (weather.location) }
            p { (labeled("Temperature", format!("{}°C", weather.temperature))) }
            p { (labeled("Humidity", format!("{}%", weather.humidity))) }
            p { (labeled("Weather", &weather.weather)) }
        }
    }
}
