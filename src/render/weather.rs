//! Current conditions card and forecast grid

use super::{RenderPlan, labeled};
use crate::models::{CurrentWeather, ForecastDay, WeatherReport};
use chrono::NaiveDate;
use maud::{Markup, html};

pub const RESULTS_SECTION: &str = "weather-results";
pub const CURRENT_WEATHER: &str = "current-weather-data";
pub const FORECAST: &str = "forecast-data";

const GRID_STYLE: &str =
    "display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem;";

#[must_use]
pub fn render_weather(report: &WeatherReport) -> RenderPlan {
    RenderPlan::new(RESULTS_SECTION)
        .with(CURRENT_WEATHER, current_card(&report.current))
        .with(FORECAST, forecast_grid(&report.forecast))
}

fn current_card(current: &CurrentWeather) -> Markup {
    html! {
        div class="weather-card" {
            h4 { (current.location) }
            div style=(GRID_STYLE) {
                div {
                    p { (labeled("Temperature", format!("{}°C", current.temperature))) }
                    p { (labeled("Weather", &current.weather)) }
                }
                div {
                    p { (labeled("Humidity", format!("{}%", current.humidity))) }
                    p { (labeled("Wind Speed", format!("{} m/s", current.wind_speed))) }
                }
                div {
                    p { (labeled("Pressure", format!("{} hPa", current.pressure))) }
                    p { (labeled("Rainfall", format!("{} mm", current.rainfall))) }
                }
            }
        }
    }
}

fn forecast_grid(forecast: &[ForecastDay]) -> Markup {
    html! {
        div class="forecast-grid" {
            @for day in forecast {
                div class="forecast-day" {
                    h5 { (format_day(&day.date)) }
                    p { strong { (day.temperature) "°C" } }
                    p { (day.weather) }
                    p { "💧 " (day.rainfall) "mm" }
                    p { "💨 " (day.wind_speed) "m/s" }
                }
            }
        }
    }
}

/// `2024-01-05` becomes `Fri, Jan 5`
#[must_use]
pub fn format_day(date: &str) -> String {
    date.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map_or_else(
            || "Invalid Date".to_string(),
            |day| day.format("%a, %b %-d").to_string(),
        )
}
