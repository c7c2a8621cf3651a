//! Market price summary and monthly predictions

use super::{RenderPlan, labeled};
use crate::models::{MarketReport, PricePrediction, PriceTrend, TrendDirection};
use maud::{Markup, html};

pub const RESULTS_SECTION: &str = "market-results";
pub const PRICE_DATA: &str = "price-data";
pub const PREDICTION_DATA: &str = "prediction-data";

const SUMMARY_GRID_STYLE: &str =
    "display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem;";
const PREDICTIONS_GRID_STYLE: &str =
    "display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 1rem;";
const ANALYSIS_STYLE: &str =
    "margin-top: 1rem; padding: 1rem; background: #f8f9fa; border-radius: 5px;";

#[must_use]
pub fn render_market(report: &MarketReport) -> RenderPlan {
    RenderPlan::new(RESULTS_SECTION)
        .with(PRICE_DATA, price_card(&report.trends))
        .with(PREDICTION_DATA, predictions_grid(&report.predictions))
}

fn price(value: f64) -> String {
    format!("₹{value}/quintal")
}

/// Arrow badge: `trend-up` / `trend-down` with a matching icon
fn trend_badge(direction: TrendDirection, rising: &str, falling: &str) -> Markup {
    let (class, arrow, label) = if direction.is_up() {
        ("trend-up", "up", rising)
    } else {
        ("trend-down", "down", falling)
    };

    html! {
        div class={ "price-trend " (class) } {
            i class={ "fas fa-arrow-" (arrow) } {}
            span { (label) }
        }
    }
}

fn price_card(trends: &PriceTrend) -> Markup {
    let status = if trends.is_volatile() {
        "High Volatility"
    } else {
        "Stable"
    };

    html! {
        div class="price-card" {
            h4 { (trends.crop.to_uppercase()) " Market Information" }
            div style=(SUMMARY_GRID_STYLE) {
                div {
                    p { (labeled("Current Price", price(trends.current_price))) }
                    (trend_badge(trends.trend_direction, "Rising Trend", "Falling Trend"))
                }
                div {
                    p { (labeled("Volatility", format!("{}%", trends.volatility))) }
                    p { (labeled("Market Status", status)) }
                }
            }
            div style=(ANALYSIS_STYLE) {
                p { (labeled("Market Analysis", &trends.market_analysis)) }
            }
        }
    }
}

fn predictions_grid(predictions: &[PricePrediction]) -> Markup {
    html! {
        div class="predictions-grid" style=(PREDICTIONS_GRID_STYLE) {
            @for prediction in predictions {
                div class="price-card" {
                    h5 { (prediction.month) }
                    p { (labeled("Predicted Price", price(prediction.predicted_price))) }
                    p { (labeled("Confidence", format!("{:.1}%", prediction.confidence))) }
                    (trend_badge(prediction.trend, "Expected Rise", "Expected Fall"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::market_report;

    #[test]
    fn test_price_card_content() {
        let plan = render_market(&market_report("rice"));
        let html = plan.container_html(PRICE_DATA).unwrap();

        assert!(html.contains("<h4>RICE Market Information</h4>"));
        assert!(html.contains("<p><strong>Current Price:</strong> ₹2450.5/quintal</p>"));
        assert!(html.contains(
            r#"<div class="price-trend trend-up"><i class="fas fa-arrow-up"></i><span>Rising Trend</span></div>"#
        ));
        assert!(html.contains("<p><strong>Volatility:</strong> 18.2%</p>"));
        assert!(html.contains("<p><strong>Market Status:</strong> High Volatility</p>"));
        assert!(html.contains("Monsoon patterns drive prices."));
    }

    #[test]
    fn test_falling_stable_market() {
        let mut report = market_report("onion");
        report.trends.trend_direction = TrendDirection::Down;
        report.trends.volatility = 9.0;
        let plan = render_market(&report);
        let html = plan.container_html(PRICE_DATA).unwrap();

        assert!(html.contains("trend-down"));
        assert!(html.contains("fa-arrow-down"));
        assert!(html.contains("Falling Trend"));
        assert!(html.contains("<p><strong>Market Status:</strong> Stable</p>"));
    }

    #[test]
    fn test_prediction_cards() {
        let plan = render_market(&market_report("rice"));
        let html = plan.container_html(PREDICTION_DATA).unwrap();
        assert!(html.starts_with(r#"<div class="predictions-grid""#));
        assert_eq!(html.matches(r#"class="price-card""#).count(), 2);

        assert!(html.contains("<p><strong>Confidence:</strong> 82.5%</p>"));
        assert!(html.contains("<p><strong>Confidence:</strong> 74.0%</p>"));
        assert!(html.contains("Expected Rise"));
        assert!(html.contains("Expected Fall"));
        assert!(html.contains("₹2390.75/quintal"));
    }
}
