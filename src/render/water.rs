//! Irrigation schedule and conservation tips

use super::{RenderPlan, labeled};
use crate::models::{IrrigationAdvice, ScheduleDay, WaterAdvice};
use maud::{Markup, html};

pub const RESULTS_SECTION: &str = "water-results";
pub const IRRIGATION_DATA: &str = "irrigation-data";
pub const CONSERVATION_TIPS: &str = "conservation-tips";

#[must_use]
pub fn render_water_advice(result: &WaterAdvice) -> RenderPlan {
    let advice = &result.advice;
    RenderPlan::new(RESULTS_SECTION)
        .with(IRRIGATION_DATA, irrigation(advice))
        .with(CONSERVATION_TIPS, tips(advice))
}

fn irrigation(advice: &IrrigationAdvice) -> Markup {
    html! {
        div style="margin-bottom: 1rem;" {
            p { (labeled("Crop", &advice.crop)) }
            p { (labeled("Water Requirement", format!("{} mm/season", advice.water_requirement))) }
            p { (labeled("Target Soil Moisture", format!("{}%", advice.soil_moisture_target))) }
        }
        div class="schedule-grid" {
            @for day in &advice.irrigation_schedule {
                (schedule_day(day))
            }
        }
        @if !advice.critical_stages.is_empty() {
            div {
                h4 style="color: #2e7d32; margin-top: 1rem;" { "Critical Growth Stages" }
                p {
                    "Pay special attention to water management during: "
                    (advice.critical_stages.join(", "))
                }
            }
        }
    }
}

fn schedule_day(day: &ScheduleDay) -> Markup {
    let (class, heading) = if day.irrigation_needed {
        ("schedule-day irrigation-needed", "Irrigation Needed")
    } else {
        ("schedule-day", "No Irrigation")
    };

    html! {
        div class=(class) {
            h5 { "Day " (day.day) }
            p { strong { (heading) } }
            @if day.irrigation_needed {
                p { "Amount: " (day.water_amount) "mm" }
            }
            p style="font-size: 0.9rem; color: #666;" { (day.reason) }
        }
    }
}

fn tips(advice: &IrrigationAdvice) -> Markup {
    html! {
        ul class="tips-list" {
            @for tip in &advice.water_conservation_tips {
                li { (tip) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::irrigation_advice;

    fn plan_for(advice: IrrigationAdvice) -> RenderPlan {
        render_water_advice(&WaterAdvice {
            advice,
            forecast: Vec::new(),
        })
    }

    fn plan() -> RenderPlan {
        plan_for(irrigation_advice("rice"))
    }

    #[test]
    fn test_schedule_marks_irrigation_days() {
        let html = plan().container_html(IRRIGATION_DATA).unwrap();
        assert_eq!(html.matches("class=\"schedule-day").count(), 2);
        assert_eq!(html.matches("irrigation-needed").count(), 1);

        assert!(html.contains("<h5>Day 1</h5><p><strong>Irrigation Needed</strong></p><p>Amount: 6.5mm</p>"));
        assert!(html.contains("<h5>Day 2</h5><p><strong>No Irrigation</strong></p><p style="));
        assert!(!html.contains("Amount: 0mm"));
    }

    #[test]
    fn test_summary_and_critical_stages() {
        let html = plan().container_html(IRRIGATION_DATA).unwrap();
        assert!(html.contains("<p><strong>Crop:</strong> rice</p>"));
        assert!(html.contains("<p><strong>Water Requirement:</strong> 1200 mm/season</p>"));
        assert!(html.contains("<p><strong>Target Soil Moisture:</strong> 80%</p>"));
        assert!(html.ends_with(
            "<p>Pay special attention to water management during: tillering, flowering</p></div>"
        ));
    }

    #[test]
    fn test_no_critical_stages_block_when_empty() {
        let mut advice = irrigation_advice("rice");
        advice.critical_stages.clear();
        let html = plan_for(advice).container_html(IRRIGATION_DATA).unwrap();
        assert!(html.ends_with("</div></div>"));
        assert!(!html.contains("Critical Growth Stages"));
    }

    #[test]
    fn test_tips_list() {
        let html = plan().container_html(CONSERVATION_TIPS).unwrap();
        assert_eq!(
            html,
            "<ul class=\"tips-list\"><li>Use mulching to reduce evaporation</li><li>Irrigate early morning</li></ul>"
        );
    }
}
