//! Dashboard view controller
//!
//! Owns the page state (form fields, result panels, navigation, notifications)
//! and runs the page-load flow and the four user actions against an
//! [`AdvisoryBackend`]. The page lock is never held across an await, so
//! actions started concurrently interleave freely and whichever completes last
//! owns the panels it writes.

use crate::api::AdvisoryBackend;
use crate::config::KrushiConfig;
use crate::forms::{self, FormFields};
use crate::geolocation::{GeolocationProvider, PositionOptions};
use crate::location_resolver::{LocationResolver, ResolvedLocation};
use crate::models::LocationDetails;
use crate::navigation::{ClickTarget, Handler, Navigator};
use crate::notification::{Notification, NotificationCenter, Severity};
use crate::render::{self, RenderPlan};
use crate::{KrushiError, Result};
use maud::{Markup, html};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// The four user-triggered requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CropRecommendations,
    Weather,
    Market,
    WaterAdvice,
}

impl Action {
    fn success_message(self) -> &'static str {
        match self {
            Action::CropRecommendations => "Crop recommendations generated successfully!",
            Action::Weather => "Weather data loaded successfully!",
            Action::Market => "Market data loaded successfully!",
            Action::WaterAdvice => "Water management advice generated successfully!",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Action::CropRecommendations => "recommendations",
            Action::Weather => "weather data",
            Action::Market => "market data",
            Action::WaterAdvice => "water advice",
        }
    }

    /// User-facing text for a failed action
    #[must_use]
    pub fn failure_message(self, error: &KrushiError) -> String {
        match error {
            KrushiError::Validation { message } => message.clone(),
            KrushiError::Rejected { message } => {
                format!("Error getting {}: {}", self.subject(), message)
            }
            other => format!("Network error: {}", other.message()),
        }
    }
}

/// State carried between actions
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Profile of the location detected by the backend
    pub location_details: Option<LocationDetails>,
}

/// Everything visible on the page
#[derive(Debug)]
pub struct Page {
    pub fields: FormFields,
    pub navigator: Navigator,
    pub notifications: NotificationCenter,
    pub session: SessionState,
    panels: HashMap<&'static str, Markup>,
    visible_results: BTreeSet<&'static str>,
    loading: bool,
}

impl Page {
    #[must_use]
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            fields: FormFields::new(),
            navigator: Navigator::default(),
            notifications: NotificationCenter::new(notification_ttl),
            session: SessionState::default(),
            panels: HashMap::new(),
            visible_results: BTreeSet::new(),
            loading: false,
        }
    }

    /// Replace container contents and reveal the results section
    pub fn apply(&mut self, plan: RenderPlan) {
        for (container, markup) in plan.containers {
            self.panels.insert(container, markup);
        }
        self.visible_results.insert(plan.section);
    }

    /// Raise a notification in the currently active section
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let section = self.navigator.active_section().map(str::to_string);
        self.notifications.push(message, severity, section);
    }

    #[must_use]
    pub fn panel(&self, container: &str) -> Option<&Markup> {
        self.panels.get(container)
    }

    #[must_use]
    pub fn panel_html(&self, container: &str) -> Option<String> {
        self.panel(container).map(|markup| markup.clone().into_string())
    }

    /// The notification area: unexpired notifications, newest first
    pub fn notification_area(&mut self) -> Markup {
        html! {
            @for notification in self.notifications.active() {
                (notification.render())
            }
        }
    }

    #[must_use]
    pub fn is_results_visible(&self, section: &str) -> bool {
        self.visible_results.contains(section)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

pub struct Dashboard<B, G> {
    backend: B,
    geolocation: G,
    position_options: PositionOptions,
    page: Mutex<Page>,
}

impl<B, G> Dashboard<B, G>
where
    B: AdvisoryBackend,
    G: GeolocationProvider,
{
    pub fn new(backend: B, geolocation: G, config: &KrushiConfig) -> Self {
        Self::with_options(
            backend,
            geolocation,
            PositionOptions::from(&config.geolocation),
            config.notifications.ttl(),
        )
    }

    pub fn with_options(
        backend: B,
        geolocation: G,
        position_options: PositionOptions,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            backend,
            geolocation,
            position_options,
            page: Mutex::new(Page::new(notification_ttl)),
        }
    }

    /// Run `f` with the page locked. The page holds no invariants a panic
    /// could break halfway, so a poisoned lock is recovered.
    pub fn with_page<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        let mut page = self.page.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut page)
    }

    pub fn set_field(&self, id: &str, value: impl Into<String>) {
        let value = value.into();
        self.with_page(|page| page.fields.set(id, value));
    }

    pub fn click(&self, target: ClickTarget<'_>) -> Vec<Handler> {
        self.with_page(|page| page.navigator.click(target))
    }

    #[must_use]
    pub fn panel_html(&self, container: &str) -> Option<String> {
        self.with_page(|page| page.panel_html(container))
    }

    /// Notifications that have not expired yet, newest first
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.with_page(|page| page.notifications.active().to_vec())
    }

    #[must_use]
    pub fn notifications_html(&self) -> String {
        self.with_page(|page| page.notification_area().into_string())
    }

    #[must_use]
    pub fn location_details(&self) -> Option<LocationDetails> {
        self.with_page(|page| page.session.location_details.clone())
    }

    /// Page-load flow: resolve the location and pre-fill the forms
    pub async fn on_load(&self) -> ResolvedLocation {
        let resolved =
            LocationResolver::resolve(&self.backend, &self.geolocation, &self.position_options)
                .await;

        info!("Using location {} ({:?})", resolved.location, resolved.source);

        let (message, severity) = resolved.notification();
        self.with_page(|page| {
            page.fields.set_location(&resolved.location);
            if resolved.details.is_some() {
                page.session.location_details = resolved.details.clone();
            }
            page.notify(message, severity);
        });

        resolved
    }

    pub async fn get_crop_recommendations(&self) -> Result<()> {
        let backend = &self.backend;
        self.run(
            Action::CropRecommendations,
            forms::crop_recommendation_request,
            |request| async move { backend.recommend_crops(&request).await },
            render::render_recommendations,
        )
        .await
    }

    pub async fn get_weather(&self) -> Result<()> {
        let backend = &self.backend;
        self.run(
            Action::Weather,
            forms::weather_location,
            |location| async move { backend.weather(&location).await },
            render::render_weather,
        )
        .await
    }

    pub async fn get_market_data(&self) -> Result<()> {
        let backend = &self.backend;
        self.run(
            Action::Market,
            forms::market_crop,
            |crop| async move { backend.market_trends(&crop).await },
            render::render_market,
        )
        .await
    }

    pub async fn get_water_advice(&self) -> Result<()> {
        let backend = &self.backend;
        self.run(
            Action::WaterAdvice,
            forms::water_advice_request,
            |request| async move { backend.water_management(&request).await },
            render::render_water_advice,
        )
        .await
    }

    /// Validate, call, then render or notify
    async fn run<Req, T, Call, Fut>(
        &self,
        action: Action,
        prepare: fn(&FormFields) -> Result<Req>,
        call: Call,
        render: fn(&T) -> RenderPlan,
    ) -> Result<()>
    where
        Call: FnOnce(Req) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let request = self.with_page(|page| match prepare(&page.fields) {
            Ok(request) => {
                page.loading = true;
                Ok(request)
            }
            Err(e) => {
                page.notify(action.failure_message(&e), Severity::Error);
                Err(e)
            }
        });
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                debug!("{:?} rejected before sending: {}", action, e);
                return Err(e);
            }
        };

        let outcome = call(request).await;

        self.with_page(|page| {
            page.loading = false;
            match outcome {
                Ok(response) => {
                    page.apply(render(&response));
                    page.notify(action.success_message(), Severity::Success);
                    Ok(())
                }
                Err(e) => {
                    warn!("{:?} failed: {}", action, e);
                    page.notify(action.failure_message(&e), Severity::Error);
                    Err(e)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::{NoGeolocation, StaticPosition};
    use crate::models::{
        Coordinates, CropRecommendations, DetectedLocation, WaterAdvice, WeatherReport,
    };
    use crate::render::crops::CROP_CARDS;
    use crate::render::market::PRICE_DATA;
    use crate::render::water::{CONSERVATION_TIPS, IRRIGATION_DATA};
    use crate::render::weather::{CURRENT_WEATHER, FORECAST};
    use crate::testing::{
        MockBackend, Reply, crop, current_weather, forecast, irrigation_advice, market_report,
    };

    fn dashboard<G: GeolocationProvider>(
        backend: MockBackend,
        geolocation: G,
    ) -> Dashboard<MockBackend, G> {
        Dashboard::new(backend, geolocation, &KrushiConfig::default())
    }

    fn recommendations(n: usize) -> CropRecommendations {
        CropRecommendations {
            recommendations: (0..n).map(|i| crop(&format!("crop{i}"), 80.0)).collect(),
            weather: Some(current_weather("Delhi")),
            market_trends: HashMap::new(),
        }
    }

    fn fill_crop_form(dashboard: &Dashboard<MockBackend, NoGeolocation>) {
        dashboard.set_field(forms::LOCATION, "Delhi, India");
        dashboard.set_field(forms::SOIL_TYPE, "loamy");
        dashboard.set_field(forms::WATER_AVAILABILITY, "high");
    }

    fn errors(dashboard: &Dashboard<MockBackend, NoGeolocation>) -> Vec<String> {
        dashboard
            .notifications()
            .into_iter()
            .filter(|n| n.severity == Severity::Error)
            .map(|n| n.message)
            .collect()
    }

    #[tokio::test]
    async fn test_on_load_fills_location_fields_and_session() {
        let backend = MockBackend::default().with_detected(DetectedLocation {
            location: "Mumbai, Maharashtra".to_string(),
            details: Some(LocationDetails {
                climate_zone: Some("tropical".to_string()),
                ..LocationDetails::default()
            }),
        });
        let dashboard = dashboard(backend, NoGeolocation);

        dashboard.on_load().await;

        dashboard.with_page(|page| {
            for id in forms::LOCATION_FIELDS {
                assert_eq!(page.fields.value(id), "Mumbai, Maharashtra");
            }
        });
        assert_eq!(
            dashboard.location_details().and_then(|d| d.climate_zone),
            Some("tropical".to_string())
        );
        let notifications = dashboard.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Location detected: Mumbai, Maharashtra");
        assert_eq!(notifications[0].severity, Severity::Success);
        assert_eq!(notifications[0].section.as_deref(), Some("home"));
    }

    #[tokio::test]
    async fn test_on_load_with_geolocation_fallback() {
        let dashboard = dashboard(
            MockBackend::default(),
            StaticPosition(Coordinates::new(22.6, 88.4)),
        );

        let resolved = dashboard.on_load().await;

        assert_eq!(resolved.location, "Kolkata, West Bengal");
        assert!(dashboard.location_details().is_none());
        dashboard.with_page(|page| {
            assert_eq!(page.fields.value(forms::WATER_LOCATION), "Kolkata, West Bengal");
            assert!(page.fields.field(forms::WATER_LOCATION).unwrap().auto_filled);
        });
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let mut backend = MockBackend::default();
        backend.recommendations = Reply::Ok(recommendations(2));
        let dashboard = dashboard(backend, NoGeolocation);
        dashboard.set_field(forms::LOCATION, "Delhi, India");

        let result = dashboard.get_crop_recommendations().await;

        assert!(matches!(result, Err(KrushiError::Validation { .. })));
        assert_eq!(dashboard.backend.call_count(), 0);
        assert_eq!(errors(&dashboard), vec!["Please fill in all required fields"]);
        assert!(!dashboard.with_page(|page| page.is_loading()));
    }

    #[tokio::test]
    async fn test_each_adapter_validates_before_calling() {
        let dashboard = dashboard(MockBackend::default(), NoGeolocation);

        assert!(dashboard.get_weather().await.is_err());
        assert!(dashboard.get_market_data().await.is_err());
        assert!(dashboard.get_water_advice().await.is_err());

        assert_eq!(dashboard.backend.call_count(), 0);
        assert_eq!(
            errors(&dashboard),
            vec![
                "Please fill in all fields",
                "Please select a crop",
                "Please enter a location",
            ]
        );
    }

    #[tokio::test]
    async fn test_recommendations_render_cards() {
        let mut backend = MockBackend::default();
        backend.recommendations = Reply::Ok(recommendations(3));
        let dashboard = dashboard(backend, NoGeolocation);
        fill_crop_form(&dashboard);

        dashboard.get_crop_recommendations().await.unwrap();

        assert_eq!(
            dashboard.backend.recorded(),
            vec![
                r#"POST recommend-crops {"location":"Delhi, India","soil_type":"loamy","water_availability":"high","farm_size":1.0}"#
            ]
        );
        dashboard.with_page(|page| {
            let cards = page.panel_html(CROP_CARDS).unwrap();
            assert_eq!(cards.matches(r#"class="crop-card""#).count(), 3);
            assert_eq!(cards.matches(r#"class="weather-card""#).count(), 1);
            assert!(page.is_results_visible("recommendations-results"));
            assert!(!page.is_loading());
        });
        let notifications = dashboard.notifications();
        assert_eq!(
            notifications[0].message,
            "Crop recommendations generated successfully!"
        );
    }

    #[tokio::test]
    async fn test_rejection_keeps_previous_panel() {
        let mut backend = MockBackend::default();
        backend.weather = Reply::Ok(WeatherReport {
            current: current_weather("Delhi"),
            forecast: forecast(3),
        });
        let dashboard = dashboard(backend, NoGeolocation);
        dashboard.set_field(forms::WEATHER_LOCATION, "Delhi");
        dashboard.get_weather().await.unwrap();
        let before = dashboard.panel_html(CURRENT_WEATHER).unwrap();
        let forecast_before = dashboard.panel_html(FORECAST).unwrap();

        // Swap in a failing backend by rebuilding with the same page state
        let mut failing = MockBackend::default();
        failing.weather = Reply::Rejected("City not found".to_string());
        let page = dashboard.page.into_inner().unwrap();
        let dashboard = Dashboard {
            backend: failing,
            geolocation: NoGeolocation,
            position_options: PositionOptions::default(),
            page: Mutex::new(page),
        };

        let result = dashboard.get_weather().await;

        assert!(matches!(result, Err(KrushiError::Rejected { .. })));
        assert_eq!(dashboard.panel_html(CURRENT_WEATHER).unwrap(), before);
        assert_eq!(dashboard.panel_html(FORECAST).unwrap(), forecast_before);
        assert_eq!(
            errors(&dashboard),
            vec!["Error getting weather data: City not found"]
        );
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let dashboard = dashboard(MockBackend::default(), NoGeolocation);
        dashboard.set_field(forms::MARKET_CROP, "rice");

        let result = dashboard.get_market_data().await;

        assert!(matches!(result, Err(KrushiError::Network { .. })));
        assert_eq!(errors(&dashboard), vec!["Network error: connection refused"]);
        assert!(dashboard.panel_html(PRICE_DATA).is_none());
    }

    #[tokio::test]
    async fn test_water_advice_renders_both_containers() {
        let mut backend = MockBackend::default();
        backend.water = Reply::Ok(WaterAdvice {
            advice: irrigation_advice("rice"),
            forecast: forecast(2),
        });
        let dashboard = dashboard(backend, NoGeolocation);
        dashboard.set_field(forms::WATER_CROP, "rice");
        dashboard.set_field(forms::WATER_SOIL, "clay");
        dashboard.set_field(forms::WATER_LOCATION, "Delhi, India");

        dashboard.get_water_advice().await.unwrap();

        assert!(dashboard.panel_html(IRRIGATION_DATA).unwrap().contains("schedule-grid"));
        assert!(dashboard.panel_html(CONSERVATION_TIPS).unwrap().contains("tips-list"));
    }

    #[tokio::test]
    async fn test_notifications_follow_active_section() {
        let mut backend = MockBackend::default();
        backend.market = Reply::Ok(market_report("rice"));
        let dashboard = dashboard(backend, NoGeolocation);
        dashboard.click(ClickTarget::Link("#market"));
        dashboard.set_field(forms::MARKET_CROP, "rice");

        dashboard.get_market_data().await.unwrap();

        let notifications = dashboard.notifications();
        assert_eq!(notifications[0].section.as_deref(), Some("market"));
    }

    #[tokio::test]
    async fn test_notification_area_lists_newest_first() {
        let dashboard = dashboard(MockBackend::default(), NoGeolocation);
        dashboard.with_page(|page| {
            page.notify("Location detected: Delhi, India", Severity::Success);
            page.notify("Please select a crop", Severity::Error);
        });

        assert_eq!(
            dashboard.notifications_html(),
            concat!(
                r#"<div class="alert alert-error">Please select a crop</div>"#,
                r#"<div class="alert alert-success">Location detected: Delhi, India</div>"#,
            )
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_actions_complete_independently() {
        let mut backend = MockBackend::default();
        backend.weather = Reply::Ok(WeatherReport {
            current: current_weather("Delhi"),
            forecast: forecast(2),
        });
        backend.market = Reply::Ok(market_report("rice"));
        backend.delays.insert("weather", Duration::from_millis(200));
        backend.delays.insert("market", Duration::from_millis(50));
        let dashboard = dashboard(backend, NoGeolocation);
        dashboard.set_field(forms::WEATHER_LOCATION, "Delhi");
        dashboard.set_field(forms::MARKET_CROP, "rice");

        let (weather, market) = tokio::join!(dashboard.get_weather(), dashboard.get_market_data());

        assert!(weather.is_ok());
        assert!(market.is_ok());
        let messages: Vec<String> = dashboard
            .notifications()
            .into_iter()
            .map(|n| n.message)
            .collect();
        // Newest first: the slower weather call finished last
        assert_eq!(
            messages,
            vec![
                "Weather data loaded successfully!",
                "Market data loaded successfully!"
            ]
        );
        assert!(!dashboard.with_page(|page| page.is_loading()));
    }
}
