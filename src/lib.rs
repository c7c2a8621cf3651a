//! `Krushi` - Agricultural advisory dashboard
//!
//! This library provides the view layer of the advisory dashboard: location
//! resolution, form adapters, result rendering and section navigation on top
//! of the advisory backend's JSON API.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod geolocation;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod notification;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types for public API
pub use api::{AdvisoryApiClient, AdvisoryBackend};
pub use config::KrushiConfig;
pub use dashboard::{Action, Dashboard, Page};
pub use error::KrushiError;
pub use geolocation::{GeolocationProvider, PositionOptions};
pub use location_resolver::{LocationResolver, LocationSource, ResolvedLocation};
pub use navigation::{ClickTarget, Navigator};
pub use notification::{Notification, NotificationCenter, Severity};
pub use render::RenderPlan;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, KrushiError>;
