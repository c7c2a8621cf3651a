//! Render instructions for the result panels
//!
//! Renderers are pure: they turn a typed backend response into a
//! [`RenderPlan`], one escaped [`Markup`] fragment per container it replaces.
//! Applying a plan to the page is the dashboard's job.

pub mod crops;
pub mod market;
pub mod water;
pub mod weather;

pub use crops::render_recommendations;
pub use market::render_market;
pub use water::render_water_advice;
pub use weather::render_weather;

use maud::{Markup, Render, html};

/// Replacement content for the containers of one results section
#[derive(Debug, Clone)]
pub struct RenderPlan {
    /// Results section made visible when the plan is applied
    pub section: &'static str,
    /// Container id and its new content
    pub containers: Vec<(&'static str, Markup)>,
}

impl RenderPlan {
    #[must_use]
    pub fn new(section: &'static str) -> Self {
        Self {
            section,
            containers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, container: &'static str, content: Markup) -> Self {
        self.containers.push((container, content));
        self
    }

    #[must_use]
    pub fn container(&self, id: &str) -> Option<&Markup> {
        self.containers
            .iter()
            .find(|(container, _)| *container == id)
            .map(|(_, markup)| markup)
    }

    /// Serialized content of one container
    #[must_use]
    pub fn container_html(&self, id: &str) -> Option<String> {
        self.container(id).map(|markup| markup.clone().into_string())
    }
}

/// `<strong>{label}:</strong> {value}`, wrapped by the caller
pub(crate) fn labeled(label: &str, value: impl Render) -> Markup {
    html! {
        strong { (label) ":" }
        " " (value)
    }
}
