//! Section navigation
//!
//! Exactly one section is shown at a time. Nav links switch sections
//! directly; feature cards and their buttons forward to the nav link that
//! targets the card's section.

use tracing::debug;

/// Sections of the dashboard, in nav order
pub const DEFAULT_SECTIONS: [&str; 5] = ["home", "crops", "weather", "market", "water"];

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget<'a> {
    /// A nav link by its `href`, e.g. `#weather`
    Link(&'a str),
    /// The body of the feature card at this index
    Card(usize),
    /// The button embedded in the feature card at this index
    CardButton(usize),
}

/// A handler that ran while dispatching a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    Link(String),
    Card(usize),
    CardButton(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCard {
    /// Section named by the card's `data-section`
    pub section: Option<String>,
    pub has_button: bool,
}

impl FeatureCard {
    #[must_use]
    pub fn new(section: &str) -> Self {
        Self {
            section: Some(section.to_string()),
            has_button: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    sections: Vec<String>,
    links: Vec<String>,
    cards: Vec<FeatureCard>,
    active_link: Option<String>,
    active_section: Option<String>,
}

impl Default for Navigator {
    /// The standard layout: one link per section, one card per feature
    /// section, starting on `home`
    fn default() -> Self {
        let cards = DEFAULT_SECTIONS[1..]
            .iter()
            .map(|section| FeatureCard::new(section))
            .collect();
        let mut navigator = Self::new(&DEFAULT_SECTIONS, cards);
        navigator.activate_initial("home");
        navigator
    }
}

impl Navigator {
    /// One nav link per section, nothing active
    #[must_use]
    pub fn new(sections: &[&str], cards: Vec<FeatureCard>) -> Self {
        Self {
            sections: sections.iter().map(|s| (*s).to_string()).collect(),
            links: sections.iter().map(|s| format!("#{s}")).collect(),
            cards,
            active_link: None,
            active_section: None,
        }
    }

    /// Add a nav link whose target may not exist
    pub fn add_link(&mut self, href: &str) {
        self.links.push(href.to_string());
    }

    /// Mark a section active as the markup would before any click
    pub fn activate_initial(&mut self, section: &str) {
        if self.sections.iter().any(|s| s == section) {
            self.active_section = Some(section.to_string());
            self.active_link = Some(format!("#{section}"));
        }
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    #[must_use]
    pub fn active_link(&self) -> Option<&str> {
        self.active_link.as_deref()
    }

    #[must_use]
    pub fn is_active(&self, section: &str) -> bool {
        self.active_section() == Some(section)
    }

    /// Dispatch a click and return the handlers that ran, in order
    pub fn click(&mut self, target: ClickTarget<'_>) -> Vec<Handler> {
        let mut fired = Vec::new();
        match target {
            ClickTarget::Link(href) => self.click_link(href, &mut fired),
            ClickTarget::Card(index) => {
                if let Some(card) = self.cards.get(index) {
                    fired.push(Handler::Card(index));
                    let section = card.section.clone();
                    self.forward(section.as_deref(), &mut fired);
                }
            }
            ClickTarget::CardButton(index) => {
                // The button swallows the click, the card handler never runs
                if let Some(card) = self.cards.get(index).filter(|card| card.has_button) {
                    fired.push(Handler::CardButton(index));
                    let section = card.section.clone();
                    self.forward(section.as_deref(), &mut fired);
                }
            }
        }
        fired
    }

    fn forward(&mut self, section: Option<&str>, fired: &mut Vec<Handler>) {
        if let Some(section) = section {
            let href = format!("#{section}");
            self.click_link(&href, fired);
        }
    }

    fn click_link(&mut self, href: &str, fired: &mut Vec<Handler>) {
        if !self.links.iter().any(|link| link == href) {
            return;
        }
        fired.push(Handler::Link(href.to_string()));

        self.active_link = Some(href.to_string());
        self.active_section = href
            .strip_prefix('#')
            .filter(|id| self.sections.iter().any(|s| s == id))
            .map(str::to_string);

        debug!("Navigated to {:?}", self.active_section);
    }
}
