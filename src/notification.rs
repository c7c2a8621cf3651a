//! Transient user notifications
//!
//! Notifications are raised by the dashboard and dismissed automatically once
//! their lifetime has passed. Expiry is checked against a caller-supplied
//! instant so the center holds no timers of its own.

use maud::{Markup, html};
use std::fmt;
use std::time::{Duration, Instant};

/// Default lifetime of a notification
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    /// Section that was active when the notification was raised
    pub section: Option<String>,
    pub raised_at: Instant,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        html! {
            div class={ "alert alert-" (self.severity.as_str()) } { (self.message) }
        }
    }
}

/// Holds the notifications that are still visible
#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    entries: Vec<Notification>,
    next_id: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationCenter {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Raise a notification at `now`, newest first
    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        section: Option<String>,
        now: Instant,
    ) -> u64 {
        self.prune(now);
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            0,
            Notification {
                id,
                message: message.into(),
                severity,
                section,
                raised_at: now,
            },
        );
        id
    }

    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        section: Option<String>,
    ) -> u64 {
        self.push_at(message, severity, section, Instant::now())
    }

    /// Drop expired entries and return the rest
    pub fn active_at(&mut self, now: Instant) -> &[Notification] {
        self.prune(now);
        &self.entries
    }

    pub fn active(&mut self) -> &[Notification] {
        self.active_at(Instant::now())
    }

    /// Every notification raised and not yet pruned, regardless of age
    #[must_use]
    pub fn history(&self) -> &[Notification] {
        &self.entries
    }

    fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries.retain(|n| !n.is_expired(ttl, now));
    }
}
