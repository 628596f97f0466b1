//! Toast notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Action completed
    Success,
    /// Action rejected or failed
    Error,
    /// Needs attention
    Warning,
    /// Informational
    #[default]
    Info,
}

impl Severity {
    /// Get the icon glyph
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }

    /// Get the color (hex)
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Warning => "#f59e0b",
            Self::Info => "#3b82f6",
        }
    }
}

/// A transient message shown to the user
#[derive(Debug, Clone)]
pub struct Notification {
    /// Message text
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// When it was raised
    pub raised_at: Instant,
}

impl Notification {
    /// Whether the notification should be dismissed at `now`
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Ordered set of live notifications
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    /// Keep at most this many on screen
    const MAX_VISIBLE: usize = 4;

    /// Create a center that dismisses notifications after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    /// Raise a notification now
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.push_at(severity, message, Instant::now());
    }

    /// Raise a notification at a given instant
    pub fn push_at(&mut self, severity: Severity, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(?severity, %message, "notification");
        if self.items.len() >= Self::MAX_VISIBLE {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            message,
            severity,
            raised_at: now,
        });
    }

    /// Drop notifications whose time is up
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items.retain(|n| !n.is_expired(now, ttl));
    }

    /// Live notifications, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Most recent notification
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    /// Number of live notifications
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is shown
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_after_ttl() {
        let mut center = NotificationCenter::new(Duration::from_millis(4000));
        let start = Instant::now();
        center.push_at(Severity::Success, "Draft saved successfully!", start);
        center.push_at(Severity::Info, "later", start + Duration::from_millis(1000));

        center.expire(start + Duration::from_millis(3999));
        assert_eq!(center.len(), 2);

        center.expire(start + Duration::from_millis(4000));
        assert_eq!(center.len(), 1);
        assert_eq!(center.latest().unwrap().message, "later");
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut center = NotificationCenter::new(Duration::from_secs(60));
        for i in 0..6 {
            center.push(Severity::Info, format!("n{i}"));
        }
        let messages: Vec<_> = center.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n2", "n3", "n4", "n5"]);
    }
}
