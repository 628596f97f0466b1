//! Mocked publish / schedule actions

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::compose::{CompositionSession, PublishButton};
use crate::error::ComposeError;
use crate::models::Platform;

/// Shown when the schedule button is pressed
pub const SCHEDULE_NOTICE: &str = "Scheduling feature coming soon!";

/// Shown after a draft is stored
pub const DRAFT_SAVED_NOTICE: &str = "Draft saved successfully!";

/// Everything a publish needs, captured at click time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Target platforms, in selection order
    pub platforms: Vec<Platform>,
    /// Post body
    pub content: String,
    /// Number of attached images
    pub image_count: usize,
}

impl PublishRequest {
    /// Validate the session and capture a request
    pub fn from_session(session: &CompositionSession) -> Result<Self, ComposeError> {
        session.validate_publish()?;
        Ok(Self {
            platforms: session.selected_platforms().to_vec(),
            content: session.text().to_string(),
            image_count: session.images().len(),
        })
    }
}

/// Result of a (mock) publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// Platforms the post went to
    pub platforms: Vec<Platform>,
    /// Completion time
    pub published_at: DateTime<Utc>,
}

impl PublishReceipt {
    /// Success message for the notification
    pub fn message(&self) -> String {
        format!(
            "Successfully published to {} platform(s)!",
            self.platforms.len()
        )
    }
}

/// Publisher that only pretends to talk to the platforms
#[derive(Debug, Clone)]
pub struct MockPublisher {
    delay: Duration,
}

impl MockPublisher {
    /// Create a publisher that completes after `delay`
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Publish a validated request
    pub async fn publish(&self, request: PublishRequest) -> PublishReceipt {
        tracing::info!(
            "Publishing {} chars and {} image(s) to {}",
            request.content.chars().count(),
            request.image_count,
            request
                .platforms
                .iter()
                .map(Platform::name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        tokio::time::sleep(self.delay).await;

        PublishReceipt {
            platforms: request.platforms,
            published_at: Utc::now(),
        }
    }
}

/// Publish button progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishState {
    /// Waiting for a click
    #[default]
    Idle,
    /// Mock request in flight
    Publishing,
    /// Just finished; resets to idle after a delay
    Published,
}

impl PublishState {
    /// Button as rendered for this state
    pub fn button(&self, idle: PublishButton) -> PublishButton {
        match self {
            Self::Idle => idle,
            Self::Publishing => PublishButton {
                enabled: false,
                label: "Publishing...".to_string(),
            },
            Self::Published => PublishButton {
                enabled: false,
                label: "Published!".to_string(),
            },
        }
    }
}
