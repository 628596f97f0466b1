//! Mocked AI writing assistant
//!
//! No network call is made: after a simulated delay the suggester returns
//! one of five canned rewrites of the current body.

use std::time::Duration;

use rand::Rng;

use crate::error::ComposeError;

/// Number of canned rewrites
pub const TEMPLATE_COUNT: usize = 5;

/// Build every canned rewrite of `content`
pub fn templates(content: &str) -> [String; TEMPLATE_COUNT] {
    [
        format!("{content}\n\n#Pinterest #Creative #Inspiration #DIY #Lifestyle #HomeDecor"),
        format!(
            "🚀 {content}\n\nWhat are your thoughts on this? Let me know in the comments below! 👇"
        ),
        format!(
            "💡 Pro tip: {content}\n\nThis strategy has helped us achieve amazing results. What's your experience?"
        ),
        format!(
            "{content}\n\n✨ Key takeaways:\n• Focus on value\n• Engage authentically\n• Measure results\n\nWhat would you add?"
        ),
        format!("🔥 Hot take: {content}\n\nAgree or disagree? I'd love to hear your perspective! 💬"),
    ]
}

/// Pick one rewrite uniformly at random
pub fn pick_suggestion<R: Rng + ?Sized>(rng: &mut R, content: &str) -> String {
    let idx = rng.random_range(0..TEMPLATE_COUNT);
    let [a, b, c, d, e] = templates(content);
    match idx {
        0 => a,
        1 => b,
        2 => c,
        3 => d,
        _ => e,
    }
}

/// Source of content suggestions
#[allow(async_fn_in_trait)]
pub trait Suggester {
    /// Suggest an improved version of `content`
    async fn suggest(&self, content: &str) -> Result<String, ComposeError>;
}

/// Canned suggester with simulated latency
#[derive(Debug, Clone)]
pub struct MockSuggester {
    delay: Duration,
    fail_with: Option<String>,
}

impl MockSuggester {
    /// Create a suggester that answers after `delay`
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_with: None,
        }
    }

    /// Create a suggester that always fails after `delay`
    pub fn failing(delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            delay,
            fail_with: Some(reason.into()),
        }
    }

    /// Simulated latency
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Suggester for MockSuggester {
    async fn suggest(&self, content: &str) -> Result<String, ComposeError> {
        tracing::debug!("Generating suggestion for {} chars", content.chars().count());
        tokio::time::sleep(self.delay).await;

        if let Some(reason) = &self.fail_with {
            return Err(ComposeError::AiGenerationFailed(reason.clone()));
        }

        Ok(pick_suggestion(&mut rand::rng(), content))
    }
}

/// AI status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiStatus {
    /// Idle
    #[default]
    Ready,
    /// Request in flight
    Thinking,
    /// Last suggestion applied
    Enhanced,
    /// Last request failed
    Error,
}

impl AiStatus {
    /// Indicator label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ready => "AI Ready",
            Self::Thinking => "AI Thinking...",
            Self::Enhanced => "AI Enhanced",
            Self::Error => "AI Error",
        }
    }

    /// Indicator icon
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Ready => "🤖",
            Self::Thinking => "⏳",
            Self::Enhanced => "✅",
            Self::Error => "⚠",
        }
    }

    /// Whether a request is running
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Thinking)
    }

    /// Whether the status should fall back to `Ready` after a delay
    pub const fn resets(&self) -> bool {
        matches!(self, Self::Enhanced | Self::Error)
    }
}
