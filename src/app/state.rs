//! Application state

use anyhow::Result;
use std::time::Instant;

use super::editor::EditorState;
use crate::ai::AiStatus;
use crate::compose::{CompositionSession, Preview, PublishButton};
use crate::config::Config;
use crate::demo::DEMO_CONTENT;
use crate::models::{ImageAttachment, NotificationCenter, Platform, Severity};
use crate::publish::{DRAFT_SAVED_NOTICE, PublishRequest, PublishState, SCHEDULE_NOTICE};
use crate::store::DraftStore;
use crate::theme::Theme;

/// Which panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Platforms,
    Images,
    Preview,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Self::Editor => Self::Platforms,
            Self::Platforms => Self::Images,
            Self::Images => Self::Preview,
            Self::Preview => Self::Editor,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Editor => Self::Preview,
            Self::Platforms => Self::Editor,
            Self::Images => Self::Platforms,
            Self::Preview => Self::Images,
        }
    }
}

/// Single-line input prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// URL for the link toolbar action
    LinkUrl,
    /// Image paths to attach (comma separated)
    AttachPaths,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self {
            Self::LinkUrl => " 🔗 Insert link ",
            Self::AttachPaths => " 🖼 Attach images ",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::LinkUrl => "https://...",
            Self::AttachPaths => "~/Pictures/a.png, ./b.jpg",
        }
    }
}

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Help,
    Prompt(Prompt),
}

/// Application state
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Draft store
    pub store: DraftStore,
    /// Whether to quit
    pub should_quit: bool,
    /// Current theme
    pub theme: Theme,
    /// Input mode
    pub mode: Mode,
    /// Focused panel
    pub focus: Focus,

    /// The draft being written
    pub session: CompositionSession,
    /// Editor cursor and selection
    pub editor: EditorState,
    /// Highlighted row in the platform list
    pub platform_cursor: usize,
    /// Highlighted row in the image list
    pub image_cursor: usize,
    /// Preview tab picked by the user
    pub active_tab: Option<Platform>,

    /// Prompt input buffer
    pub prompt_input: String,

    /// AI indicator
    pub ai_status: AiStatus,
    /// Sequence number of the latest AI request
    pub ai_request: u64,
    /// Publish button progress
    pub publish_state: PublishState,
    /// Image reads in flight
    pub attaching: usize,
    /// Toasts
    pub notifications: NotificationCenter,

    /// Tick counter for animations
    tick: u64,
}

impl AppState {
    /// Create a new app state, restoring the saved draft if there is one
    pub fn new(config: Config, store: DraftStore) -> Result<Self> {
        let theme = config.theme;
        let mut notifications = NotificationCenter::new(config.notification_ttl());

        let session = match store.load_draft() {
            Ok(Some(draft)) => {
                notifications.push(
                    Severity::Info,
                    format!("Restored draft saved {}", draft.saved_at_display()),
                );
                CompositionSession::from_snapshot(&draft)
            }
            Ok(None) => CompositionSession::with_platforms(config.default_platforms.clone()),
            Err(e) => {
                tracing::warn!("Ignoring stored draft: {e:#}");
                notifications.push(Severity::Warning, "Stored draft could not be read");
                CompositionSession::with_platforms(config.default_platforms.clone())
            }
        };

        let mut editor = EditorState::default();
        editor.collapse_to(session.char_count());

        Ok(Self {
            config,
            store,
            should_quit: false,
            theme,
            mode: Mode::Normal,
            focus: Focus::Editor,
            session,
            editor,
            platform_cursor: 0,
            image_cursor: 0,
            active_tab: None,
            prompt_input: String::new(),
            ai_status: AiStatus::Ready,
            ai_request: 0,
            publish_state: PublishState::Idle,
            attaching: 0,
            notifications,
            tick: 0,
        })
    }

    /// Tick for animations
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.notifications.expire(Instant::now());
    }

    /// Get current tick
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Raise a toast
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notifications.push(severity, message);
    }

    /// Whether any async work is running
    pub fn is_busy(&self) -> bool {
        self.ai_status.is_busy() || self.publish_state == PublishState::Publishing || self.attaching > 0
    }

    // ==================== Platforms ====================

    /// Flip the platform under the list cursor
    pub fn toggle_highlighted_platform(&mut self) {
        if let Some(platform) = Platform::all().get(self.platform_cursor).copied() {
            self.flip_platform(platform);
        }
    }

    /// Flip a platform's selection
    pub fn flip_platform(&mut self, platform: Platform) {
        self.session.flip_platform(platform);
        if self.active_tab.is_some_and(|p| !self.session.selected_platforms().contains(p)) {
            self.active_tab = None;
        }
    }

    pub fn select_next_platform(&mut self) {
        self.platform_cursor = (self.platform_cursor + 1).min(Platform::all().len() - 1);
    }

    pub fn select_prev_platform(&mut self) {
        self.platform_cursor = self.platform_cursor.saturating_sub(1);
    }

    // ==================== Images ====================

    /// Attachment under the list cursor
    pub fn highlighted_image(&self) -> Option<&ImageAttachment> {
        self.session.images().get(self.image_cursor)
    }

    /// Remove the attachment under the list cursor
    pub fn remove_highlighted_image(&mut self) {
        if let Some(id) = self.highlighted_image().map(|img| img.id) {
            self.session.remove_image(id);
            let len = self.session.images().len();
            self.image_cursor = self.image_cursor.min(len.saturating_sub(1));
        }
    }

    pub fn select_next_image(&mut self) {
        let len = self.session.images().len();
        if len > 0 {
            self.image_cursor = (self.image_cursor + 1).min(len - 1);
        }
    }

    pub fn select_prev_image(&mut self) {
        self.image_cursor = self.image_cursor.saturating_sub(1);
    }

    // ==================== Preview ====================

    /// Preview for the active tab
    pub fn current_preview(&self) -> Option<Preview> {
        self.session
            .preview_tabs(self.active_tab)
            .into_iter()
            .find(|t| t.active)
            .map(|t| self.session.build_preview(t.platform))
    }

    /// Cycle preview tabs
    pub fn cycle_tab(&mut self, forward: bool) {
        let tabs = self.session.preview_tabs(self.active_tab);
        if tabs.is_empty() {
            return;
        }
        let current = tabs.iter().position(|t| t.active).unwrap_or(0);
        let next = if forward {
            (current + 1) % tabs.len()
        } else {
            current.checked_sub(1).unwrap_or(tabs.len() - 1)
        };
        self.active_tab = Some(tabs[next].platform);
    }

    /// Publish button as rendered
    pub fn publish_button(&self) -> PublishButton {
        self.publish_state.button(self.session.publish_button())
    }

    // ==================== Actions ====================

    /// Validate and capture a publish; reports validation errors
    pub fn begin_publish(&mut self) -> Option<PublishRequest> {
        if self.publish_state != PublishState::Idle {
            return None;
        }
        match PublishRequest::from_session(&self.session) {
            Ok(request) => {
                self.publish_state = PublishState::Publishing;
                Some(request)
            }
            Err(e) => {
                self.notify(e.severity(), e.to_string());
                None
            }
        }
    }

    /// Persist the draft
    pub fn save_draft(&mut self) {
        let snapshot = self.session.build_draft_snapshot();
        match self.store.save_draft(&snapshot) {
            Ok(()) => self.notify(Severity::Success, DRAFT_SAVED_NOTICE),
            Err(e) => {
                tracing::error!("Failed to save draft: {e:#}");
                self.notify(Severity::Error, format!("Could not save draft: {e}"));
            }
        }
    }

    /// Schedule is not available yet
    pub fn schedule(&mut self) {
        self.notify(Severity::Info, SCHEDULE_NOTICE);
    }

    /// Start an AI request; returns the content to send and the request number
    pub fn begin_suggest(&mut self) -> Option<(String, u64)> {
        if self.ai_status.is_busy() {
            return None;
        }
        self.ai_status = AiStatus::Thinking;
        self.ai_request += 1;
        Some((self.session.text().to_string(), self.ai_request))
    }

    /// Return the AI indicator to ready unless a newer request owns it
    pub fn reset_ai_status(&mut self, request: u64) {
        if request == self.ai_request && self.ai_status.resets() {
            self.ai_status = AiStatus::Ready;
        }
    }

    /// Apply a suggestion to the body
    pub fn apply_suggestion(&mut self, suggestion: String) {
        self.session.set_text(suggestion);
        self.editor.collapse_to(self.session.char_count());
        self.ai_status = AiStatus::Enhanced;
    }

    /// Fill in demo content unless the user already wrote something
    pub fn seed_demo(&mut self) {
        if self.session.text().is_empty() {
            self.session.set_text(DEMO_CONTENT);
            self.editor.collapse_to(self.session.char_count());
        }
    }

    /// Open a prompt
    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt_input.clear();
        self.mode = Mode::Prompt(prompt);
    }

    /// Close the current prompt
    pub fn close_prompt(&mut self) {
        self.prompt_input.clear();
        self.mode = Mode::Normal;
    }

    /// Cycle through themes
    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.config.theme = self.theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;

    fn state() -> AppState {
        AppState::new(Config::default(), DraftStore::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_starts_with_default_platforms() {
        let state = state();
        assert_eq!(
            state.session.selected_platforms().to_vec(),
            vec![Platform::Pinterest, Platform::Facebook]
        );
        assert_eq!(state.current_preview().unwrap().platform, Platform::Pinterest);
    }

    #[test]
    fn test_restores_saved_draft() {
        let store = DraftStore::open_in_memory().unwrap();
        let mut session = CompositionSession::with_platforms([Platform::YouTube]);
        session.set_text("from last time");
        store.save_draft(&session.build_draft_snapshot()).unwrap();

        let state = AppState::new(Config::default(), store).unwrap();
        assert_eq!(state.session.text(), "from last time");
        assert_eq!(state.session.selected_platforms().to_vec(), vec![Platform::YouTube]);
        assert_eq!(state.editor.cursor, 14);
    }

    #[test]
    fn test_publish_validation_reports_error() {
        let mut state = state();
        state.session.set_text("  ");
        assert!(state.begin_publish().is_none());
        assert_eq!(state.publish_state, PublishState::Idle);
        let latest = state.notifications.latest().unwrap();
        assert_eq!(latest.severity, Severity::Error);
        assert_eq!(latest.message, ComposeError::EmptyContent.to_string());

        state.session.set_text("Ready");
        assert!(state.begin_publish().is_some());
        assert_eq!(state.publish_button().label, "Publishing...");
        assert!(state.begin_publish().is_none());
    }

    #[test]
    fn test_cycle_tab_wraps() {
        let mut state = state();
        state.cycle_tab(true);
        assert_eq!(state.active_tab, Some(Platform::Facebook));
        state.cycle_tab(true);
        assert_eq!(state.active_tab, Some(Platform::Pinterest));
        state.cycle_tab(false);
        assert_eq!(state.active_tab, Some(Platform::Facebook));

        state.flip_platform(Platform::Facebook);
        assert_eq!(state.active_tab, None);
        assert_eq!(state.current_preview().unwrap().platform, Platform::Pinterest);
    }

    #[test]
    fn test_seed_demo_does_not_clobber_text() {
        let mut state = state();
        state.seed_demo();
        assert_eq!(state.session.text(), DEMO_CONTENT);

        state.session.set_text("mine");
        state.seed_demo();
        assert_eq!(state.session.text(), "mine");
    }

    #[test]
    fn test_save_draft_notifies() {
        let mut state = state();
        state.session.set_text("keep me");
        state.save_draft();
        assert_eq!(state.notifications.latest().unwrap().message, DRAFT_SAVED_NOTICE);
        assert_eq!(state.store.load_draft().unwrap().unwrap().content, "keep me");
    }

    #[test]
    fn test_remove_highlighted_image_clamps_cursor() {
        let mut state = state();
        state.session.attach(ImageAttachment::new("a.png", "image/png", "data:image/png;base64,AA"));
        state.session.attach(ImageAttachment::new("b.png", "image/png", "data:image/png;base64,BB"));
        state.select_next_image();
        state.remove_highlighted_image();
        assert_eq!(state.image_cursor, 0);
        assert_eq!(state.session.images()[0].name, "a.png");
    }
}
