//! The composition session: single owner of the draft being written

use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use uuid::Uuid;

use super::format::{FormatAction, insert_formatting_with};
use super::preview::{
    EMPTY_TEXT_PLACEHOLDER, NO_IMAGE_PLACEHOLDER, Preview, PreviewImage, PreviewTab,
};
use crate::error::ComposeError;
use crate::images::{self, FileInput, IngestReport};
use crate::models::{DRAFT_FORMAT_VERSION, DraftSnapshot, ImageAttachment, Platform};

/// Above this many chars the counter turns to a warning
pub const WARNING_THRESHOLD: usize = 200;

/// Above this many chars the counter shows over-limit
pub const CHAR_LIMIT: usize = 250;

/// Character counter styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharCountClass {
    /// Within the comfortable range
    #[default]
    Normal,
    /// Approaching the limit
    Warning,
    /// Past the limit
    OverLimit,
}

impl CharCountClass {
    /// Classify a body length (in chars)
    pub const fn classify(len: usize) -> Self {
        if len > CHAR_LIMIT {
            Self::OverLimit
        } else if len > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Get class as string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::OverLimit => "over-limit",
        }
    }
}

/// Selected platforms: set semantics, insertion-ordered iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSet {
    order: Vec<Platform>,
}

impl PlatformSet {
    /// Create an empty set
    pub const fn new() -> Self {
        Self { order: Vec::new() }
    }

    /// Add a platform; returns `false` if it was already present
    pub fn insert(&mut self, platform: Platform) -> bool {
        if self.contains(platform) {
            false
        } else {
            self.order.push(platform);
            true
        }
    }

    /// Remove a platform; returns `false` if it was absent
    pub fn remove(&mut self, platform: Platform) -> bool {
        if let Some(idx) = self.order.iter().position(|p| *p == platform) {
            self.order.remove(idx);
            true
        } else {
            false
        }
    }

    /// Check membership
    pub fn contains(&self, platform: Platform) -> bool {
        self.order.contains(&platform)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.order.iter().copied()
    }

    /// First selected platform
    pub fn first(&self) -> Option<Platform> {
        self.order.first().copied()
    }

    /// Number of selected platforms
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Copy out as an ordered list
    pub fn to_vec(&self) -> Vec<Platform> {
        self.order.clone()
    }
}

impl FromIterator<Platform> for PlatformSet {
    fn from_iter<I: IntoIterator<Item = Platform>>(iter: I) -> Self {
        let mut set = Self::new();
        for platform in iter {
            set.insert(platform);
        }
        set
    }
}

/// Publish button view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishButton {
    /// Whether the button accepts clicks
    pub enabled: bool,
    /// Button caption
    pub label: String,
}

/// In-memory model of one post being drafted
#[derive(Debug, Clone, Default)]
pub struct CompositionSession {
    text: String,
    images: Vec<ImageAttachment>,
    platforms: PlatformSet,
    revision: u64,
}

impl CompositionSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with some platforms preselected
    pub fn with_platforms(platforms: impl IntoIterator<Item = Platform>) -> Self {
        Self {
            platforms: platforms.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Rebuild a session from a stored draft
    pub fn from_snapshot(snapshot: &DraftSnapshot) -> Self {
        let mut session = Self::new();
        session.restore(snapshot);
        session
    }

    /// Replace the whole state with a stored draft
    ///
    /// Images get fresh ids; names are `image-1`, `image-2`, ...
    pub fn restore(&mut self, snapshot: &DraftSnapshot) {
        self.text.clone_from(&snapshot.content);
        self.platforms = snapshot.platforms.iter().copied().collect();
        self.images = snapshot
            .images
            .iter()
            .enumerate()
            .map(|(i, url)| ImageAttachment::from_data_url(format!("image-{}", i + 1), url.clone()))
            .collect();
        self.touch();
        tracing::debug!(
            platforms = %snapshot.platforms_str(),
            images = self.images.len(),
            "restored draft"
        );
    }

    // ==================== Queries ====================

    /// Current body
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attachments in display order
    pub fn images(&self) -> &[ImageAttachment] {
        &self.images
    }

    /// Selected platforms
    pub const fn selected_platforms(&self) -> &PlatformSet {
        &self.platforms
    }

    /// Bumped on every state change
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Check if there is nothing to save
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.is_empty()
    }

    /// Body length in chars
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Counter styling for the current body
    pub fn char_count_class(&self) -> CharCountClass {
        CharCountClass::classify(self.char_count())
    }

    /// Tabs for the selected platforms; `active` falls back to the first one
    pub fn preview_tabs(&self, active: Option<Platform>) -> Vec<PreviewTab> {
        let active = active
            .filter(|p| self.platforms.contains(*p))
            .or_else(|| self.platforms.first());
        self.platforms
            .iter()
            .map(|platform| PreviewTab {
                platform,
                active: Some(platform) == active,
            })
            .collect()
    }

    /// Publish button state for the current selection
    pub fn publish_button(&self) -> PublishButton {
        match self.platforms.len() {
            0 => PublishButton {
                enabled: false,
                label: "Select Platforms First".to_string(),
            },
            1 => PublishButton {
                enabled: true,
                label: "Publish to 1 Platform".to_string(),
            },
            n => PublishButton {
                enabled: true,
                label: format!("Publish to {n} Platforms"),
            },
        }
    }

    /// Preview for one platform
    pub fn build_preview(&self, platform: Platform) -> Preview {
        let display_text = if self.text.is_empty() {
            EMPTY_TEXT_PLACEHOLDER.to_string()
        } else {
            self.text.clone()
        };
        let image = self.images.first().map_or(
            PreviewImage::Placeholder(NO_IMAGE_PLACEHOLDER),
            |img| PreviewImage::Image(img.data_url.clone()),
        );

        Preview {
            platform,
            display_text,
            image,
            style_class: platform.style_class(),
        }
    }

    /// Preview for the first selected platform
    pub fn first_preview(&self) -> Option<Preview> {
        self.platforms.first().map(|p| self.build_preview(p))
    }

    /// Snapshot for persistence, stamped now
    pub fn build_draft_snapshot(&self) -> DraftSnapshot {
        self.build_draft_snapshot_at(Utc::now())
    }

    /// Snapshot for persistence with an explicit timestamp
    ///
    /// The timestamp is cut to milliseconds, the precision of the stored record.
    pub fn build_draft_snapshot_at(&self, timestamp: DateTime<Utc>) -> DraftSnapshot {
        DraftSnapshot {
            content: self.text.clone(),
            platforms: self.platforms.to_vec(),
            images: self.images.iter().map(|img| img.data_url.clone()).collect(),
            timestamp: timestamp.trunc_subsecs(3),
            version: DRAFT_FORMAT_VERSION,
        }
    }

    /// Check the draft can be published
    pub fn validate_publish(&self) -> Result<(), ComposeError> {
        if self.platforms.is_empty() {
            return Err(ComposeError::NoPlatformSelected);
        }
        if self.text.trim().is_empty() {
            return Err(ComposeError::EmptyContent);
        }
        Ok(())
    }

    // ==================== Commands ====================

    /// Select or deselect a platform; returns whether anything changed
    pub fn toggle_platform(&mut self, platform: Platform, checked: bool) -> bool {
        let changed = if checked {
            self.platforms.insert(platform)
        } else {
            self.platforms.remove(platform)
        };
        if changed {
            self.touch();
            tracing::debug!(%platform, checked, "platform toggled");
        }
        changed
    }

    /// Flip a platform's membership; returns the new membership
    pub fn flip_platform(&mut self, platform: Platform) -> bool {
        let checked = !self.platforms.contains(platform);
        self.toggle_platform(platform, checked);
        checked
    }

    /// Decode files and append the images, in input order
    pub async fn add_images(&mut self, files: Vec<FileInput>) -> IngestReport {
        let report = images::ingest(files).await;
        for attachment in &report.added {
            self.attach(attachment.clone());
        }
        report
    }

    /// Append an already decoded attachment
    pub fn attach(&mut self, attachment: ImageAttachment) {
        tracing::debug!(id = %attachment.id, name = %attachment.name, "image attached");
        self.images.push(attachment);
        self.touch();
    }

    /// Remove an attachment; unknown ids are ignored
    pub fn remove_image(&mut self, id: Uuid) -> bool {
        let before = self.images.len();
        self.images.retain(|img| img.id != id);
        let removed = self.images.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Replace the body
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.touch();
        }
    }

    /// Apply a toolbar action to the body; returns the new selection
    pub fn apply_formatting(
        &mut self,
        action: &FormatAction,
        start: usize,
        end: usize,
    ) -> (usize, usize) {
        self.apply_formatting_with(&mut rand::rng(), action, start, end)
    }

    /// Apply a toolbar action with an explicit RNG
    pub fn apply_formatting_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        action: &FormatAction,
        start: usize,
        end: usize,
    ) -> (usize, usize) {
        let edit = insert_formatting_with(rng, action, start, end, &self.text);
        self.set_text(edit.text);
        edit.selection
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
