//! Platform preview derivation

use crate::models::Platform;

/// Shown when the body is empty
pub const EMPTY_TEXT_PLACEHOLDER: &str = "Your post content will appear here...";

/// Shown when no image is attached
pub const NO_IMAGE_PLACEHOLDER: &str = "No image selected";

/// Image slot of a preview card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewImage {
    /// Payload of the first attachment
    Image(String),
    /// Nothing attached
    Placeholder(&'static str),
}

impl PreviewImage {
    /// Check if an image is shown
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// View-ready preview of the post on one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Platform being previewed
    pub platform: Platform,
    /// Body or placeholder
    pub display_text: String,
    /// First image or placeholder
    pub image: PreviewImage,
    /// Platform style modifier
    pub style_class: String,
}

/// One tab of the preview tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTab {
    /// Platform the tab shows
    pub platform: Platform,
    /// Whether this is the active tab
    pub active: bool,
}

impl PreviewTab {
    /// Tab label
    pub const fn label(&self) -> &'static str {
        self.platform.name()
    }
}
