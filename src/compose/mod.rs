//! Composition session, toolbar formatting and previews

mod format;
mod preview;
mod session;

pub use format::{
    DEFAULT_LINK_LABEL, EMOJI_PALETTE, FormatAction, FormatEdit, insert_formatting,
    insert_formatting_with,
};
pub(crate) use format::byte_offset;
pub use preview::{EMPTY_TEXT_PLACEHOLDER, NO_IMAGE_PLACEHOLDER, Preview, PreviewImage, PreviewTab};
pub use session::{
    CHAR_LIMIT, CharCountClass, CompositionSession, PlatformSet, PublishButton, WARNING_THRESHOLD,
};
