//! Data models for LinkerLab

mod attachment;
mod draft;
mod notification;
mod platform;

pub use attachment::{ImageAttachment, media_type_of};
pub use draft::{DRAFT_FORMAT_VERSION, DraftSnapshot};
pub use notification::{Notification, NotificationCenter, Severity};
pub use platform::Platform;
