//! Image attachment model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded image attached to the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Unique identifier (never reused within a session)
    pub id: Uuid,
    /// Displayable payload (`data:<mime>;base64,...`)
    pub data_url: String,
    /// Original file name
    pub name: String,
    /// Declared media type (always `image/*`)
    pub media_type: String,
}

impl ImageAttachment {
    /// Create a new attachment with a fresh id
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            data_url: data_url.into(),
            name: name.into(),
            media_type: media_type.into(),
        }
    }

    /// Rebuild an attachment from a stored data URI
    pub fn from_data_url(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        let data_url = data_url.into();
        let media_type = media_type_of(&data_url).unwrap_or("image/*").to_string();
        Self::new(name, media_type, data_url)
    }

    /// Approximate decoded payload size in bytes
    pub fn payload_len(&self) -> usize {
        self.data_url
            .split_once(',')
            .map_or(0, |(_, payload)| payload.len() / 4 * 3)
    }
}

/// Extract the media type from a `data:` URI
pub fn media_type_of(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let (header, _) = rest.split_once(',')?;
    let media_type = header.split(';').next()?;
    if media_type.is_empty() {
        None
    } else {
        Some(media_type)
    }
}
