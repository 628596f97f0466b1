//! Persisted draft record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Platform;

/// Current draft record format
pub const DRAFT_FORMAT_VERSION: u32 = 1;

/// Serialized form of a composition session
///
/// Stored as JSON:
/// `{"content": .., "platforms": [..], "images": [..], "timestamp": .., "version": 1}`.
/// Records written before the `version` field existed decode as version 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    /// Post body
    pub content: String,
    /// Selected platforms, in selection order
    pub platforms: Vec<Platform>,
    /// Image payloads (data URIs), in display order
    pub images: Vec<String>,
    /// When the snapshot was taken
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    /// Record format version
    #[serde(default = "default_version")]
    pub version: u32,
}

const fn default_version() -> u32 {
    DRAFT_FORMAT_VERSION
}

impl DraftSnapshot {
    /// Encode as the stored JSON value
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a stored JSON value
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Platforms as comma-separated ids
    pub fn platforms_str(&self) -> String {
        self.platforms
            .iter()
            .map(Platform::id)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Format the snapshot time for display
    pub fn saved_at_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DraftSnapshot {
        DraftSnapshot {
            content: "Hello".to_string(),
            platforms: vec![Platform::Facebook, Platform::Pinterest],
            images: vec!["data:image/png;base64,AAAA".to_string()],
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
            version: DRAFT_FORMAT_VERSION,
        }
    }

    #[test]
    fn test_timestamp_is_iso_millis() {
        let json = sample().to_json().unwrap();
        assert!(json.contains(r#""timestamp":"2026-03-01T12:30:00.000Z""#));
        assert!(json.contains(r#""platforms":["facebook","pinterest"]"#));
    }

    #[test]
    fn test_legacy_record_without_version() {
        let json = r#"{"content":"hi","platforms":["etsy"],"images":[],"timestamp":"2025-01-02T03:04:05.678Z"}"#;
        let draft = DraftSnapshot::from_json(json).unwrap();
        assert_eq!(draft.version, 1);
        assert_eq!(draft.platforms, vec![Platform::Etsy]);
        assert_eq!(draft.timestamp.timestamp_subsec_millis(), 678);
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let json = r#"{"content":"","platforms":["myspace"],"images":[],"timestamp":"2025-01-02T03:04:05.000Z"}"#;
        assert!(DraftSnapshot::from_json(json).is_err());
    }

    #[test]
    fn test_platforms_str() {
        assert_eq!(sample().platforms_str(), "facebook,pinterest");
    }
}
