//! Platform type definitions

use serde::{Deserialize, Serialize};

/// Supported target platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Pinterest pins
    #[default]
    Pinterest,
    /// Facebook page posts
    Facebook,
    /// Instagram feed posts
    Instagram,
    /// Etsy shop updates
    Etsy,
    /// Blogger articles
    Blogger,
    /// YouTube community posts
    YouTube,
}

impl Platform {
    /// Get all supported platforms
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pinterest,
            Self::Facebook,
            Self::Instagram,
            Self::Etsy,
            Self::Blogger,
            Self::YouTube,
        ]
    }

    /// Get the lowercase identifier used in stored drafts
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Pinterest => "pinterest",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Etsy => "etsy",
            Self::Blogger => "blogger",
            Self::YouTube => "youtube",
        }
    }

    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pinterest => "Pinterest",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Etsy => "Etsy",
            Self::Blogger => "Blogger",
            Self::YouTube => "YouTube",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Pinterest => "📌",
            Self::Facebook => "📘",
            Self::Instagram => "📸",
            Self::Etsy => "🛍",
            Self::Blogger => "📝",
            Self::YouTube => "▶",
        }
    }

    /// Get the brand color (hex)
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Pinterest => "#E60023",
            Self::Facebook => "#1877F2",
            Self::Instagram => "#E4405F",
            Self::Etsy => "#F1641E",
            Self::Blogger => "#FF5722",
            Self::YouTube => "#FF0000",
        }
    }

    /// Preview style modifier, e.g. `pinterest-style`
    pub fn style_class(&self) -> String {
        format!("{}-style", self.id())
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pinterest" => Some(Self::Pinterest),
            "facebook" | "fb" => Some(Self::Facebook),
            "instagram" | "ig" => Some(Self::Instagram),
            "etsy" => Some(Self::Etsy),
            "blogger" => Some(Self::Blogger),
            "youtube" | "yt" => Some(Self::YouTube),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip_through_from_str() {
        for platform in Platform::all() {
            assert_eq!(Platform::from_str(platform.id()), Some(*platform));
        }
        assert_eq!(Platform::from_str("YT"), Some(Platform::YouTube));
        assert_eq!(Platform::from_str("linkedin"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&[Platform::YouTube, Platform::Etsy]).unwrap();
        assert_eq!(json, r#"["youtube","etsy"]"#);
    }

    #[test]
    fn test_style_class() {
        assert_eq!(Platform::Instagram.style_class(), "instagram-style");
    }
}
