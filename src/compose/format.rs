//! Toolbar text transforms (bold, italic, link, emoji)
//!
//! All positions are char offsets into the body, not byte offsets. Out of
//! range positions are clamped to the text.

use rand::Rng;

/// Glyphs the emoji button picks from
pub const EMOJI_PALETTE: [&str; 10] = ["😊", "🚀", "💡", "🎉", "🔥", "⭐", "💪", "🎯", "✨", "🌟"];

/// Label used for a link when nothing is selected
pub const DEFAULT_LINK_LABEL: &str = "link";

/// A formatting toolbar action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatAction {
    /// Wrap the selection in `**`
    Bold,
    /// Wrap the selection in `*`
    Italic,
    /// Replace the selection with `[label](url)`
    Link {
        /// Target URL, supplied by the caller
        url: String,
    },
    /// Insert a random emoji at the cursor
    Emoji,
}

impl FormatAction {
    /// Wrapping markers for bold/italic
    pub const fn markers(&self) -> Option<&'static str> {
        match self {
            Self::Bold => Some("**"),
            Self::Italic => Some("*"),
            Self::Link { .. } | Self::Emoji => None,
        }
    }

    /// Toolbar label
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Link { .. } => "link",
            Self::Emoji => "emoji",
        }
    }
}

/// Result of a formatting action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    /// Full body after the edit
    pub text: String,
    /// New selection `(start, end)` in chars
    pub selection: (usize, usize),
}

/// Apply a formatting action using the thread RNG for emoji picks
pub fn insert_formatting(action: &FormatAction, start: usize, end: usize, text: &str) -> FormatEdit {
    insert_formatting_with(&mut rand::rng(), action, start, end, text)
}

/// Apply a formatting action with an explicit RNG
pub fn insert_formatting_with<R: Rng + ?Sized>(
    rng: &mut R,
    action: &FormatAction,
    start: usize,
    end: usize,
    text: &str,
) -> FormatEdit {
    let len = text.chars().count();
    let end = end.min(len);
    let start = start.min(end);

    let (before, rest) = text.split_at(byte_offset(text, start));
    let (selected, after) = rest.split_at(byte_offset(rest, end - start));

    match action {
        FormatAction::Bold | FormatAction::Italic => {
            let marker = action.markers().unwrap_or_default();
            let shift = marker.chars().count();
            FormatEdit {
                text: format!("{before}{marker}{selected}{marker}{after}"),
                selection: (start + shift, end + shift),
            }
        }
        FormatAction::Link { url } => {
            let url = url.trim();
            if url.is_empty() {
                return FormatEdit {
                    text: text.to_string(),
                    selection: (start, end),
                };
            }
            let label = if selected.is_empty() {
                DEFAULT_LINK_LABEL
            } else {
                selected
            };
            let link = format!("[{label}]({url})");
            let cursor = start + link.chars().count();
            FormatEdit {
                text: format!("{before}{link}{after}"),
                selection: (cursor, cursor),
            }
        }
        FormatAction::Emoji => {
            let emoji = EMOJI_PALETTE[rng.random_range(0..EMOJI_PALETTE.len())];
            FormatEdit {
                text: format!("{before}{emoji}{rest}"),
                selection: (start + 1, start + 1),
            }
        }
    }
}

/// Byte offset of the `char_idx`-th char (or the end of the string)
pub(crate) fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bold_wraps_selection() {
        let edit = insert_formatting(&FormatAction::Bold, 0, 5, "Hello world");
        assert_eq!(edit.text, "**Hello** world");
        assert_eq!(edit.selection, (2, 7));
    }

    #[test]
    fn test_italic_wraps_selection() {
        let edit = insert_formatting(&FormatAction::Italic, 6, 11, "Hello world");
        assert_eq!(edit.text, "Hello *world*");
        assert_eq!(edit.selection, (7, 12));
    }

    #[test]
    fn test_bold_with_empty_selection_inserts_markers() {
        let edit = insert_formatting(&FormatAction::Bold, 5, 5, "Hello");
        assert_eq!(edit.text, "Hello****");
        assert_eq!(edit.selection, (7, 7));
    }

    #[test]
    fn test_link_replaces_selection() {
        let action = FormatAction::Link {
            url: "https://example.com".to_string(),
        };
        let edit = insert_formatting(&action, 6, 11, "Hello world!");
        assert_eq!(edit.text, "Hello [world](https://example.com)!");
        assert_eq!(edit.selection, (34, 34));
    }

    #[test]
    fn test_link_without_selection_uses_default_label() {
        let action = FormatAction::Link {
            url: "https://example.com".to_string(),
        };
        let edit = insert_formatting(&action, 0, 0, "");
        assert_eq!(edit.text, "[link](https://example.com)");
    }

    #[test]
    fn test_link_with_blank_url_is_noop() {
        let action = FormatAction::Link { url: "  ".to_string() };
        let edit = insert_formatting(&action, 1, 3, "Hello");
        assert_eq!(edit.text, "Hello");
        assert_eq!(edit.selection, (1, 3));
    }

    #[test]
    fn test_emoji_inserted_at_cursor() {
        let mut rng = StdRng::seed_from_u64(7);
        let edit = insert_formatting_with(&mut rng, &FormatAction::Emoji, 2, 2, "Hi there");
        let inserted: String = edit.text.chars().skip(2).take(1).collect();
        assert!(EMOJI_PALETTE.contains(&inserted.as_str()));
        assert_eq!(edit.text.chars().count(), 9);
        assert_eq!(edit.selection, (3, 3));
    }

    #[test]
    fn test_positions_are_chars_not_bytes() {
        let edit = insert_formatting(&FormatAction::Bold, 0, 2, "🎨🎨 art");
        assert_eq!(edit.text, "**🎨🎨** art");
        assert_eq!(edit.selection, (2, 4));
    }

    #[test]
    fn test_out_of_range_positions_are_clamped() {
        let edit = insert_formatting(&FormatAction::Italic, 3, 99, "Hey");
        assert_eq!(edit.text, "Hey**");
        assert_eq!(edit.selection, (4, 4));
    }
}
