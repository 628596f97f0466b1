//! Cursor and selection handling for the compose editor
//!
//! Positions are char offsets into the session body, the same unit the
//! formatting toolbar uses.

use unicode_width::UnicodeWidthChar;

use crate::compose::{CompositionSession, FormatAction, byte_offset};

/// Cursor plus optional selection anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Cursor position
    pub cursor: usize,
    /// Other end of the selection, if any
    pub anchor: Option<usize>,
}

impl EditorState {
    /// Selection as `(start, end)`; collapsed when nothing is selected
    pub fn selection(&self) -> (usize, usize) {
        match self.anchor {
            Some(anchor) => (anchor.min(self.cursor), anchor.max(self.cursor)),
            None => (self.cursor, self.cursor),
        }
    }

    /// Place the cursor at `pos` without a selection
    pub fn collapse_to(&mut self, pos: usize) {
        self.cursor = pos;
        self.anchor = None;
    }

    /// Keep positions inside a body of `len` chars
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    /// Replace the selection with `s`
    pub fn insert_str(&mut self, session: &mut CompositionSession, s: &str) {
        let (start, end) = self.selection();
        let text = session.text();
        let mut next = String::with_capacity(text.len() + s.len());
        next.push_str(&text[..byte_offset(text, start)]);
        next.push_str(s);
        next.push_str(&text[byte_offset(text, end)..]);
        session.set_text(next);
        self.collapse_to(start + s.chars().count());
    }

    /// Delete the selection or the char before the cursor
    pub fn backspace(&mut self, session: &mut CompositionSession) {
        let (start, end) = self.selection();
        if start == end {
            if start == 0 {
                return;
            }
            self.remove_range(session, start - 1, start);
        } else {
            self.remove_range(session, start, end);
        }
    }

    /// Delete the selection or the char after the cursor
    pub fn delete(&mut self, session: &mut CompositionSession) {
        let (start, end) = self.selection();
        if start == end {
            if start >= session.char_count() {
                return;
            }
            self.remove_range(session, start, start + 1);
        } else {
            self.remove_range(session, start, end);
        }
    }

    fn remove_range(&mut self, session: &mut CompositionSession, start: usize, end: usize) {
        let text = session.text();
        let next = format!(
            "{}{}",
            &text[..byte_offset(text, start)],
            &text[byte_offset(text, end)..]
        );
        session.set_text(next);
        self.collapse_to(start);
    }

    /// Move left; `extend` grows the selection
    pub fn move_left(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move right within a body of `len` chars
    pub fn move_right(&mut self, extend: bool, len: usize) {
        self.begin_move(extend);
        self.cursor = (self.cursor + 1).min(len);
    }

    /// Jump to the start of the current line
    pub fn home(&mut self, text: &str, extend: bool) {
        self.begin_move(extend);
        let before: Vec<char> = text.chars().take(self.cursor).collect();
        self.cursor = before
            .iter()
            .rposition(|c| *c == '\n')
            .map_or(0, |i| i + 1);
    }

    /// Jump to the end of the current line
    pub fn end(&mut self, text: &str, extend: bool) {
        self.begin_move(extend);
        let rest = text.chars().skip(self.cursor).take_while(|c| *c != '\n').count();
        self.cursor += rest;
    }

    /// Select the whole body
    pub fn select_all(&mut self, len: usize) {
        self.anchor = Some(0);
        self.cursor = len;
    }

    /// Run a toolbar action on the selection
    pub fn apply(&mut self, session: &mut CompositionSession, action: &FormatAction) {
        let (start, end) = self.selection();
        let (new_start, new_end) = session.apply_formatting(action, start, end);
        if new_start == new_end {
            self.collapse_to(new_end);
        } else {
            self.anchor = Some(new_start);
            self.cursor = new_end;
        }
    }

    fn begin_move(&mut self, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
    }
}

/// One screen row of the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow {
    /// Char offset of the first char on the row
    pub start: usize,
    /// Chars on the row (no newline)
    pub chars: Vec<char>,
}

/// Split a body into screen rows no wider than `width` cells
pub fn visual_rows(text: &str, width: usize) -> Vec<VisualRow> {
    let width = width.max(1);
    let mut rows = vec![VisualRow {
        start: 0,
        chars: Vec::new(),
    }];
    let mut row_width = 0;

    for (i, c) in text.chars().enumerate() {
        if c == '\n' {
            rows.push(VisualRow {
                start: i + 1,
                chars: Vec::new(),
            });
            row_width = 0;
            continue;
        }

        let w = c.width().unwrap_or(0);
        let needs_wrap = rows.last().is_some_and(|r| !r.chars.is_empty()) && row_width + w > width;
        if needs_wrap {
            rows.push(VisualRow {
                start: i,
                chars: Vec::new(),
            });
            row_width = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.chars.push(c);
        }
        row_width += w;
    }

    rows
}

/// Screen cell `(row, column)` of a cursor position
pub fn cursor_cell(rows: &[VisualRow], cursor: usize) -> (usize, usize) {
    let row = rows.iter().rposition(|r| r.start <= cursor).unwrap_or(0);
    let col = rows.get(row).map_or(0, |r| {
        r.chars
            .iter()
            .take(cursor - r.start)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    });
    (row, col)
}
