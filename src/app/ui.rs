//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::editor::{cursor_cell, visual_rows};
use super::state::{AppState, Focus, Mode};
use crate::compose::{CHAR_LIMIT, PreviewImage};
use crate::models::Platform;
use crate::theme::ThemeColors;

/// App icon
const ICON: &str = "🔗";

/// Spinner animation frames
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_title_bar(frame, state, chunks[0]);
    render_main(frame, state, chunks[1]);
    render_status_bar(frame, state, chunks[2]);
    render_notifications(frame, state, chunks[1]);

    // Render modal dialogs
    match state.mode {
        Mode::Help => render_help_popup(frame, state),
        Mode::Prompt(_) => render_prompt_popup(frame, state),
        Mode::Normal => {}
    }
}

fn panel_block<'a>(colors: &ThemeColors, title: &'a str, focused: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            colors.block_focus()
        } else {
            colors.block()
        })
}

fn render_title_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let button = state.publish_button();
    let ai = state.ai_status;

    let ai_style = match ai {
        crate::ai::AiStatus::Ready => colors.text_muted(),
        crate::ai::AiStatus::Thinking => colors.text_warning(),
        crate::ai::AiStatus::Enhanced => colors.text_success(),
        crate::ai::AiStatus::Error => colors.text_error(),
    };
    let button_style = if button.enabled {
        colors.selected()
    } else {
        colors.text_dim()
    };

    let line = Line::from(vec![
        Span::styled(format!(" {ICON} LinkerLab "), colors.logo_style_primary()),
        Span::styled("Composer", colors.logo_style_secondary()),
        Span::styled("   ", Style::default()),
        Span::styled(format!("{} {}", ai.icon(), ai.label()), ai_style),
        Span::styled("   ", Style::default()),
        Span::styled(format!(" {} ", button.label), button_style),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block()),
    );
    frame.render_widget(bar, area);
}

fn render_main(frame: &mut Frame, state: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Platforms
            Constraint::Min(6),    // Editor
            Constraint::Length(6), // Images
        ])
        .split(columns[0]);

    render_platforms(frame, state, left[0]);
    render_editor(frame, state, left[1]);
    render_images(frame, state, left[2]);
    render_preview(frame, state, columns[1]);
}

fn render_platforms(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let selected = state.session.selected_platforms();

    let items: Vec<ListItem> = Platform::all()
        .iter()
        .enumerate()
        .map(|(i, platform)| {
            let checked = selected.contains(*platform);
            let mark = if checked { "[x]" } else { "[ ]" };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {mark} "), colors.text_dim()),
                Span::styled(format!("{} ", platform.emoji()), Style::default()),
                Span::styled(
                    platform.name(),
                    if checked {
                        colors.platform(*platform).add_modifier(Modifier::BOLD)
                    } else {
                        colors.text_muted()
                    },
                ),
                Span::styled(format!("  Alt+{}", i + 1), colors.text_muted()),
            ]))
        })
        .collect();

    let focused = state.focus == Focus::Platforms;
    let list = List::new(items)
        .block(panel_block(&colors, " Platforms ", focused))
        .highlight_style(if focused {
            colors.selected()
        } else {
            Style::default()
        });

    let mut list_state = ListState::default().with_selected(Some(state.platform_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_editor(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let focused = state.focus == Focus::Editor;

    let count = state.session.char_count();
    let counter = format!(" {count}/{CHAR_LIMIT} ");
    let block = panel_block(&colors, " ✏️  Compose ", focused).title_bottom(
        Line::from(Span::styled(
            counter,
            colors.char_count(state.session.char_count_class()),
        ))
        .alignment(Alignment::Right),
    );

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let rows = visual_rows(state.session.text(), inner.width as usize);
    let (cursor_row, cursor_col) = cursor_cell(&rows, state.editor.cursor);
    let height = inner.height as usize;
    let scroll = cursor_row.saturating_sub(height.saturating_sub(1));
    let (sel_start, sel_end) = state.editor.selection();

    let lines: Vec<Line> = if state.session.text().is_empty() {
        vec![Line::from(Span::styled(
            "What would you like to share?",
            colors.text_muted(),
        ))]
    } else {
        rows.iter()
            .skip(scroll)
            .take(height)
            .map(|row| {
                let spans: Vec<Span> = row
                    .chars
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        let pos = row.start + i;
                        let style = if pos >= sel_start && pos < sel_end {
                            colors.selected()
                        } else {
                            colors.text()
                        };
                        Span::styled(c.to_string(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && state.mode == Mode::Normal {
        let x = inner.x + u16::try_from(cursor_col).unwrap_or(u16::MAX).min(inner.width - 1);
        let y = inner.y + u16::try_from(cursor_row - scroll).unwrap_or(0);
        frame.set_cursor_position((x, y));
    }
}

fn render_images(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let focused = state.focus == Focus::Images;
    let title = if state.attaching > 0 {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!(" 🖼  Images {} ", SPINNER[frame_idx])
    } else {
        format!(" 🖼  Images ({}) ", state.session.images().len())
    };

    if state.session.images().is_empty() {
        let hint = Paragraph::new(Line::from(vec![
            Span::styled(" Ctrl+O", colors.key_hint()),
            Span::styled(" to attach images", colors.text_muted()),
        ]))
        .block(panel_block(&colors, &title, focused));
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = state
        .session
        .images()
        .iter()
        .map(|img| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", img.name), colors.text()),
                Span::styled(
                    format!("{} · {}", img.media_type, format_size(img.payload_len())),
                    colors.text_muted(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel_block(&colors, &title, focused))
        .highlight_style(if focused {
            colors.selected()
        } else {
            Style::default()
        });
    let mut list_state = ListState::default().with_selected(Some(state.image_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let focused = state.focus == Focus::Preview;
    let block = panel_block(&colors, " 👁  Preview ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let tabs = state.session.preview_tabs(state.active_tab);
    let Some(preview) = state.current_preview() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select a platform to see a preview",
                colors.text_muted(),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    };

    let titles: Vec<Line> = tabs
        .iter()
        .map(|t| Line::from(format!("{} {}", t.platform.emoji(), t.label())))
        .collect();
    let selected = tabs.iter().position(|t| t.active).unwrap_or(0);
    let tab_bar = Tabs::new(titles)
        .select(selected)
        .style(colors.tab())
        .highlight_style(colors.tab_active())
        .divider(Span::styled(" │ ", colors.text_muted()));
    frame.render_widget(tab_bar, chunks[0]);

    let brand = colors.platform(preview.platform);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", preview.platform.emoji()), Style::default()),
            Span::styled(preview.platform.name(), brand.add_modifier(Modifier::BOLD)),
            Span::styled(format!("  .{}", preview.style_class), colors.text_muted()),
        ]),
        Line::from(""),
    ];

    let text_style = if state.session.text().is_empty() {
        colors.text_muted()
    } else {
        colors.text()
    };
    let width = chunks[1].width.saturating_sub(4).max(1) as usize;
    for line in textwrap::wrap(&preview.display_text, width) {
        lines.push(Line::from(Span::styled(line.into_owned(), text_style)));
    }
    lines.push(Line::from(""));

    match &preview.image {
        PreviewImage::Image(_) => {
            let (name, size) = state
                .session
                .images()
                .first()
                .map(|img| (img.name.as_str(), format_size(img.payload_len())))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled("🖼  ", Style::default()),
                Span::styled(name.to_string(), brand),
                Span::styled(format!("  {size}"), colors.text_muted()),
            ]));
        }
        PreviewImage::Placeholder(placeholder) => {
            lines.push(Line::from(Span::styled(
                format!("▫ {placeholder}"),
                colors.text_muted(),
            )));
        }
    }

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(brand),
    );
    frame.render_widget(card, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let loading_indicator = if state.is_busy() {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!("{} ", SPINNER[frame_idx])
    } else {
        String::new()
    };

    let content = vec![
        Span::styled(" ", Style::default()),
        Span::styled(loading_indicator, colors.text_secondary()),
        Span::styled("Tab", colors.key_hint()),
        Span::styled(": panels  ", colors.text_muted()),
        Span::styled("^P", colors.key_hint()),
        Span::styled(": publish  ", colors.text_muted()),
        Span::styled("^S", colors.key_hint()),
        Span::styled(": save  ", colors.text_muted()),
        Span::styled("^G", colors.key_hint()),
        Span::styled(": AI  ", colors.text_muted()),
        Span::styled("F1", colors.key_hint()),
        Span::styled(": help  ", colors.text_muted()),
        Span::styled("^Q", colors.key_hint()),
        Span::styled(": quit", colors.text_muted()),
    ];

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

/// Toasts stacked in the top-right corner, newest at the bottom
fn render_notifications(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let width = area.width.min(44);
    let mut y = area.y + 1;

    for note in state.notifications.iter() {
        if y + 3 > area.y + area.height {
            break;
        }
        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        let style = colors.notification(note.severity);
        let toast = Paragraph::new(Line::from(format!(
            " {} {}",
            note.severity.icon(),
            note.message
        )))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style),
        );
        frame.render_widget(Clear, toast_area);
        frame.render_widget(toast, toast_area);
        y += 3;
    }
}

fn help_line<'a>(colors: &ThemeColors, keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {keys:<17}"), colors.key_hint()),
        Span::styled(action, colors.text()),
    ])
}

fn help_heading<'a>(colors: &ThemeColors, title: &'a str) -> Line<'a> {
    Line::from(vec![Span::styled(
        format!("  {title}"),
        colors.text_primary().add_modifier(Modifier::BOLD),
    )])
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 80, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let help_content = vec![
        Line::from(""),
        help_heading(&colors, "Post"),
        help_line(&colors, "Ctrl+P", "Publish to selected platforms"),
        help_line(&colors, "Ctrl+S", "Save draft"),
        help_line(&colors, "Ctrl+R", "Schedule"),
        help_line(&colors, "Ctrl+G", "AI suggestion"),
        help_line(&colors, "Ctrl+O", "Attach images"),
        help_line(&colors, "Alt+1..6", "Toggle platform"),
        Line::from(""),
        help_heading(&colors, "Editor"),
        help_line(&colors, "Alt+B / Alt+I", "Bold / italic"),
        help_line(&colors, "Alt+K", "Insert link"),
        help_line(&colors, "Alt+E", "Insert emoji"),
        help_line(&colors, "Shift+←/→", "Extend selection"),
        help_line(&colors, "Ctrl+A", "Select all"),
        Line::from(""),
        help_heading(&colors, "Panels"),
        help_line(&colors, "Tab / Shift+Tab", "Switch panel"),
        help_line(&colors, "j/k, Space", "Move, toggle platform"),
        help_line(&colors, "d", "Remove image"),
        help_line(&colors, "h/l", "Switch preview tab"),
        Line::from(""),
        help_heading(&colors, "General"),
        help_line(&colors, "Ctrl+T", "Next theme"),
        help_line(&colors, "F1 / Esc", "Toggle help"),
        help_line(&colors, "Ctrl+Q", "Quit"),
    ];

    let help = Paragraph::new(help_content).block(
        Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus()),
    );
    frame.render_widget(help, popup_area);
}

fn render_prompt_popup(frame: &mut Frame, state: &AppState) {
    let Mode::Prompt(prompt) = state.mode else {
        return;
    };
    let colors = state.theme.colors();
    let area = frame.area();
    let width = (area.width * 60 / 100).max(20);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(5) / 2,
        width: width.min(area.width),
        height: 5.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let input = if state.prompt_input.is_empty() {
        Span::styled(prompt.hint(), colors.text_muted())
    } else {
        Span::styled(state.prompt_input.as_str(), colors.text())
    };
    let content = vec![
        Line::from(vec![Span::styled(" › ", colors.text_primary()), input]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter", colors.key_hint()),
            Span::styled(" confirm  ", colors.text_muted()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(" cancel", colors.text_muted()),
        ]),
    ];

    let popup = Paragraph::new(content).block(
        Block::default()
            .title(prompt.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg_secondary)),
    );
    frame.render_widget(popup, popup_area);

    let typed = unicode_width::UnicodeWidthStr::width(state.prompt_input.as_str());
    let x = popup_area.x + 4 + u16::try_from(typed).unwrap_or(u16::MAX);
    frame.set_cursor_position((x.min(popup_area.right().saturating_sub(2)), popup_area.y + 1));
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Helper function to create a centered rect
const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::DraftStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_shows_preview_and_button() {
        let mut state =
            AppState::new(Config::default(), DraftStore::open_in_memory().unwrap()).unwrap();
        state.session.set_text("Fresh batch of mugs");

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Publish to 2 Platforms"));
        assert!(text.contains("Fresh batch of mugs"));
        assert!(text.contains("No image selected"));
        assert!(text.contains("19/250"));
    }

    #[test]
    fn test_render_without_platforms() {
        let mut state =
            AppState::new(Config::default(), DraftStore::open_in_memory().unwrap()).unwrap();
        state.flip_platform(Platform::Pinterest);
        state.flip_platform(Platform::Facebook);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Select Platforms First"));
        assert!(text.contains("Select a platform to see a preview"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_placeholder_muted_with_image_only() {
        let mut state =
            AppState::new(Config::default(), DraftStore::open_in_memory().unwrap()).unwrap();
        state.session.attach(crate::models::ImageAttachment::new(
            "cover.png",
            "image/png",
            "data:image/png;base64,AA",
        ));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let word: Vec<&str> = "Your post".split("").filter(|s| !s.is_empty()).collect();
        let start = (0..buffer.area.height)
            .flat_map(|y| (60..buffer.area.width - 9).map(move |x| (x, y)))
            .find(|&(x, y)| {
                word.iter()
                    .enumerate()
                    .all(|(i, ch)| buffer[(x + i as u16, y)].symbol() == *ch)
            })
            .expect("placeholder rendered in the preview");

        let muted = state.theme.colors().text_muted().fg;
        assert_eq!(Some(buffer[start].fg), muted);
        assert!(buffer_text(&terminal).contains("cover.png"));
    }
}
