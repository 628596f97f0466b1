//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

use super::async_ops::AsyncCommand;
use super::state::{AppState, Focus, Mode, Prompt};
use crate::compose::FormatAction;
use crate::images::FileInput;
use crate::models::{Platform, Severity};

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    // Handle mode-specific input first
    match state.mode {
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::Prompt(prompt) => return handle_prompt_key(state, prompt, key),
        Mode::Normal => {}
    }

    // Global shortcuts
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => {
            state.should_quit = true;
            return None;
        }
        (_, KeyCode::F(1)) => {
            state.mode = Mode::Help;
            return None;
        }
        (_, KeyCode::Tab) => {
            state.focus = state.focus.next();
            return None;
        }
        (_, KeyCode::BackTab) => {
            state.focus = state.focus.prev();
            return None;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
            return state
                .begin_publish()
                .map(|request| AsyncCommand::Publish { request });
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
            state.save_draft();
            return None;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
            state.schedule();
            return None;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('g')) => {
            return state
                .begin_suggest()
                .map(|(content, request)| AsyncCommand::Suggest { content, request });
        }
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
            state.open_prompt(Prompt::AttachPaths);
            return None;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
            state.next_theme();
            let name = state.theme.name();
            state.notify(Severity::Info, format!("Theme: {name}"));
            return None;
        }
        // Alt+1..6 toggles platforms in display order
        (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='6')) => {
            let index = c as usize - '1' as usize;
            if let Some(platform) = Platform::all().get(index).copied() {
                state.flip_platform(platform);
            }
            return None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Editor => handle_editor_key(state, key),
        Focus::Platforms => {
            handle_platforms_key(state, key);
            None
        }
        Focus::Images => {
            handle_images_key(state, key);
            None
        }
        Focus::Preview => {
            handle_preview_key(state, key);
            None
        }
    }
}

fn handle_editor_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    let len = state.session.char_count();

    match (key.modifiers, key.code) {
        // Toolbar
        (KeyModifiers::ALT, KeyCode::Char('b')) => {
            state.editor.apply(&mut state.session, &FormatAction::Bold);
        }
        (KeyModifiers::ALT, KeyCode::Char('i')) => {
            state.editor.apply(&mut state.session, &FormatAction::Italic);
        }
        (KeyModifiers::ALT, KeyCode::Char('e')) => {
            state.editor.apply(&mut state.session, &FormatAction::Emoji);
        }
        (KeyModifiers::ALT, KeyCode::Char('k')) => {
            state.open_prompt(Prompt::LinkUrl);
        }

        (KeyModifiers::CONTROL, KeyCode::Char('a')) => state.editor.select_all(len),
        (_, KeyCode::Left) => state.editor.move_left(extend),
        (_, KeyCode::Right) => state.editor.move_right(extend, len),
        (_, KeyCode::Home) => {
            let text = state.session.text().to_string();
            state.editor.home(&text, extend);
        }
        (_, KeyCode::End) => {
            let text = state.session.text().to_string();
            state.editor.end(&text, extend);
        }
        (_, KeyCode::Backspace) => state.editor.backspace(&mut state.session),
        (_, KeyCode::Delete) => state.editor.delete(&mut state.session),
        (_, KeyCode::Enter) => state.editor.insert_str(&mut state.session, "\n"),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let mut buf = [0u8; 4];
            state.editor.insert_str(&mut state.session, c.encode_utf8(&mut buf));
        }
        _ => {}
    }
    None
}

fn handle_platforms_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.select_next_platform(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev_platform(),
        KeyCode::Char(' ') | KeyCode::Enter => state.toggle_highlighted_platform(),
        _ => {}
    }
}

fn handle_images_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.select_next_image(),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev_image(),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
            state.remove_highlighted_image();
        }
        KeyCode::Char('a') => state.open_prompt(Prompt::AttachPaths),
        _ => {}
    }
}

fn handle_preview_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => state.cycle_tab(true),
        KeyCode::Char('h') | KeyCode::Left => state.cycle_tab(false),
        _ => {}
    }
}

fn handle_prompt_key(state: &mut AppState, prompt: Prompt, key: KeyEvent) -> Option<AsyncCommand> {
    match key.code {
        KeyCode::Esc => {
            state.close_prompt();
            None
        }
        KeyCode::Backspace => {
            state.prompt_input.pop();
            None
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut state.prompt_input);
            state.close_prompt();
            submit_prompt(state, prompt, input.trim())
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.prompt_input.push(c);
            None
        }
        _ => None,
    }
}

fn submit_prompt(state: &mut AppState, prompt: Prompt, input: &str) -> Option<AsyncCommand> {
    match prompt {
        Prompt::LinkUrl => {
            state.editor.apply(
                &mut state.session,
                &FormatAction::Link {
                    url: input.to_string(),
                },
            );
            None
        }
        Prompt::AttachPaths => {
            let files: Vec<FileInput> = parse_paths(input)
                .into_iter()
                .map(FileInput::from_path)
                .collect();
            if files.is_empty() {
                return None;
            }
            state.attaching += 1;
            Some(AsyncCommand::Attach { files })
        }
    }
}

/// Split a comma separated path list, expanding a leading `~`
fn parse_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(s), |home| home.join(rest)),
            None => PathBuf::from(s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::DraftStore;

    fn state() -> AppState {
        AppState::new(Config::default(), DraftStore::open_in_memory().unwrap()).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_goes_to_editor() {
        let mut state = state();
        type_str(&mut state, "Hi q");
        assert_eq!(state.session.text(), "Hi q");
        assert!(!state.should_quit);

        handle_key(&mut state, with(KeyModifiers::CONTROL, KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_bold_shortcut_wraps_selection() {
        let mut state = state();
        type_str(&mut state, "Hello world");
        handle_key(&mut state, key(KeyCode::Home));
        for _ in 0..5 {
            handle_key(&mut state, with(KeyModifiers::SHIFT, KeyCode::Right));
        }
        handle_key(&mut state, with(KeyModifiers::ALT, KeyCode::Char('b')));
        assert_eq!(state.session.text(), "**Hello** world");
        assert_eq!(state.editor.selection(), (2, 7));
    }

    #[test]
    fn test_link_prompt_inserts_link() {
        let mut state = state();
        type_str(&mut state, "see ");
        handle_key(&mut state, with(KeyModifiers::ALT, KeyCode::Char('k')));
        assert_eq!(state.mode, Mode::Prompt(Prompt::LinkUrl));

        type_str(&mut state, "https://x.io");
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.session.text(), "see [link](https://x.io)");
    }

    #[test]
    fn test_publish_shortcut() {
        let mut state = state();
        let cmd = handle_key(&mut state, with(KeyModifiers::CONTROL, KeyCode::Char('p')));
        assert!(cmd.is_none());
        assert_eq!(state.notifications.latest().unwrap().severity, Severity::Error);

        type_str(&mut state, "Launch day");
        let cmd = handle_key(&mut state, with(KeyModifiers::CONTROL, KeyCode::Char('p')));
        match cmd {
            Some(AsyncCommand::Publish { request }) => {
                assert_eq!(request.platforms, vec![Platform::Pinterest, Platform::Facebook]);
                assert_eq!(request.content, "Launch day");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_alt_digit_toggles_platform() {
        let mut state = state();
        handle_key(&mut state, with(KeyModifiers::ALT, KeyCode::Char('3')));
        assert!(state.session.selected_platforms().contains(Platform::Instagram));
        handle_key(&mut state, with(KeyModifiers::ALT, KeyCode::Char('1')));
        assert!(!state.session.selected_platforms().contains(Platform::Pinterest));
    }

    #[test]
    fn test_focus_cycle_and_platform_list() {
        let mut state = state();
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, Focus::Platforms);
        handle_key(&mut state, key(KeyCode::Char('j')));
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(!state.session.selected_platforms().contains(Platform::Facebook));

        handle_key(&mut state, key(KeyCode::BackTab));
        assert_eq!(state.focus, Focus::Editor);
    }

    #[test]
    fn test_suggest_only_once_while_thinking() {
        let mut state = state();
        type_str(&mut state, "mugs");
        let first = handle_key(&mut state, with(KeyModifiers::CONTROL, KeyCode::Char('g')));
        assert!(matches!(first, Some(AsyncCommand::Suggest { .. })));
        let second = handle_key(&mut state, with(KeyModifiers::CONTROL, KeyCode::Char('g')));
        assert!(second.is_none());
    }

    #[test]
    fn test_attach_prompt_builds_command() {
        let mut state = state();
        handle_key(&mut state, with(KeyModifiers::CONTROL, KeyCode::Char('o')));
        type_str(&mut state, "a.png, ,b.jpg");
        match handle_key(&mut state, key(KeyCode::Enter)) {
            Some(AsyncCommand::Attach { files }) => {
                let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["a.png", "b.jpg"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(state.attaching, 1);
    }

    #[test]
    fn test_parse_paths_expands_home() {
        let paths = parse_paths("~/pic.png");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(paths, vec![home.join("pic.png")]);
        }
    }
}
