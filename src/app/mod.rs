//! TUI Application module

mod async_ops;
mod editor;
mod events;
mod state;
mod ui;

pub use state::{AppState, Focus, Mode, Prompt};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::ai::{AiStatus, MockSuggester};
use crate::config::Config;
use crate::models::Severity;
use crate::publish::PublishState;
use crate::store::DraftStore;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, WorkerTimings, spawn_worker};

/// Run the TUI application
pub fn run() -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Load config
    let config = Config::load()?;

    // Open draft store
    let store = DraftStore::open()?;

    // Spawn async worker
    let timings = WorkerTimings::from(&config);
    let suggester = MockSuggester::new(timings.ai_delay);
    let async_handle = rt.block_on(async { spawn_worker(timings, suggester) });

    // Create app state before touching the terminal so errors print normally
    let mut state = AppState::new(config, store)?;

    if state.config.seed_demo_content && state.session.is_empty() {
        let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::SeedDemo);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            handle_async_result(state, result);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(cmd) = events::handle_key(state, key)
        {
            let _ = async_handle.cmd_tx.blocking_send(cmd);
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    // Save config on exit
    state.config.save()?;

    Ok(())
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) {
    match result {
        AsyncResult::Suggested { text } => {
            state.apply_suggestion(text);
            state.notify(Severity::Success, "AI suggestion applied");
        }
        AsyncResult::SuggestFailed { message } => {
            state.ai_status = AiStatus::Error;
            state.notify(Severity::Error, message);
        }
        AsyncResult::AiStatusReset { request } => state.reset_ai_status(request),
        AsyncResult::Published { receipt } => {
            state.publish_state = PublishState::Published;
            state.notify(Severity::Success, receipt.message());
        }
        AsyncResult::PublishReset => {
            if state.publish_state == PublishState::Published {
                state.publish_state = PublishState::Idle;
            }
        }
        AsyncResult::Attached { report } => {
            state.attaching = state.attaching.saturating_sub(1);
            let added = report.added.len();
            for attachment in report.added {
                state.session.attach(attachment);
            }
            for skipped in &report.skipped {
                tracing::warn!("Skipped {}: {}", skipped.name, skipped.reason);
                state.notify(
                    Severity::Warning,
                    format!("Skipped {}: {}", skipped.name, skipped.reason),
                );
            }
            if added > 0 {
                state.notify(Severity::Success, format!("Attached {added} image(s)"));
            }
        }
        AsyncResult::DemoSeeded => state.seed_demo(),
    }
}
