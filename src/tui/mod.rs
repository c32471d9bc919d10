//! Terminal User Interface module
//!
//! Full-screen ratatui editor for reviewing a structured commit draft.
//! The terminal is drawn on standard error so the finalized message can
//! still be piped from standard output.

pub mod draft_editor;
pub mod event;
pub mod theme;
pub mod ui;

use std::io::{self, Stderr};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tracing::debug;

use crate::ai::CommitDraft;
use crate::core::pipeline::DraftPresenter;
use crate::error::{GemcommitError, Result};
use crate::tui::draft_editor::{DraftEditor, EditorResult};
use crate::tui::event::{AppEvent, EventHandler};

type Backend = CrosstermBackend<Stderr>;

/// Split a string into lines, preserving trailing empty lines.
///
/// Unlike `str::lines()` which drops trailing newlines, this keeps them as
/// empty strings, so the cursor can sit on an empty trailing line.
pub fn split_lines_preserve_trailing(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Presents drafts in the full-screen editor
#[derive(Debug, Default)]
pub struct TerminalDraftPresenter;

impl TerminalDraftPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<Backend>> {
        enable_raw_mode().map_err(|e| GemcommitError::Terminal(e.to_string()))?;
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen)
            .map_err(|e| GemcommitError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stderr);
        let terminal = Terminal::new(backend).map_err(|e| GemcommitError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
        disable_raw_mode().map_err(|e| GemcommitError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| GemcommitError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| GemcommitError::Terminal(e.to_string()))?;
        Ok(())
    }

    async fn event_loop(terminal: &mut Terminal<Backend>, editor: &mut DraftEditor) -> Result<()> {
        let mut events = EventHandler::new(Duration::from_millis(250));

        while !editor.is_done() {
            terminal
                .draw(|frame| ui::render(frame, editor))
                .map_err(|e| GemcommitError::Terminal(e.to_string()))?;

            match events.next().await {
                Some(AppEvent::Key(key)) => editor.handle_key(key),
                // Resize is handled by the next draw
                Some(AppEvent::Resize(_, _)) => {}
                None => {
                    return Err(GemcommitError::Terminal(
                        "terminal event stream closed".to_string(),
                    ))
                }
            }
        }

        Ok(())
    }
}

#[async_trait(?Send)]
impl DraftPresenter for TerminalDraftPresenter {
    async fn present_draft(&self, draft: CommitDraft) -> Result<Option<String>> {
        let mut editor = DraftEditor::new(draft);
        let mut terminal = Self::setup_terminal()?;

        let outcome = Self::event_loop(&mut terminal, &mut editor).await;
        // Always hand the terminal back, even if the loop failed
        Self::restore_terminal(&mut terminal)?;
        outcome?;

        let message = match editor.result() {
            Some(EditorResult::Submitted(message)) => Some(message.clone()),
            Some(EditorResult::Cancelled) | None => None,
        };
        debug!(submitted = message.is_some(), "draft editor closed");
        Ok(message)
    }
}
