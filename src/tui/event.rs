//! Event handling for TUI

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Editor events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    /// Handle to the event task for cleanup
    task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler polling the terminal every `poll_rate`
    pub fn new(poll_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(100);

        let task = tokio::spawn(async move {
            loop {
                let ready = tokio::task::spawn_blocking(move || {
                    event::poll(poll_rate).unwrap_or(false)
                })
                .await
                .unwrap_or(false);

                if !ready {
                    if tx.is_closed() {
                        break;
                    }
                    continue;
                }

                let app_event = match event::read() {
                    // Windows reports both press and release
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(AppEvent::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    _ => None,
                };

                if let Some(event) = app_event {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, task }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.task.abort();
    }
}
