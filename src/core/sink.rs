//! Destinations for a finalized commit message
//!
//! The message either goes to standard output or into a message file, such
//! as the one git passes to a `prepare-commit-msg` hook.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

/// Receives the finalized commit message
#[async_trait(?Send)]
pub trait MessageSink {
    /// Replace the pending commit message with `message`
    async fn set_message(&self, message: &str) -> Result<()>;

    /// Human-readable name of the destination
    fn describe(&self) -> String;
}

/// Writes the message to standard output
pub struct StdoutSink;

#[async_trait(?Send)]
impl MessageSink for StdoutSink {
    async fn set_message(&self, message: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message)?;
        stdout.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        "standard output".to_string()
    }
}

/// Overwrites a commit message file
pub struct MessageFileSink {
    path: PathBuf,
}

impl MessageFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl MessageSink for MessageFileSink {
    async fn set_message(&self, message: &str) -> Result<()> {
        let mut contents = message.to_string();
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
