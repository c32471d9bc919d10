//! CLI module for gemcommit
//!
//! This module contains all CLI command definitions and handlers using clap.

pub mod commands;
pub mod config;
pub mod generate;
pub mod history;
pub mod prompt;

pub use commands::{Cli, Commands};

use std::path::PathBuf;

use crate::core::sink::{MessageFileSink, MessageSink, StdoutSink};

/// Pick the message destination for an `--output` argument
pub(crate) fn sink_for(output: Option<PathBuf>) -> Box<dyn MessageSink> {
    match output {
        Some(path) => Box::new(MessageFileSink::new(path)),
        None => Box::new(StdoutSink),
    }
}
