//! gemcommit - AI-generated commit messages from staged changes
//!
//! This library provides the commit message pipeline (diff, context, prompt,
//! generation, normalization, review) together with its CLI and TUI
//! front ends.

pub mod ai;
pub mod cli;
pub mod core;
pub mod error;
pub mod tui;

pub use error::{GemcommitError, Result};
