//! CLI command definitions using clap
//!
//! Defines the command structure for the `gemcommit` CLI tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// gemcommit - AI commit messages from your staged changes
///
/// Reads the staged diff, asks Gemini for a commit message and hands the
/// result to standard output or a commit message file.
#[derive(Parser, Debug)]
#[command(name = "gemcommit", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a short commit message for the staged changes
    #[command(visible_alias = "insert")]
    Suggest(SuggestArgs),

    /// Generate a structured conventional commit and review it
    Detailed(DetailedArgs),

    /// Reuse a previously generated commit message
    History(HistoryArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Short-form generation
#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// Write the message to this file instead of standard output
    /// (e.g. the file passed to a prepare-commit-msg hook)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Review and edit the message before it is written
    #[arg(short, long)]
    pub edit: bool,
}

/// Structured generation
#[derive(Parser, Debug)]
pub struct DetailedArgs {
    /// Write the message to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// History Commands
// ─────────────────────────────────────────────────────────────────────────────

/// History commands
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Only print the stored messages
    #[arg(short, long)]
    pub list: bool,

    /// Write the picked message to this file instead of standard output
    #[arg(short, long, value_name = "FILE", conflicts_with = "list")]
    pub output: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration commands
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key
        key: ConfigKey,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: ConfigKey,
    },

    /// Remove a configuration value
    Remove {
        /// Configuration key
        key: ConfigKey,
    },
}

/// Available configuration keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Gemini API key
    #[value(name = "api-key")]
    ApiKey,

    /// Gemini model identifier
    #[value(name = "model")]
    Model,

    /// Instructions replacing the default short-form prompt
    #[value(name = "custom-prompt")]
    CustomPrompt,

    /// Pause to edit short-form messages before they are written
    #[value(name = "prompt-before-insert")]
    PromptBeforeInsert,
}
