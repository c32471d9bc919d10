//! Custom error types for gemcommit
//!
//! User-friendly error messages for all failure scenarios.

use thiserror::Error;

/// Main error type for the gemcommit application
#[derive(Error, Debug)]
pub enum GemcommitError {
    /// Not running in a git repository
    #[error("No git repository found.\n\n  → Run gemcommit from inside a git working tree.\n  → Run 'git init' to create one.")]
    NotGitRepository,

    /// Gemini API key missing or blank
    #[error("Gemini API key is not set up.\n\n  → Get an API key from https://aistudio.google.com/apikey\n  → Run 'gemcommit config set api-key YOUR_KEY' or export GEMINI_API_KEY.")]
    NotConfigured,

    /// The generation service call failed
    #[error("AI generation failed: {0}\n\n  → Check your internet connection.\n  → Check your API key with 'gemcommit config get api-key'.")]
    GenerationFailed(String),

    /// History ledger could not be read or written
    #[error("Cannot access commit history: {0}")]
    History(String),

    /// Git operation error
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.\n  → Alternatively export GEMINI_API_KEY.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Terminal/TUI error
    #[error("Terminal error: {0}\n\n  → Try resizing your terminal or restarting it.")]
    Terminal(String),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),
}

impl From<keyring::Error> for GemcommitError {
    fn from(err: keyring::Error) -> Self {
        GemcommitError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for GemcommitError {
    fn from(err: toml::de::Error) -> Self {
        GemcommitError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for GemcommitError {
    fn from(err: toml::ser::Error) -> Self {
        GemcommitError::Toml(err.to_string())
    }
}

/// Result type alias using GemcommitError
pub type Result<T> = std::result::Result<T, GemcommitError>;
