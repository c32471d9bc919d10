//! Core functionality for gemcommit
//!
//! This module contains the commit pipeline and its collaborators:
//! - Git repository access
//! - Project context collection
//! - Application configuration and credentials
//! - Commit message history
//! - Message sinks
//! - The generation pipeline itself

pub mod config;
pub mod context;
pub mod credentials;
pub mod git;
pub mod history;
pub mod pipeline;
pub mod sink;

pub use config::{Config, Settings};
pub use context::{ContextCollector, ProjectContext};
pub use credentials::CredentialStore;
pub use git::{DiffSource, GitRepository};
pub use history::{FileHistoryStore, HistoryLedger, HistoryStore};
pub use pipeline::{CommitPipeline, Mode, Outcome};
pub use sink::{MessageFileSink, MessageSink, StdoutSink};
