//! Commit message generation pipeline
//!
//! One parameterized flow drives every generation command:
//!
//! ```text
//! staged diff ─▶ empty? ─▶ context ─▶ prompt ─▶ generate ─▶ normalize
//!                  │                                           │
//!                  ▼                              Simple: optional edit
//!            NoStagedChanges                     Detailed: review draft
//!                                                              │
//!                                        cancel ◀──────────────┤
//!                                                              ▼
//!                                               sink + history record
//! ```
//!
//! Only prompt building and normalization differ between the two modes.
//! Every collaborator is injected so the flow can run against fakes.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::ai::diff::changed_files;
use crate::ai::draft::CommitDraft;
use crate::ai::gemini::{GenerationRequest, TextGenerator};
use crate::ai::normalize::{normalize_detailed, normalize_simple};
use crate::ai::prompts;
use crate::core::config::Settings;
use crate::core::context::ContextCollector;
use crate::core::git::DiffSource;
use crate::core::history::{HistoryLedger, HistoryStore};
use crate::core::sink::MessageSink;
use crate::error::Result;

/// Which kind of message to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single free-text commit message
    Simple,
    /// A structured draft reviewed field by field
    Detailed,
}

/// How an action ended, when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The message was handed to the sink
    Inserted(String),
    /// Nothing is staged, so nothing was generated
    NoStagedChanges,
    /// The history ledger has no entries to replay
    NoHistory,
    /// The user backed out before the message was finalized
    Cancelled,
}

/// Lets the user adjust a short-form message before insertion
#[async_trait(?Send)]
pub trait MessageEditor {
    /// Return the final message, or None to cancel
    async fn edit(&self, message: &str) -> Result<Option<String>>;
}

/// Presents a structured draft for review
#[async_trait(?Send)]
pub trait DraftPresenter {
    /// Return the finalized message on submit, or None on cancel
    async fn present_draft(&self, draft: CommitDraft) -> Result<Option<String>>;
}

/// Lets the user choose a history entry
#[async_trait(?Send)]
pub trait HistoryPicker {
    /// Return the zero-based index of the chosen entry, or None to cancel
    async fn pick(&self, entries: &[String]) -> Result<Option<usize>>;
}

/// Handles to everything the pipeline talks to
pub struct Collaborators<'a> {
    pub source: &'a dyn DiffSource,
    pub generator: &'a dyn TextGenerator,
    pub sink: &'a dyn MessageSink,
    pub history: &'a dyn HistoryStore,
    pub editor: &'a dyn MessageEditor,
    pub presenter: &'a dyn DraftPresenter,
}

/// Sequences collection, prompting, generation and finalization
pub struct CommitPipeline<'a> {
    settings: Settings,
    collector: ContextCollector,
    source: &'a dyn DiffSource,
    generator: &'a dyn TextGenerator,
    sink: &'a dyn MessageSink,
    ledger: HistoryLedger<&'a dyn HistoryStore>,
    editor: &'a dyn MessageEditor,
    presenter: &'a dyn DraftPresenter,
}

impl<'a> CommitPipeline<'a> {
    pub fn new(settings: Settings, collector: ContextCollector, with: Collaborators<'a>) -> Self {
        Self {
            settings,
            collector,
            source: with.source,
            generator: with.generator,
            sink: with.sink,
            ledger: HistoryLedger::new(with.history),
            editor: with.editor,
            presenter: with.presenter,
        }
    }

    /// Run one user-triggered action.
    ///
    /// Primary-path failures (diff access, generation, the sink) are returned.
    /// Enrichment failures (context, history) are logged and absorbed.
    pub async fn run(&self, mode: Mode) -> Result<Outcome> {
        debug!(?mode, "collecting staged diff");
        let diff = self.source.staged_diff().await?;
        if diff.trim().is_empty() {
            info!("no staged changes, skipping generation");
            return Ok(Outcome::NoStagedChanges);
        }

        debug!(files = changed_files(&diff).len(), "staged changes found");
        let context = self.collector.collect(self.source).await;

        debug!(?mode, context_empty = context.is_empty(), "building prompt");
        let prompt = match mode {
            Mode::Simple => prompts::simple_commit_prompt(
                &diff,
                &context,
                self.settings.custom_prompt.as_deref(),
            ),
            Mode::Detailed => prompts::detailed_commit_prompt(&diff, &context),
        };

        let request = GenerationRequest::new(prompt, self.settings.model.as_str());
        let raw = self.generator.generate(&request).await?;

        let finalized = match mode {
            Mode::Simple => {
                let message = normalize_simple(&raw);
                if self.settings.prompt_before_insert {
                    self.editor.edit(&message).await?
                } else {
                    Some(message)
                }
            }
            Mode::Detailed => {
                let draft = normalize_detailed(&raw, &diff);
                self.presenter.present_draft(draft).await?
            }
        };

        match finalized {
            Some(message) => self.finalize(message).await,
            None => {
                info!(?mode, "cancelled before insertion");
                Ok(Outcome::Cancelled)
            }
        }
    }

    /// Hand the message to the sink, then record it
    async fn finalize(&self, message: String) -> Result<Outcome> {
        self.sink.set_message(&message).await?;

        if message.trim().is_empty() {
            debug!("not recording an empty message in history");
        } else if let Err(e) = self.ledger.record(&message) {
            warn!(error = %e, "could not record commit message in history");
        }

        Ok(Outcome::Inserted(message))
    }
}

/// Let the user pick a past message and hand it to the sink.
///
/// Replaying does not touch the ledger.
pub async fn replay_history<S: HistoryStore>(
    ledger: &HistoryLedger<S>,
    picker: &dyn HistoryPicker,
    sink: &dyn MessageSink,
) -> Result<Outcome> {
    let entries = ledger.list()?;
    if entries.is_empty() {
        return Ok(Outcome::NoHistory);
    }

    let Some(selection) = picker.pick(&entries).await? else {
        return Ok(Outcome::Cancelled);
    };

    match ledger.pick_one(selection)? {
        Some(message) => {
            sink.set_message(&message).await?;
            Ok(Outcome::Inserted(message))
        }
        None => Ok(Outcome::Cancelled),
    }
}
