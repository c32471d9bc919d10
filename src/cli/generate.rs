//! Generation command handlers

use tracing::debug;

use crate::ai::GeminiClient;
use crate::cli::commands::{DetailedArgs, SuggestArgs};
use crate::cli::prompt::TerminalEditor;
use crate::cli::sink_for;
use crate::core::config::Settings;
use crate::core::context::ContextCollector;
use crate::core::git::GitRepository;
use crate::core::history::FileHistoryStore;
use crate::core::pipeline::{Collaborators, CommitPipeline, Mode, Outcome};
use crate::core::sink::MessageSink;
use crate::error::Result;
use crate::tui::TerminalDraftPresenter;

/// Handle `gemcommit suggest`
pub async fn handle_suggest(args: SuggestArgs) -> Result<()> {
    let mut settings = Settings::load()?;
    if args.edit {
        settings.prompt_before_insert = true;
    }

    let sink = sink_for(args.output);
    run(settings, Mode::Simple, sink.as_ref()).await
}

/// Handle `gemcommit detailed`
pub async fn handle_detailed(args: DetailedArgs) -> Result<()> {
    let settings = Settings::load()?;
    let sink = sink_for(args.output);
    run(settings, Mode::Detailed, sink.as_ref()).await
}

async fn run(settings: Settings, mode: Mode, sink: &dyn MessageSink) -> Result<()> {
    let api_key = settings.require_api_key()?;
    let git = GitRepository::open_current_dir()?;
    let collector = ContextCollector::new(git.root_dir()?);

    let client = GeminiClient::new(api_key);
    let history = FileHistoryStore::default_location()?;
    let editor = TerminalEditor;
    let presenter = TerminalDraftPresenter::new();

    eprintln!("Generating commit message with {}...", settings.model);

    let pipeline = CommitPipeline::new(
        settings,
        collector,
        Collaborators {
            source: &git,
            generator: &client,
            sink,
            history: &history,
            editor: &editor,
            presenter: &presenter,
        },
    );

    let outcome = pipeline.run(mode).await?;
    debug!(?outcome, "generation finished");
    report(&outcome, sink);
    Ok(())
}

/// Print a one-line status for an outcome on standard error
pub(crate) fn report(outcome: &Outcome, sink: &dyn MessageSink) {
    match outcome {
        Outcome::Inserted(message) => {
            eprintln!(
                "✓ Commit message written to {}: {}",
                sink.describe(),
                message.lines().next().unwrap_or("")
            );
        }
        Outcome::NoStagedChanges => {
            eprintln!("No staged changes. Stage files with 'git add' first.");
        }
        Outcome::NoHistory => {
            eprintln!("No commit messages in history yet.");
        }
        Outcome::Cancelled => {
            eprintln!("Cancelled.");
        }
    }
}
