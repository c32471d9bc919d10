//! History command handler

use crate::cli::commands::HistoryArgs;
use crate::cli::generate::report;
use crate::cli::prompt::TerminalHistoryPicker;
use crate::cli::sink_for;
use crate::core::history::{FileHistoryStore, HistoryLedger};
use crate::core::pipeline::replay_history;
use crate::error::Result;

/// Handle `gemcommit history`
pub async fn handle_history(args: HistoryArgs) -> Result<()> {
    let ledger = HistoryLedger::new(FileHistoryStore::default_location()?);

    if args.list {
        let entries = ledger.list()?;
        if entries.is_empty() {
            eprintln!("No commit messages in history yet.");
        }
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", entry);
        }
        return Ok(());
    }

    let sink = sink_for(args.output);
    let outcome = replay_history(&ledger, &TerminalHistoryPicker, sink.as_ref()).await?;
    report(&outcome, sink.as_ref());
    Ok(())
}
