//! Interactive terminal prompts
//!
//! Line-based questions asked on standard error and answered on standard
//! input, so standard output only ever carries the commit message.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;

use crate::core::pipeline::{HistoryPicker, MessageEditor};
use crate::error::Result;

const RULE: &str = "─────────────────────────────────────";

/// Asks `Use this message? [Y/n/e(dit)]` before insertion
#[derive(Debug, Default)]
pub struct TerminalEditor;

#[async_trait(?Send)]
impl MessageEditor for TerminalEditor {
    async fn edit(&self, message: &str) -> Result<Option<String>> {
        let stdin = io::stdin();
        confirm_or_edit(&mut stdin.lock(), &mut io::stderr(), message)
    }
}

/// Numbered list of past messages, picked by number
#[derive(Debug, Default)]
pub struct TerminalHistoryPicker;

#[async_trait(?Send)]
impl HistoryPicker for TerminalHistoryPicker {
    async fn pick(&self, entries: &[String]) -> Result<Option<usize>> {
        let stdin = io::stdin();
        pick_entry(&mut stdin.lock(), &mut io::stderr(), entries)
    }
}

pub(crate) fn confirm_or_edit<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    writeln!(output, "\nGenerated message:")?;
    writeln!(output, "{}", RULE)?;
    writeln!(output, "{}", message)?;
    writeln!(output, "{}", RULE)?;

    write!(output, "\nUse this message? [Y/n/e(dit)] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        // Closed stdin, e.g. under a git hook
        return Ok(None);
    }

    match answer.trim().to_lowercase().as_str() {
        "" | "y" | "yes" => Ok(Some(message.to_string())),
        "e" | "edit" => {
            writeln!(output, "Edit the message (end with empty line):")?;
            let mut lines: Vec<String> = Vec::new();
            loop {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    break;
                }
                let trimmed = line.trim_end();
                if trimmed.is_empty() {
                    if lines.is_empty() {
                        continue;
                    }
                    break;
                }
                lines.push(trimmed.to_string());
            }

            if lines.is_empty() {
                Ok(None)
            } else {
                Ok(Some(lines.join("\n")))
            }
        }
        _ => Ok(None),
    }
}

pub(crate) fn pick_entry<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    entries: &[String],
) -> Result<Option<usize>> {
    writeln!(output, "Recent commit messages:")?;
    for (i, entry) in entries.iter().enumerate() {
        let subject = entry.lines().next().unwrap_or("");
        writeln!(output, "  {:>2}. {}", i + 1, subject)?;
    }

    loop {
        write!(output, "\nPick a message [1-{}] (empty to cancel): ", entries.len())?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=entries.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(output, "Please enter a number between 1 and {}.", entries.len())?,
        }
    }
}
