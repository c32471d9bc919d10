//! Prompt templates for AI generation

use crate::core::context::ProjectContext;

/// Default instructions for the short-form commit prompt
pub const SIMPLE_INSTRUCTIONS: &str = r#"Analyze the following git diff and generate a Conventional Commit message that accurately describes the changes made.
- The message must be concise and informative, following the Conventional Commits format.
- The commit message should not exceed 150 characters in the subject line.
- Use imperative mood (e.g., "fix bug" instead of "fixed bug").
- Include a scope if relevant (e.g., "feat(auth): add login validation").
- If the commit fixes a bug, use "fix".
- If the commit introduces a new feature, use "feat".
- If the commit includes refactoring, use "refactor".
- If the commit adds tests, use "test".
- If the commit updates documentation, use "docs".
- Do not include unnecessary details; keep it clear and to the point."#;

/// Instructions for the structured commit prompt
const DETAILED_INSTRUCTIONS: &str = r#"Analyze the following git diff and describe it as a Conventional Commit.
- "type" is one of: feat, fix, refactor, test, docs, chore, style, perf, build, ci.
- "scope" is a short noun for the affected area, or null if none applies.
- "description" is the subject in imperative mood, lowercase, no trailing period, at most 150 characters.
- "body" explains what changed and why, or null if the subject says enough.
- "breakingChanges" is true only if the change breaks existing behavior or APIs.

Respond with exactly one JSON object and nothing else:
{"type": "feat", "scope": null, "description": "...", "body": null, "breakingChanges": false}

Do not wrap the JSON in markdown code fences. Do not add commentary before or after it."#;

/// Build the short-form commit prompt.
///
/// A non-blank `custom_template` replaces the default instructions entirely.
/// The diff is always appended verbatim.
pub fn simple_commit_prompt(
    diff: &str,
    context: &ProjectContext,
    custom_template: Option<&str>,
) -> String {
    let instructions = custom_template
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(SIMPLE_INSTRUCTIONS);

    assemble(instructions, diff, context)
}

/// Build the structured (JSON) commit prompt
pub fn detailed_commit_prompt(diff: &str, context: &ProjectContext) -> String {
    assemble(DETAILED_INSTRUCTIONS, diff, context)
}

fn assemble(instructions: &str, diff: &str, context: &ProjectContext) -> String {
    let mut prompt = String::with_capacity(instructions.len() + diff.len() + 256);
    prompt.push_str(instructions);

    let rendered = context.render();
    if !rendered.is_empty() {
        prompt.push_str("\n\nProject context:\n");
        prompt.push_str(&rendered);
    }

    prompt.push_str("\n\nHere is the git diff:\n\n");
    prompt.push_str(diff);
    prompt
}
