//! Draft review editor state
//!
//! Holds the editable parts of a [`CommitDraft`] and applies key presses to
//! them. Rendering lives in [`crate::tui::ui`]; nothing here touches the
//! terminal, so the editing rules are testable on their own.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ai::draft::CommitDraft;

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Scope,
    Description,
    Body,
    Breaking,
    Submit,
}

impl Field {
    const ORDER: [Field; 6] = [
        Field::Type,
        Field::Scope,
        Field::Description,
        Field::Body,
        Field::Breaking,
        Field::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// How the editor was closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorResult {
    Submitted(String),
    Cancelled,
}

/// Editable form over a commit draft
#[derive(Debug, Clone)]
pub struct DraftEditor {
    pub commit_type: String,
    pub scope: String,
    pub description: String,
    pub body: String,
    pub breaking: bool,
    pub field: Field,
    pub status_message: Option<String>,
    result: Option<EditorResult>,
}

impl DraftEditor {
    pub fn new(draft: CommitDraft) -> Self {
        Self {
            commit_type: draft.commit_type,
            scope: draft.scope.unwrap_or_default(),
            description: draft.description,
            body: draft.body.unwrap_or_default(),
            breaking: draft.breaking_changes,
            field: Field::Description,
            status_message: None,
            result: None,
        }
    }

    /// Current form contents as a draft
    pub fn to_draft(&self) -> CommitDraft {
        CommitDraft {
            commit_type: self.commit_type.trim().to_string(),
            scope: Some(self.scope.trim().to_string()).filter(|s| !s.is_empty()),
            description: self.description.trim().to_string(),
            body: Some(self.body.trim().to_string()).filter(|b| !b.is_empty()),
            breaking_changes: self.breaking,
        }
    }

    /// Live preview of the final message
    pub fn preview(&self) -> String {
        self.to_draft().to_message()
    }

    /// Whether the editor has been submitted or cancelled
    pub fn is_done(&self) -> bool {
        self.result.is_some()
    }

    /// Final result, once done
    pub fn result(&self) -> Option<&EditorResult> {
        self.result.as_ref()
    }

    /// Text of the focused field, if it is a text field
    pub fn focused_text(&self) -> Option<&str> {
        match self.field {
            Field::Type => Some(&self.commit_type),
            Field::Scope => Some(&self.scope),
            Field::Description => Some(&self.description),
            Field::Body => Some(&self.body),
            Field::Breaking | Field::Submit => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Type => Some(&mut self.commit_type),
            Field::Scope => Some(&mut self.scope),
            Field::Description => Some(&mut self.description),
            Field::Body => Some(&mut self.body),
            Field::Breaking | Field::Submit => None,
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.is_done() {
            return;
        }

        self.status_message = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.result = Some(EditorResult::Cancelled),
            KeyCode::Char('c') if ctrl => self.result = Some(EditorResult::Cancelled),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab => self.field = self.field.next(),
            KeyCode::BackTab => self.field = self.field.previous(),
            KeyCode::Down if self.field != Field::Body => self.field = self.field.next(),
            KeyCode::Up if self.field != Field::Body => self.field = self.field.previous(),
            KeyCode::Enter => match self.field {
                Field::Body => self.body.push('\n'),
                Field::Breaking => self.breaking = !self.breaking,
                Field::Submit => self.submit(),
                _ => self.field = self.field.next(),
            },
            KeyCode::Char(' ') if self.field == Field::Breaking => {
                self.breaking = !self.breaking;
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.focused_text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let draft = self.to_draft();
        if draft.is_complete() {
            self.result = Some(EditorResult::Submitted(draft.to_message()));
        } else if draft.commit_type.is_empty() {
            self.field = Field::Type;
            self.status_message = Some("Type is required".to_string());
        } else {
            self.field = Field::Description;
            self.status_message = Some("Description is required".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(editor: &mut DraftEditor, text: &str) {
        for c in text.chars() {
            editor.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn editor() -> DraftEditor {
        DraftEditor::new(CommitDraft {
            commit_type: "feat".to_string(),
            scope: None,
            description: "add login".to_string(),
            body: Some("Adds a form.".to_string()),
            breaking_changes: false,
        })
    }

    #[test]
    fn test_initial_state_mirrors_draft() {
        let e = editor();
        assert_eq!(e.field, Field::Description);
        assert_eq!(e.preview(), "feat: add login\n\nAdds a form.");
        assert!(!e.is_done());
    }

    #[test]
    fn test_editing_updates_preview() {
        let mut e = editor();
        e.handle_key(key(KeyCode::BackTab)); // Scope
        type_text(&mut e, "auth");
        assert_eq!(e.preview(), "feat(auth): add login\n\nAdds a form.");

        e.handle_key(key(KeyCode::Tab)); // Description
        for _ in 0.."login".len() {
            e.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut e, "sign-in");
        assert!(e.preview().starts_with("feat(auth): add sign-in"));
    }

    #[test]
    fn test_breaking_toggle() {
        let mut e = editor();
        e.field = Field::Breaking;
        e.handle_key(key(KeyCode::Char(' ')));
        assert!(e.breaking);
        assert_eq!(
            e.preview(),
            "feat!: add login\n\nAdds a form.\n\nBREAKING CHANGE: add login"
        );
        e.handle_key(key(KeyCode::Enter));
        assert!(!e.breaking);
    }

    #[test]
    fn test_body_accepts_newlines() {
        let mut e = editor();
        e.field = Field::Body;
        e.handle_key(key(KeyCode::Enter));
        type_text(&mut e, "More.");
        assert_eq!(e.body, "Adds a form.\nMore.");
    }

    #[test]
    fn test_tab_order_wraps() {
        let mut e = editor();
        e.field = Field::Submit;
        e.handle_key(key(KeyCode::Tab));
        assert_eq!(e.field, Field::Type);
        e.handle_key(key(KeyCode::BackTab));
        assert_eq!(e.field, Field::Submit);
    }

    #[test]
    fn test_submit_returns_message() {
        let mut e = editor();
        e.handle_key(ctrl('s'));
        assert_eq!(
            e.result(),
            Some(&EditorResult::Submitted(
                "feat: add login\n\nAdds a form.".to_string()
            ))
        );

        // Further keys are ignored once done
        e.handle_key(key(KeyCode::Char('x')));
        assert_eq!(e.description, "add login");
    }

    #[test]
    fn test_submit_row_enter() {
        let mut e = editor();
        e.field = Field::Submit;
        e.handle_key(key(KeyCode::Enter));
        assert!(matches!(e.result(), Some(EditorResult::Submitted(_))));
    }

    #[test]
    fn test_submit_refused_without_description() {
        let mut e = editor();
        e.description.clear();
        e.field = Field::Submit;
        e.handle_key(key(KeyCode::Enter));
        assert!(!e.is_done());
        assert_eq!(e.field, Field::Description);
        assert_eq!(e.status_message.as_deref(), Some("Description is required"));

        type_text(&mut e, "x");
        assert_eq!(e.status_message, None);
    }

    #[test]
    fn test_escape_cancels() {
        let mut e = editor();
        e.handle_key(key(KeyCode::Esc));
        assert_eq!(e.result(), Some(&EditorResult::Cancelled));

        let mut e = editor();
        e.handle_key(ctrl('c'));
        assert_eq!(e.result(), Some(&EditorResult::Cancelled));
    }
}
