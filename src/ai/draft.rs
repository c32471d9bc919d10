//! Structured commit drafts
//!
//! A `CommitDraft` is what the structured prompt asks the model for and what
//! the review editor lets the user adjust before the final message is built.

use serde::{Deserialize, Serialize};

/// A Conventional Commit split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDraft {
    /// Commit type (`feat`, `fix`, ...). Never empty once normalized.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Optional scope, rendered as `type(scope)`
    #[serde(default)]
    pub scope: Option<String>,
    /// Subject line description. Never empty once normalized.
    pub description: String,
    /// Optional free-form body
    #[serde(default)]
    pub body: Option<String>,
    /// Whether the change breaks compatibility
    #[serde(default, rename = "breakingChanges")]
    pub breaking_changes: bool,
}

impl CommitDraft {
    /// Render the final commit message.
    ///
    /// ```text
    /// type(scope)!: description
    ///
    /// body
    ///
    /// BREAKING CHANGE: description
    /// ```
    ///
    /// Blank scope and body are left out, as is the footer when the change is
    /// not breaking.
    pub fn to_message(&self) -> String {
        let mut message = self.subject_line();

        if let Some(body) = non_blank(self.body.as_deref()) {
            message.push_str("\n\n");
            message.push_str(body);
        }

        if self.breaking_changes {
            message.push_str("\n\nBREAKING CHANGE: ");
            message.push_str(self.description.trim());
        }

        message
    }

    /// The `type(scope)!: description` header line
    pub fn subject_line(&self) -> String {
        let mut line = self.commit_type.trim().to_string();

        if let Some(scope) = non_blank(self.scope.as_deref()) {
            line.push('(');
            line.push_str(scope);
            line.push(')');
        }

        if self.breaking_changes {
            line.push('!');
        }

        line.push_str(": ");
        line.push_str(self.description.trim());
        line
    }

    /// Whether the required parts are present
    pub fn is_complete(&self) -> bool {
        !self.commit_type.trim().is_empty() && !self.description.trim().is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CommitDraft {
        CommitDraft {
            commit_type: "feat".to_string(),
            scope: None,
            description: "add login".to_string(),
            body: None,
            breaking_changes: false,
        }
    }

    #[test]
    fn test_minimal_message() {
        assert_eq!(draft().to_message(), "feat: add login");
    }

    #[test]
    fn test_full_message() {
        let d = CommitDraft {
            scope: Some("auth".to_string()),
            body: Some("Adds the login form.".to_string()),
            breaking_changes: true,
            ..draft()
        };
        assert_eq!(
            d.to_message(),
            "feat(auth)!: add login\n\nAdds the login form.\n\nBREAKING CHANGE: add login"
        );
    }

    #[test]
    fn test_blank_scope_and_body_are_omitted() {
        let d = CommitDraft {
            scope: Some("  ".to_string()),
            body: Some("\n".to_string()),
            ..draft()
        };
        assert_eq!(d.to_message(), "feat: add login");
    }

    #[test]
    fn test_is_complete() {
        assert!(draft().is_complete());
        let d = CommitDraft {
            description: " ".to_string(),
            ..draft()
        };
        assert!(!d.is_complete());
    }

    #[test]
    fn test_deserialize_wire_names() {
        let d: CommitDraft =
            serde_json::from_str(r#"{"type":"fix","description":"x","breakingChanges":true}"#)
                .unwrap();
        assert_eq!(d.commit_type, "fix");
        assert!(d.breaking_changes);
        assert_eq!(d.scope, None);
    }
}
