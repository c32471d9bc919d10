//! Unified diff scanning
//!
//! Splits a staged diff into per-file sections so callers can name the files
//! a change touches without understanding the hunks themselves.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `diff --git a/<old> b/<new>` section headers
static DIFF_HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^diff --git a/(.+?) b/(.+)$").expect("valid diff header regex"));

/// A single file's section of a unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSection {
    /// File path from the diff header (post-image side)
    pub file_path: String,
    /// Number of added lines (lines starting with '+', excluding header)
    pub additions: usize,
    /// Number of removed lines (lines starting with '-', excluding header)
    pub deletions: usize,
    /// Whether this is a binary file
    pub is_binary: bool,
}

impl DiffSection {
    fn new(file_path: String) -> Self {
        Self {
            file_path,
            additions: 0,
            deletions: 0,
            is_binary: false,
        }
    }

    /// One-line summary used in listings, e.g. `src/lib.rs (+3/-1)`
    pub fn summary(&self) -> String {
        if self.is_binary {
            format!("{} (binary file)", self.file_path)
        } else {
            format!(
                "{} (+{}/-{})",
                self.file_path, self.additions, self.deletions
            )
        }
    }
}

/// Parse a unified diff into per-file sections, in diff order
pub fn parse_diff_sections(diff: &str) -> Vec<DiffSection> {
    let mut sections: Vec<DiffSection> = Vec::new();
    // `---`/`+++` are file headers only before the section's first hunk
    let mut in_hunk = false;

    for line in diff.lines() {
        if line.starts_with("diff --git ") {
            if let Some(path) = header_path(line) {
                sections.push(DiffSection::new(path));
            }
            in_hunk = false;
            continue;
        }

        let Some(current) = sections.last_mut() else {
            continue;
        };

        if !in_hunk {
            if line.starts_with("@@") {
                in_hunk = true;
            } else if let Some(path) = line.strip_prefix("+++ b/") {
                // Unambiguous post-image path, even when it contains " b/"
                current.file_path = path.trim_end_matches('\t').to_string();
            } else if line.starts_with("Binary files") || line.contains("GIT binary patch") {
                current.is_binary = true;
            }
            continue;
        }

        if line.starts_with('+') {
            current.additions += 1;
        } else if line.starts_with('-') {
            current.deletions += 1;
        }
    }

    sections
}

/// Every distinct file path touched by the diff, in first-seen order
pub fn changed_files(diff: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for section in parse_diff_sections(diff) {
        if !paths.contains(&section.file_path) {
            paths.push(section.file_path);
        }
    }
    paths
}

/// Extract the file path from a `diff --git` header line
fn header_path(line: &str) -> Option<String> {
    // Unrenamed files repeat the same path on both sides, which settles
    // where the split is even when the path itself contains " b/"
    if let Some(rest) = line.strip_prefix("diff --git a/") {
        let symmetric = rest.match_indices(" b/").find_map(|(i, _)| {
            let (old, new) = (&rest[..i], &rest[i + 3..]);
            (old == new).then(|| new.to_string())
        });
        if symmetric.is_some() {
            return symmetric;
        }
    }

    if let Some(caps) = DIFF_HEADER_REGEX.captures(line) {
        return caps.get(2).map(|m| m.as_str().to_string());
    }

    // Quoted or otherwise unusual headers: take whatever follows the last " b/"
    line.rsplit_once(" b/")
        .map(|(_, path)| path.trim_matches('"').to_string())
        .filter(|path| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FILE_DIFF: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 1111111..2222222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,4 @@
 pub mod a;
+pub mod b;
-pub mod c;
+pub mod d;
diff --git a/assets/logo.png b/assets/logo.png
index 3333333..4444444 100644
Binary files a/assets/logo.png and b/assets/logo.png differ
";

    #[test]
    fn test_parse_sections_counts_lines() {
        let sections = parse_diff_sections(TWO_FILE_DIFF);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].file_path, "src/lib.rs");
        assert_eq!(sections[0].additions, 2);
        assert_eq!(sections[0].deletions, 1);
        assert!(!sections[0].is_binary);
        assert!(sections[1].is_binary);
    }

    #[test]
    fn test_summary_formats() {
        let sections = parse_diff_sections(TWO_FILE_DIFF);
        assert_eq!(sections[0].summary(), "src/lib.rs (+2/-1)");
        assert_eq!(sections[1].summary(), "assets/logo.png (binary file)");
    }

    #[test]
    fn test_changed_files_renamed_uses_new_path() {
        let diff = "diff --git a/old/name.rs b/new/name.rs\nsimilarity index 100%\n";
        assert_eq!(changed_files(diff), vec!["new/name.rs".to_string()]);
    }

    #[test]
    fn test_changed_files_deduplicates() {
        let diff = "diff --git a/a.txt b/a.txt\n+x\ndiff --git a/a.txt b/a.txt\n+y\n";
        assert_eq!(changed_files(diff), vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_path_containing_b_slash() {
        let diff = "\
diff --git a/x b/y.rs b/x b/y.rs
--- a/x b/y.rs
+++ b/x b/y.rs
@@ -1 +1 @@
-old
+new
";
        let sections = parse_diff_sections(diff);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].file_path, "x b/y.rs");
        assert_eq!(sections[0].summary(), "x b/y.rs (+1/-1)");
    }

    #[test]
    fn test_renamed_path_from_post_image_header() {
        let diff = "\
diff --git a/old b/x b/y.rs b/new b/x b/y.rs
--- a/old b/x b/y.rs
+++ b/new b/x b/y.rs
@@ -1 +1 @@
-a
+b
";
        assert_eq!(changed_files(diff), vec!["new b/x b/y.rs".to_string()]);
    }

    #[test]
    fn test_content_lines_that_look_like_headers_are_counted() {
        let diff = "\
diff --git a/notes.md b/notes.md
--- a/notes.md
+++ b/notes.md
@@ -1,2 +1,2 @@
--- removed rule
+++ added rule
";
        let sections = parse_diff_sections(diff);
        assert_eq!(sections[0].file_path, "notes.md");
        assert_eq!(sections[0].additions, 1);
        assert_eq!(sections[0].deletions, 1);
    }

    #[test]
    fn test_no_headers_yields_nothing() {
        assert!(changed_files("just some text\n+added").is_empty());
        assert!(changed_files("").is_empty());
    }
}
