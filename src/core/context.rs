//! Project context collection
//!
//! Gathers light metadata about the project to enrich prompts: the manifest's
//! name, description and dependency names, plus the subject of the last
//! commit. Collection never fails. Anything unreadable is left out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::git::DiffSource;

/// Manifests looked up in the repository root, in order. Only the first one
/// found is read.
const MANIFESTS: &[&str] = &["Cargo.toml", "package.json"];

/// Ancillary project metadata for prompts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    /// Project name from the manifest
    pub name: Option<String>,
    /// Project description from the manifest
    pub description: Option<String>,
    /// Dependency names from the manifest
    pub dependencies: Vec<String>,
    /// Subject line of the most recent commit
    pub last_commit: Option<String>,
}

impl ProjectContext {
    /// Whether no field carries any information
    pub fn is_empty(&self) -> bool {
        self.render().is_empty()
    }

    /// Render one labelled line per present field; empty when nothing is known
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(name) = non_blank(self.name.as_deref()) {
            lines.push(format!("Project name: {}", name));
        }
        if let Some(description) = non_blank(self.description.as_deref()) {
            lines.push(format!("Project description: {}", description));
        }
        if !self.dependencies.is_empty() {
            lines.push(format!("Dependencies: {}", self.dependencies.join(", ")));
        }
        if let Some(last_commit) = non_blank(self.last_commit.as_deref()) {
            lines.push(format!("Last commit: {}", last_commit));
        }

        lines.join("\n")
    }
}

/// Reads project metadata from a working tree and its history
pub struct ContextCollector {
    root: PathBuf,
}

impl ContextCollector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Collect whatever context is available. Errors are logged and dropped.
    pub async fn collect(&self, source: &dyn DiffSource) -> ProjectContext {
        let mut context = read_manifest(&self.root).unwrap_or_default();

        context.last_commit = match source.last_commit_message().await {
            Ok(message) => message.as_deref().and_then(subject_line),
            Err(e) => {
                debug!(error = %e, "could not read last commit message");
                None
            }
        };

        context
    }
}

/// Read the first manifest present in `root`
fn read_manifest(root: &Path) -> Option<ProjectContext> {
    let (file_name, path) = MANIFESTS
        .iter()
        .map(|name| (*name, root.join(name)))
        .find(|(_, path)| path.is_file())?;

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not read manifest");
            return None;
        }
    };

    let parsed = match file_name {
        "Cargo.toml" => parse_cargo_manifest(&contents),
        _ => parse_package_json(&contents),
    };

    if parsed.is_none() {
        debug!(path = %path.display(), "could not parse manifest");
    }
    parsed
}

// Fields are read loosely: a workspace-inherited `description.workspace = true`
// or an odd `dependencies` value drops only that field, not the manifest.

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
    #[serde(default)]
    dependencies: Option<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: Option<toml::Value>,
    description: Option<toml::Value>,
}

fn parse_cargo_manifest(contents: &str) -> Option<ProjectContext> {
    let manifest: CargoManifest = toml::from_str(contents).ok()?;
    let (name, description) = manifest
        .package
        .map(|p| (p.name, p.description))
        .unwrap_or_default();

    let dependencies = match manifest.dependencies {
        Some(toml::Value::Table(table)) => table.into_iter().map(|(name, _)| name).collect(),
        _ => Vec::new(),
    };

    Some(ProjectContext {
        name: name.and_then(toml_string),
        description: description.and_then(toml_string),
        dependencies,
        last_commit: None,
    })
}

fn toml_string(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<serde_json::Value>,
    description: Option<serde_json::Value>,
    dependencies: Option<serde_json::Value>,
}

fn parse_package_json(contents: &str) -> Option<ProjectContext> {
    let package: PackageJson = serde_json::from_str(contents).ok()?;

    let dependencies = match package.dependencies {
        Some(serde_json::Value::Object(map)) => map.into_iter().map(|(name, _)| name).collect(),
        _ => Vec::new(),
    };

    Some(ProjectContext {
        name: package.name.and_then(json_string),
        description: package.description.and_then(json_string),
        dependencies,
        last_commit: None,
    })
}

fn json_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

/// First non-blank line of a commit message
fn subject_line(message: &str) -> Option<String> {
    message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GemcommitError, Result};
    use async_trait::async_trait;

    struct FixedHistory(Option<&'static str>);

    #[async_trait(?Send)]
    impl DiffSource for FixedHistory {
        async fn staged_diff(&self) -> Result<String> {
            Ok(String::new())
        }

        async fn last_commit_message(&self) -> Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct BrokenHistory;

    #[async_trait(?Send)]
    impl DiffSource for BrokenHistory {
        async fn staged_diff(&self) -> Result<String> {
            Err(GemcommitError::NotGitRepository)
        }

        async fn last_commit_message(&self) -> Result<Option<String>> {
            Err(GemcommitError::NotGitRepository)
        }
    }

    #[tokio::test]
    async fn test_cargo_manifest_and_last_commit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            r#"
[package]
name = "demo"
description = "A demo crate"

[dependencies]
serde = "1"
tokio = { version = "1", features = ["full"] }
"#,
        )
        .unwrap();

        let collector = ContextCollector::new(dir.path());
        let context = collector
            .collect(&FixedHistory(Some("\nfeat: add thing\n\nbody")))
            .await;

        assert_eq!(context.name.as_deref(), Some("demo"));
        assert_eq!(context.description.as_deref(), Some("A demo crate"));
        assert_eq!(context.dependencies, vec!["serde", "tokio"]);
        assert_eq!(context.last_commit.as_deref(), Some("feat: add thing"));
        assert_eq!(
            context.render(),
            "Project name: demo\nProject description: A demo crate\nDependencies: serde, tokio\nLast commit: feat: add thing"
        );
    }

    #[tokio::test]
    async fn test_package_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "web", "dependencies": {"react": "^18", "vite": "^5"}}"#,
        )
        .unwrap();

        let context = ContextCollector::new(dir.path())
            .collect(&FixedHistory(None))
            .await;

        assert_eq!(context.name.as_deref(), Some("web"));
        assert_eq!(context.description, None);
        assert_eq!(context.dependencies, vec!["react", "vite"]);
        assert_eq!(context.render(), "Project name: web\nDependencies: react, vite");
    }

    #[test]
    fn test_workspace_inherited_fields_keep_the_rest() {
        let context = parse_cargo_manifest(
            "[package]\nname = \"member\"\ndescription.workspace = true\nversion.workspace = true\n\n[dependencies]\nserde = \"1\"\nanyhow.workspace = true\n",
        )
        .unwrap();
        assert_eq!(context.name.as_deref(), Some("member"));
        assert_eq!(context.description, None);
        assert_eq!(context.dependencies, vec!["anyhow", "serde"]);
    }

    #[test]
    fn test_package_json_non_string_fields_are_skipped() {
        let context = parse_package_json(
            r#"{"name": "web", "description": ["not", "text"], "dependencies": "none"}"#,
        )
        .unwrap();
        assert_eq!(context.name.as_deref(), Some("web"));
        assert_eq!(context.description, None);
        assert!(context.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_only_first_manifest_is_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"rust-side\"\n").unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "js-side"}"#).unwrap();

        let context = ContextCollector::new(dir.path())
            .collect(&FixedHistory(None))
            .await;
        assert_eq!(context.name.as_deref(), Some("rust-side"));
    }

    #[tokio::test]
    async fn test_failures_are_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "this is [not toml").unwrap();

        let context = ContextCollector::new(dir.path())
            .collect(&BrokenHistory)
            .await;
        assert!(context.is_empty());
        assert_eq!(context.render(), "");
    }

    #[tokio::test]
    async fn test_missing_root_is_empty() {
        let context = ContextCollector::new("/definitely/not/here")
            .collect(&FixedHistory(Some("   ")))
            .await;
        assert_eq!(context, ProjectContext::default());
    }
}
