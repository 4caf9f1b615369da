//! Core domain types and models
//!
//! Defines the run configuration, the language set used for `.gitignore`
//! generation, and the per-repository statistics.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Commit message used when none is configured.
pub const DEFAULT_COMMIT_MESSAGE: &str =
    "Add MIT license, README, AGENTS, .gitignore, and stats file";

/// Languages with a dedicated `.gitignore` snippet.
///
/// Declaration order is the order snippets appear in generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    Python,
    Node,
    Java,
    Csharp,
    Go,
    Rust,
    Cpp,
    Php,
    Ruby,
    Swift,
    Kotlin,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Language::Python,
        Language::Node,
        Language::Java,
        Language::Csharp,
        Language::Go,
        Language::Rust,
        Language::Cpp,
        Language::Php,
        Language::Ruby,
        Language::Swift,
        Language::Kotlin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Node => "node",
            Language::Java => "java",
            Language::Csharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Cpp => "cpp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simple file and line counts for a working tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoStats {
    /// Files seen (excluding `.git`)
    pub total_files: usize,

    /// Approximate line count across all files
    pub total_lines: usize,

    /// Extension (with leading dot, lower-case, or empty) -> file count
    pub by_ext_files: BTreeMap<String, usize>,

    /// Extension -> line count
    pub by_ext_lines: BTreeMap<String, usize>,
}

impl RepoStats {
    pub fn record(&mut self, ext: &str, line_count: usize) {
        self.total_files += 1;
        self.total_lines += line_count;
        *self.by_ext_files.entry(ext.to_string()).or_insert(0) += 1;
        *self.by_ext_lines.entry(ext.to_string()).or_insert(0) += line_count;
    }
}

/// Run configuration, loaded from file/env and overridden by CLI flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Text file listing repositories, one per line
    #[serde(default)]
    pub repos_file: Option<PathBuf>,

    /// Directory where repositories are cloned or updated
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Copyright holder written into the MIT license
    #[serde(default, alias = "name")]
    pub author: Option<String>,

    /// Copyright year written into the MIT license
    #[serde(default = "default_year", deserialize_with = "deserialize_year")]
    pub year: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Report planned changes without writing, committing or pushing
    #[serde(default)]
    pub dry_run: bool,

    /// Write REPO_STATS.md when it is missing
    #[serde(default, alias = "write_stats_file")]
    pub write_stats: bool,

    /// Regenerate REPO_STATS.md even if it already exists
    #[serde(default)]
    pub refresh_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repos_file: None,
            base_dir: default_base_dir(),
            author: None,
            year: default_year(),
            commit_message: default_commit_message(),
            dry_run: false,
            write_stats: false,
            refresh_stats: false,
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("repos")
}

/// Current calendar year in local time.
pub fn default_year() -> String {
    chrono::Local::now().year().to_string()
}

/// Accept `year = 2024` as well as `year = "2020-2024"`.
fn deserialize_year<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u64),
        Text(String),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Number(n) => n.to_string(),
        Year::Text(s) => s,
    })
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_per_extension() {
        let mut stats = RepoStats::default();
        stats.record(".rs", 10);
        stats.record(".rs", 5);
        stats.record("", 2);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_lines, 17);
        assert_eq!(stats.by_ext_files[".rs"], 2);
        assert_eq!(stats.by_ext_lines[".rs"], 15);
        assert_eq!(stats.by_ext_files[""], 1);
    }

    #[test]
    fn language_order_follows_declaration() {
        let mut sorted = Language::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Language::ALL.to_vec());
        assert_eq!(Language::Csharp.to_string(), "csharp");
    }

    #[test]
    fn year_accepts_number_or_text() {
        let config: Config = serde_json::from_str(r#"{"year": 2021}"#).unwrap();
        assert_eq!(config.year, "2021");
        let config: Config = serde_json::from_str(r#"{"year": "2019-2024"}"#).unwrap();
        assert_eq!(config.year, "2019-2024");
    }

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.base_dir, PathBuf::from("repos"));
        assert_eq!(config.commit_message, DEFAULT_COMMIT_MESSAGE);
        assert_eq!(config.year.len(), 4);
        assert!(!config.dry_run);
    }
}
