//! Repository list parsing
//!
//! A repo list is a text file with one entry per line. Entries are either
//! `owner/name` shorthands for GitHub or full clone URLs (`https://...`,
//! `ssh://...`, `git@host:owner/name.git`). Blank lines and lines starting
//! with `#` are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

static SHORTHAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+/[A-Za-z0-9._-]+$").expect("valid shorthand regex")
});

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Empty repository spec")]
    Empty,

    #[error("Invalid repository spec '{0}': expected owner/name or a clone URL")]
    Invalid(String),

    #[error("Cannot derive a local directory name from '{0}'")]
    NoLocalName(String),

    #[error("Repo list not found: {0}")]
    NotFound(String),

    #[error("Failed to read repo list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A normalized repository entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Entry as written in the list (trimmed)
    pub raw: String,

    /// URL handed to `git clone`
    pub clone_url: String,

    /// Directory name under the base directory
    pub local_name: String,
}

impl RepoSpec {
    pub fn parse(entry: &str) -> Result<Self, SpecError> {
        let cleaned = entry.trim();
        if cleaned.is_empty() {
            return Err(SpecError::Empty);
        }

        if cleaned.contains("://") || cleaned.starts_with("git@") {
            let local_name = local_name_from_url(cleaned)
                .ok_or_else(|| SpecError::NoLocalName(cleaned.to_string()))?;
            return Ok(Self {
                raw: cleaned.to_string(),
                clone_url: cleaned.to_string(),
                local_name,
            });
        }

        if !SHORTHAND_RE.is_match(cleaned) {
            return Err(SpecError::Invalid(cleaned.to_string()));
        }

        let local_name = cleaned.rsplit('/').next().unwrap_or_default().to_string();
        if !is_usable_dir_name(&local_name) {
            return Err(SpecError::NoLocalName(cleaned.to_string()));
        }

        Ok(Self {
            raw: cleaned.to_string(),
            clone_url: format!("https://github.com/{cleaned}.git"),
            local_name,
        })
    }
}

/// True when the line carries no repository (blank or `#` comment).
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Read every line of a repo list file, unparsed.
pub fn read_repo_list(path: &Path) -> Result<Vec<String>, SpecError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SpecError::NotFound(path.display().to_string())
        } else {
            SpecError::Io { path: path.display().to_string(), source }
        }
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Parse list lines, skipping blanks and comments. Order is preserved and
/// each entry keeps its own result so one bad line does not hide the rest.
pub fn parse_repo_list(lines: &[String]) -> Vec<(String, Result<RepoSpec, SpecError>)> {
    lines
        .iter()
        .filter(|line| !is_skippable(line))
        .map(|line| (line.trim().to_string(), RepoSpec::parse(line)))
        .collect()
}

fn local_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let stem = match last.rfind('.') {
        Some(idx) if idx > 0 => &last[..idx],
        _ => last,
    };
    is_usable_dir_name(stem).then(|| stem.to_string())
}

fn is_usable_dir_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}
