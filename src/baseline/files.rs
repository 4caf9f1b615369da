//! Baseline file presence checks and writers

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file the tool knows how to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaselineFile {
    License,
    Readme,
    Agents,
    Gitignore,
    Stats,
}

impl BaselineFile {
    pub const ALL: [BaselineFile; 5] = [
        BaselineFile::License,
        BaselineFile::Readme,
        BaselineFile::Agents,
        BaselineFile::Gitignore,
        BaselineFile::Stats,
    ];

    /// Name the tool writes.
    pub fn file_name(self) -> &'static str {
        match self {
            BaselineFile::License => "LICENSE",
            BaselineFile::Readme => "README.md",
            BaselineFile::Agents => "AGENTS.md",
            BaselineFile::Gitignore => ".gitignore",
            BaselineFile::Stats => "REPO_STATS.md",
        }
    }

    /// Existing names that already satisfy this file.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            BaselineFile::License => &["LICENSE", "LICENSE.txt", "LICENSE.md"],
            BaselineFile::Readme => &["README", "README.md", "README.txt"],
            BaselineFile::Agents => &["AGENTS.md"],
            BaselineFile::Gitignore => &[".gitignore"],
            BaselineFile::Stats => &["REPO_STATS.md"],
        }
    }

    pub fn is_present(self, repo_dir: &Path) -> bool {
        self.candidates().iter().any(|name| repo_dir.join(name).is_file())
    }
}

/// Content ready to be written into a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub kind: BaselineFile,
    pub content: String,
    /// Replace an existing file instead of failing
    pub replace: bool,
}

impl PlannedFile {
    pub fn new(kind: BaselineFile, content: String) -> Self {
        Self { kind, content, replace: false }
    }

    /// Write into `repo_dir` and return the path relative to it.
    ///
    /// Without `replace`, an existing file is an `AlreadyExists` error and is
    /// left untouched.
    pub fn write(&self, repo_dir: &Path) -> io::Result<PathBuf> {
        let relative = PathBuf::from(self.kind.file_name());
        let path = repo_dir.join(&relative);

        if self.replace {
            fs::write(&path, &self.content)?;
        } else {
            let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
            file.write_all(self.content.as_bytes())?;
        }
        Ok(relative)
    }
}
