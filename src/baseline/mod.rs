//! Per-repository housekeeping
//!
//! For each repo list entry: clone or update the checkout, collect stats,
//! write whichever baseline files are missing, then commit and push them.
//! Repositories are processed strictly one after another; a failing repo is
//! reported and the run moves on.

pub mod files;

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use files::{BaselineFile, PlannedFile};

use crate::domain::{Config, RepoStats};
use crate::git::{self, Checkout, CommitStatus};
use crate::spec::{parse_repo_list, RepoSpec};
use crate::stats::{collect_repo_stats, format_stats_markdown};
use crate::templates::{
    detect_languages, generate_gitignore_content, render_license, render_readme, AGENTS,
};

/// Settings that apply to every repository in a run
#[derive(Debug, Clone)]
pub struct BaselineOptions {
    pub base_dir: PathBuf,
    pub author: String,
    pub year: String,
    pub commit_message: String,
    pub dry_run: bool,
    pub write_stats: bool,
    pub refresh_stats: bool,
}

impl BaselineOptions {
    /// Build from a merged config; the copyright holder is mandatory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let author = config
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .context("--name is required when processing repositories")?;

        Ok(Self {
            base_dir: config.base_dir.clone(),
            author: author.to_string(),
            year: config.year.clone(),
            commit_message: config.commit_message.clone(),
            dry_run: config.dry_run,
            write_stats: config.write_stats || config.refresh_stats,
            refresh_stats: config.refresh_stats,
        })
    }
}

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Every baseline file already existed
    Unchanged,
    /// Dry run: these files would have been created
    Planned(Vec<BaselineFile>),
    /// Files were written but git saw no difference
    NoGitChanges,
    NothingToCommit,
    Committed { files: Vec<BaselineFile>, pushed: bool },
}

impl RepoOutcome {
    pub fn is_change(&self) -> bool {
        matches!(self, RepoOutcome::Committed { .. } | RepoOutcome::Planned(_))
    }
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub failed: Vec<String>,
}

/// Decide which files a repository still needs, with their content.
pub fn plan_files(
    repo_dir: &Path,
    repo_name: &str,
    stats: &RepoStats,
    opts: &BaselineOptions,
) -> Vec<PlannedFile> {
    let mut planned = Vec::new();

    for kind in BaselineFile::ALL {
        let present = kind.is_present(repo_dir);
        let content = match kind {
            BaselineFile::License if !present => render_license(&opts.year, &opts.author),
            BaselineFile::Readme if !present => render_readme(repo_name),
            BaselineFile::Agents if !present => AGENTS.to_string(),
            BaselineFile::Gitignore if !present => {
                let languages = detect_languages(stats);
                if languages.is_empty() {
                    println!("    No recognised languages found, using base .gitignore");
                } else {
                    let names: Vec<&str> = languages.iter().map(|l| l.as_str()).collect();
                    println!("    Detected languages for .gitignore: {}", names.join(", "));
                }
                let content = generate_gitignore_content(&languages);
                if content.is_empty() {
                    continue;
                }
                content
            }
            BaselineFile::Stats if opts.write_stats && (!present || opts.refresh_stats) => {
                let mut file = PlannedFile::new(kind, format_stats_markdown(stats, repo_name));
                file.replace = present;
                planned.push(file);
                continue;
            }
            BaselineFile::Stats => continue,
            _ => {
                println!("    {} already present", kind.file_name());
                continue;
            }
        };
        planned.push(PlannedFile::new(kind, content));
    }

    planned
}

/// A file written during this run and what it replaced, for rollback
struct WrittenFile {
    path: PathBuf,
    previous: Option<Vec<u8>>,
}

/// Process one repo list entry end to end.
pub fn process_repo(spec: &RepoSpec, opts: &BaselineOptions) -> Result<RepoOutcome> {
    let (repo_dir, checkout) = git::ensure_cloned_or_pulled(&opts.base_dir, spec)
        .with_context(|| format!("failed to fetch {}", spec.clone_url))?;
    match checkout {
        Checkout::Cloned => println!("    Cloned into {}", repo_dir.display()),
        Checkout::Pulled => println!("    Updated {}", repo_dir.display()),
        Checkout::Stale(_) => println!("    Using existing checkout {}", repo_dir.display()),
    }

    let stats = collect_repo_stats(&repo_dir);
    println!("    Files: {}, approx lines: {}", stats.total_files, stats.total_lines);

    let planned = plan_files(&repo_dir, &spec.local_name, &stats, opts);

    // Left behind by an earlier run that failed before committing or pushing.
    let baseline_names: Vec<&str> =
        BaselineFile::ALL.iter().flat_map(|kind| kind.candidates()).copied().collect();
    let leftover = git::uncommitted_files(&repo_dir, &baseline_names)?;
    let ahead = git::is_ahead_of_upstream(&repo_dir)?;

    if planned.is_empty() && leftover.is_empty() && !ahead {
        println!("    No changes needed.");
        return Ok(RepoOutcome::Unchanged);
    }
    if !leftover.is_empty() {
        let names: Vec<String> = leftover.iter().map(|p| p.display().to_string()).collect();
        println!("    Uncommitted baseline files: {}", names.join(", "));
    }
    if ahead {
        println!("    Local branch has unpushed commits");
    }

    let kinds: Vec<BaselineFile> = planned.iter().map(|p| p.kind).collect();
    let names: Vec<&str> = kinds.iter().map(|k| k.file_name()).collect();

    if opts.dry_run {
        let tag = style("(dry-run)").yellow();
        if !names.is_empty() {
            println!("    {tag} Would create: {}", names.join(", "));
        }
        if !names.is_empty() || !leftover.is_empty() {
            println!("    {tag} Would git commit -m '{}'", opts.commit_message);
        }
        println!("    {tag} Would git push");
        return Ok(RepoOutcome::Planned(kinds));
    }

    let mut written = Vec::with_capacity(planned.len());
    let status = match write_and_commit(&repo_dir, &planned, &leftover, opts, &mut written) {
        Ok(status) => status,
        Err(err) => {
            roll_back(&repo_dir, &written);
            return Err(err);
        }
    };

    match status {
        None if !ahead => {
            println!("    No changes detected by git.");
            return Ok(RepoOutcome::NoGitChanges);
        }
        Some(CommitStatus::NothingToCommit) if !ahead => {
            println!("    Nothing to commit.");
            return Ok(RepoOutcome::NothingToCommit);
        }
        _ => {}
    }

    let pushed = match git::push(&repo_dir) {
        Ok(()) => {
            println!("    -> Changes pushed.");
            true
        }
        Err(err) => {
            warn!("git push failed for {}: {err}", repo_dir.display());
            println!("    {} git push failed", style("[!]").red());
            false
        }
    };

    Ok(RepoOutcome::Committed { files: kinds, pushed })
}

/// Write the planned files, then stage and commit them together with any
/// leftovers. `None` means there was nothing to stage.
fn write_and_commit(
    repo_dir: &Path,
    planned: &[PlannedFile],
    leftover: &[PathBuf],
    opts: &BaselineOptions,
    written: &mut Vec<WrittenFile>,
) -> Result<Option<CommitStatus>> {
    for file in planned {
        let previous =
            if file.replace { fs::read(repo_dir.join(file.kind.file_name())).ok() } else { None };
        let path = file
            .write(repo_dir)
            .with_context(|| format!("failed to write {}", file.kind.file_name()))?;
        println!("    -> Created {}", file.kind.file_name());
        written.push(WrittenFile { path, previous });
    }

    if !git::has_changes(repo_dir)? {
        return Ok(None);
    }

    let mut paths: Vec<PathBuf> = written.iter().map(|w| w.path.clone()).collect();
    for path in leftover {
        if !paths.contains(path) {
            paths.push(path.clone());
        }
    }
    if paths.is_empty() {
        return Ok(None);
    }

    git::add(repo_dir, &paths)?;
    Ok(Some(git::commit(repo_dir, &opts.commit_message)?))
}

/// Undo this run's writes so the next run plans the same files again.
fn roll_back(repo_dir: &Path, written: &[WrittenFile]) {
    if written.is_empty() {
        return;
    }

    let paths: Vec<PathBuf> = written.iter().map(|w| w.path.clone()).collect();
    if let Err(err) = git::unstage(repo_dir, &paths) {
        warn!("could not unstage files in {}: {err}", repo_dir.display());
    }
    for file in written {
        let full = repo_dir.join(&file.path);
        let restored = match &file.previous {
            Some(content) => fs::write(&full, content),
            None => fs::remove_file(&full),
        };
        if let Err(err) = restored {
            warn!("could not roll back {}: {err}", full.display());
        }
    }
    println!("    Rolled back {} written file(s)", written.len());
}

/// Process every entry of a repo list in order, continuing past failures.
pub fn run_all(lines: &[String], opts: &BaselineOptions) -> Summary {
    let mut summary = Summary::default();

    for (entry, parsed) in parse_repo_list(lines) {
        println!("\n{}", style(format!("=== {entry} ===")).bold());
        summary.processed += 1;

        let result = parsed.map_err(anyhow::Error::from).and_then(|spec| process_repo(&spec, opts));

        match result {
            Ok(outcome) => {
                info!(repo = %entry, ?outcome, "processed");
                if matches!(outcome, RepoOutcome::Committed { pushed: false, .. }) {
                    summary.failed.push(format!("{entry} (not pushed)"));
                } else if outcome.is_change() {
                    summary.changed += 1;
                } else {
                    summary.unchanged += 1;
                }
            }
            Err(err) => {
                eprintln!("{} Error processing {entry}: {err:#}", style("[!]").red());
                summary.failed.push(entry);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn opts(base: &Path) -> BaselineOptions {
        BaselineOptions {
            base_dir: base.to_path_buf(),
            author: "Ada".to_string(),
            year: "2024".to_string(),
            commit_message: "baseline".to_string(),
            dry_run: false,
            write_stats: false,
            refresh_stats: false,
        }
    }

    #[test]
    fn options_require_author() {
        let config = Config { author: Some("   ".to_string()), ..Config::default() };
        let err = BaselineOptions::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("--name is required"));

        let config = Config {
            author: Some(" Ada ".to_string()),
            refresh_stats: true,
            ..Config::default()
        };
        let opts = BaselineOptions::from_config(&config).unwrap();
        assert_eq!(opts.author, "Ada");
        assert!(opts.write_stats);
    }

    #[test]
    fn plans_every_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut stats = RepoStats::default();
        stats.record(".py", 3);

        let planned = plan_files(dir.path(), "demo", &stats, &opts(dir.path()));
        let kinds: Vec<BaselineFile> = planned.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BaselineFile::License,
                BaselineFile::Readme,
                BaselineFile::Agents,
                BaselineFile::Gitignore
            ]
        );
        assert!(planned[0].content.contains("Copyright (c) 2024 Ada"));
        assert!(planned[1].content.starts_with("# demo\n"));
        assert!(planned[3].content.contains("# Python\n"));
        assert!(planned.iter().all(|p| !p.replace));
    }

    #[test]
    fn existing_files_are_left_alone() {
        let dir = TempDir::new().unwrap();
        for name in ["LICENSE.txt", "README", "AGENTS.md", ".gitignore"] {
            fs::write(dir.path().join(name), "mine\n").unwrap();
        }

        let planned = plan_files(dir.path(), "demo", &RepoStats::default(), &opts(dir.path()));
        assert!(planned.is_empty());
    }

    #[test]
    fn stats_file_respects_refresh_flag() {
        let dir = TempDir::new().unwrap();
        for name in ["LICENSE", "README.md", "AGENTS.md", ".gitignore", "REPO_STATS.md"] {
            fs::write(dir.path().join(name), "mine\n").unwrap();
        }
        let mut options = opts(dir.path());
        options.write_stats = true;
        assert!(plan_files(dir.path(), "demo", &RepoStats::default(), &options).is_empty());

        options.refresh_stats = true;
        let planned = plan_files(dir.path(), "demo", &RepoStats::default(), &options);
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].kind, BaselineFile::Stats);
        assert!(planned[0].replace);
    }

    #[test]
    fn roll_back_removes_new_files_and_restores_replaced_ones() {
        let dir = TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("LICENSE"), "new\n").unwrap();
        fs::write(dir.path().join("REPO_STATS.md"), "fresh\n").unwrap();

        let written = vec![
            WrittenFile { path: PathBuf::from("LICENSE"), previous: None },
            WrittenFile { path: PathBuf::from("REPO_STATS.md"), previous: Some(b"old\n".to_vec()) },
        ];
        roll_back(dir.path(), &written);

        assert!(!dir.path().join("LICENSE").exists());
        assert_eq!(fs::read_to_string(dir.path().join("REPO_STATS.md")).unwrap(), "old\n");
    }

    #[test]
    fn run_all_counts_invalid_entries_as_failures() {
        let dir = TempDir::new().unwrap();
        let lines: Vec<String> =
            ["# comment", "", "not-a-spec"].iter().map(|s| s.to_string()).collect();

        let summary = run_all(&lines, &opts(dir.path()));
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, vec!["not-a-spec".to_string()]);
        assert_eq!(summary.changed, 0);
    }
}
