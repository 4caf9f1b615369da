//! Git client wrapper
//!
//! Network and history-changing operations (clone, pull, commit, push) go
//! through the `git` executable so the user's credential helpers, hooks and
//! identity apply. Status inspection uses libgit2.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, warn};

use crate::spec::RepoSpec;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("cannot inspect repository status: {0}")]
    Status(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Result of a `git commit` attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    Committed,
    NothingToCommit,
}

/// Run `git -C <dir> <args>` and return stdout.
pub fn run_git(repo_dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").arg("-C").arg(repo_dir).args(args).output()?;
    debug!("git -C {} {}", repo_dir.display(), args.join(" "));

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(GitError::CommandFailed {
            command: args.first().copied().unwrap_or_default().to_string(),
            stderr: failure_text(&output),
        })
    }
}

pub fn clone(clone_url: &str, dest: &Path) -> Result<()> {
    let output = Command::new("git").arg("clone").arg(clone_url).arg(dest).output()?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: "clone".to_string(),
            stderr: failure_text(&output),
        });
    }
    Ok(())
}

pub fn pull_ff_only(repo_dir: &Path) -> Result<()> {
    run_git(repo_dir, &["pull", "--ff-only"]).map(|_| ())
}

/// Stage paths relative to the repository root.
pub fn add(repo_dir: &Path, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let path = path.to_string_lossy();
        run_git(repo_dir, &["add", "--", &*path])?;
    }
    Ok(())
}

pub fn commit(repo_dir: &Path, message: &str) -> Result<CommitStatus> {
    match run_git(repo_dir, &["commit", "-m", message]) {
        Ok(_) => Ok(CommitStatus::Committed),
        Err(GitError::CommandFailed { stderr, .. })
            if stderr.to_lowercase().contains("nothing to commit") =>
        {
            Ok(CommitStatus::NothingToCommit)
        }
        Err(err) => Err(err),
    }
}

pub fn push(repo_dir: &Path) -> Result<()> {
    run_git(repo_dir, &["push"]).map(|_| ())
}

/// True when the working tree has untracked or modified files.
pub fn has_changes(repo_dir: &Path) -> Result<bool> {
    let repo = git2::Repository::open(repo_dir)?;
    let mut opts = git2::StatusOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true).include_ignored(false);
    let statuses = repo.statuses(Some(&mut opts))?;
    Ok(!statuses.is_empty())
}

/// Drop `paths` from the index, resetting them to `HEAD` (or removing them on
/// an unborn branch).
pub fn unstage(repo_dir: &Path, paths: &[PathBuf]) -> Result<()> {
    let repo = git2::Repository::open(repo_dir)?;
    let head = match repo.head() {
        Ok(head) => Some(head.peel(git2::ObjectType::Commit)?),
        Err(err)
            if matches!(err.code(), git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound) =>
        {
            None
        }
        Err(err) => return Err(err.into()),
    };
    repo.reset_default(head.as_ref(), paths.iter().map(PathBuf::as_path))?;
    Ok(())
}

/// Those of `names` that exist as files but are untracked or only staged.
pub fn uncommitted_files(repo_dir: &Path, names: &[&str]) -> Result<Vec<PathBuf>> {
    let repo = git2::Repository::open(repo_dir)?;
    let mut found = Vec::new();
    for name in names {
        if !repo_dir.join(name).is_file() {
            continue;
        }
        let status = repo.status_file(Path::new(name))?;
        if status.intersects(git2::Status::WT_NEW | git2::Status::INDEX_NEW) {
            found.push(PathBuf::from(name));
        }
    }
    Ok(found)
}

/// True when the checked-out branch has commits its upstream does not.
pub fn is_ahead_of_upstream(repo_dir: &Path) -> Result<bool> {
    let repo = git2::Repository::open(repo_dir)?;
    let head = match repo.head() {
        Ok(head) if head.is_branch() => head,
        _ => return Ok(false),
    };
    let branch = git2::Branch::wrap(head);
    let Ok(upstream) = branch.upstream() else {
        return Ok(false);
    };
    let (Some(local), Some(remote)) = (branch.get().target(), upstream.get().target()) else {
        return Ok(false);
    };
    let (ahead, _behind) = repo.graph_ahead_behind(local, remote)?;
    Ok(ahead > 0)
}

/// How a working copy was brought up to date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkout {
    Cloned,
    Pulled,
    /// Pull failed; the existing checkout is used as-is
    Stale(String),
}

/// Clone into `<base_dir>/<local_name>` or fast-forward an existing checkout.
pub fn ensure_cloned_or_pulled(base_dir: &Path, spec: &RepoSpec) -> Result<(PathBuf, Checkout)> {
    std::fs::create_dir_all(base_dir)?;
    let repo_dir = base_dir.join(&spec.local_name);

    if !repo_dir.is_dir() {
        debug!("Cloning {} -> {}", spec.clone_url, repo_dir.display());
        clone(&spec.clone_url, &repo_dir)?;
        return Ok((repo_dir, Checkout::Cloned));
    }

    debug!("Updating existing repo {}", repo_dir.display());
    match pull_ff_only(&repo_dir) {
        Ok(()) => Ok((repo_dir, Checkout::Pulled)),
        Err(err) => {
            warn!("git pull failed for {}: {err}", repo_dir.display());
            Ok((repo_dir, Checkout::Stale(err.to_string())))
        }
    }
}

// git writes "nothing to commit" to stdout, everything else to stderr.
fn failure_text(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    match (stderr.is_empty(), stdout.is_empty()) {
        (false, true) => stderr,
        (true, _) => stdout,
        (false, false) => format!("{stderr}\n{stdout}"),
    }
}
