//! repo-baseline: apply baseline housekeeping across GitHub repositories
//!
//! For each repository in a list: clone or update it, add the LICENSE,
//! README, AGENTS and .gitignore files it lacks, then commit and push.

use anyhow::Result;

fn main() -> Result<()> {
    repo_baseline::cli::run()
}
