//! Repo-Baseline: apply baseline housekeeping across GitHub repositories
//!
//! This library clones or updates a list of repositories, adds an MIT
//! LICENSE, README, AGENTS playbook and language-aware `.gitignore` where
//! they are missing, optionally writes repository statistics, and commits
//! and pushes the result.

pub mod baseline;
pub mod cli;
pub mod config;
pub mod domain;
pub mod git;
pub mod github;
pub mod spec;
pub mod stats;
pub mod templates;
