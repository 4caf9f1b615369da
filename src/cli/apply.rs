//! Apply command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;
use tracing::warn;

use crate::baseline::{run_all, BaselineOptions, Summary};
use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::github::{export_repos, GitHubClient, API_BASE};
use crate::spec::read_repo_list;

#[derive(Args)]
pub struct ApplyArgs {
    /// Text file listing repos (owner/name or clone URL), one per line
    #[arg(short = 'f', long, value_name = "FILE")]
    pub repos_file: Option<PathBuf>,

    /// GitHub profile/org URL (or account name) whose repos are exported first
    #[arg(long, value_name = "URL|ACCOUNT")]
    pub export_from: Option<String>,

    /// Destination for the exported list (default: --repos-file or repos.txt)
    #[arg(long, value_name = "FILE")]
    pub export_output_file: Option<PathBuf>,

    /// Directory where repos are cloned/updated [default: repos]
    #[arg(short = 'd', long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Copyright holder name for the MIT license
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Copyright year for the MIT license [default: current year]
    #[arg(long, value_name = "YEAR")]
    pub year: Option<String>,

    /// Commit message used when adding files
    #[arg(short = 'm', long, value_name = "MSG")]
    pub commit_message: Option<String>,

    /// Do not write, commit or push; just show what would happen
    #[arg(long)]
    pub dry_run: bool,

    /// Write REPO_STATS.md with basic repository statistics when missing
    #[arg(long)]
    pub write_stats_file: bool,

    /// Regenerate REPO_STATS.md even if it exists (implies --write-stats-file)
    #[arg(long)]
    pub refresh_stats: bool,

    /// Path to config file (repo-baseline.toml or .repo-baseline.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Token for authenticated GitHub API requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", hide = true, default_value = API_BASE)]
    pub github_api_url: String,
}

pub fn run(args: ApplyArgs) -> Result<()> {
    if args.export_output_file.is_some() && args.export_from.is_none() {
        warn!("--export-output-file is ignored without --export-from");
    }

    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;

    let cli_overrides = CliOverrides {
        repos_file: args.repos_file.clone(),
        base_dir: args.base_dir.clone(),
        author: args.name.clone(),
        year: args.year.clone(),
        commit_message: args.commit_message.clone(),
        dry_run: if args.dry_run { Some(true) } else { None },
        write_stats: if args.write_stats_file { Some(true) } else { None },
        refresh_stats: if args.refresh_stats { Some(true) } else { None },
    };
    let mut merged = merge_cli_with_config(file_config, cli_overrides);

    if let Some(source) = args.export_from.as_deref() {
        let output = args
            .export_output_file
            .clone()
            .or_else(|| merged.repos_file.clone())
            .unwrap_or_else(|| PathBuf::from("repos.txt"));

        let client =
            GitHubClient::with_api_base(&args.github_api_url, args.github_token.as_deref())?;
        let (account, repos) =
            export_repos(&client, source, &output).context("Failed to export repo list")?;
        println!("Exported {} repos for '{account}' to {}", repos.len(), output.display());

        if merged.repos_file.is_none() {
            merged.repos_file = Some(output);
        }

        if merged.author.is_none() {
            println!("Repo list exported. Provide --name to process repositories, or edit the list and rerun.");
            return Ok(());
        }
    }

    let repos_file = merged
        .repos_file
        .clone()
        .context("You must supply --repos-file or --export-from to create one")?;
    let opts = BaselineOptions::from_config(&merged)?;
    let lines = read_repo_list(&repos_file)?;

    let summary = run_all(&lines, &opts);
    print_summary(&summary, opts.dry_run);
    Ok(())
}

fn print_summary(summary: &Summary, dry_run: bool) {
    let label = if dry_run { "Dry run complete" } else { "Done" };
    println!(
        "\n{}: {} processed, {} changed, {} unchanged, {} failed",
        style(label).bold(),
        summary.processed,
        summary.changed,
        summary.unchanged,
        summary.failed.len()
    );
    for repo in &summary.failed {
        println!("  {} {repo}", style("failed:").red());
    }
}
