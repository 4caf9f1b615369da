//! Export command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::github::{export_repos, GitHubClient, API_BASE};

#[derive(Args)]
pub struct ExportArgs {
    /// GitHub profile/organization URL or account name
    #[arg(value_name = "URL|ACCOUNT")]
    pub account: String,

    /// Destination file for the repo list
    #[arg(short, long, value_name = "FILE", default_value = "repos.txt")]
    pub output: PathBuf,

    /// Token for authenticated API requests (higher rate limits)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", hide = true, default_value = API_BASE)]
    pub github_api_url: String,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let client =
        GitHubClient::with_api_base(&args.github_api_url, args.github_token.as_deref())?;
    let (account, repos) = export_repos(&client, &args.account, &args.output)
        .context("Failed to export repo list")?;
    println!("Exported {} repos for '{account}' to {}", repos.len(), args.output.display());
    Ok(())
}
