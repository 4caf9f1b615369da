//! GitHub repository listing
//!
//! Resolves a profile URL or account name, pages through the account's
//! public repositories via the REST API, and writes them as a repo list.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const API_BASE: &str = "https://api.github.com";

static ACCOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid account regex"));

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub URL or account name is required")]
    MissingAccount,

    #[error("Provide a GitHub profile or organization URL")]
    NotGitHub,

    #[error("GitHub URL is missing the account name")]
    UrlWithoutAccount,

    #[error("Provide a GitHub account name or profile URL, not a repo URL")]
    RepoPath,

    #[error("Invalid GitHub account name '{0}'")]
    InvalidAccount(String),

    #[error("GITHUB_TOKEN contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("GitHub account '{0}' not found")]
    NotFound(String),

    #[error("GitHub API returned HTTP {0}")]
    Status(u16),

    #[error("Unexpected GitHub API response format")]
    UnexpectedPayload,

    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to write repo list: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

#[derive(Debug, Deserialize)]
struct RepoSummary {
    #[serde(default)]
    full_name: Option<String>,
}

/// Extract the account name from a GitHub profile URL or a bare name.
pub fn parse_github_account(url_or_name: &str) -> Result<String> {
    let cleaned = url_or_name.trim();
    if cleaned.is_empty() {
        return Err(GitHubError::MissingAccount);
    }

    let account = match Url::parse(cleaned) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default().to_lowercase();
            if !host.contains("github.com") {
                return Err(GitHubError::NotGitHub);
            }
            url.path_segments()
                .and_then(|mut segments| segments.find(|s| !s.is_empty()))
                .map(str::to_string)
                .ok_or(GitHubError::UrlWithoutAccount)?
        }
        Err(_) => {
            if cleaned.contains('/') {
                return Err(GitHubError::RepoPath);
            }
            cleaned.to_string()
        }
    };

    if !ACCOUNT_RE.is_match(&account) {
        return Err(GitHubError::InvalidAccount(account));
    }
    Ok(account)
}

/// Return the `rel="next"` target of a `Link` header, if present.
pub fn parse_next_link(link_header: &str) -> Option<String> {
    link_header
        .split(',')
        .map(str::trim)
        .filter(|section| section.contains(r#"rel="next""#) && section.starts_with('<'))
        .find_map(|section| {
            let url_part = section.split(';').next()?.trim();
            url_part.strip_prefix('<')?.strip_suffix('>').map(str::to_string)
        })
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    /// Client for `api_base` (normally [`API_BASE`]), authenticated when a
    /// non-blank token is given.
    pub fn with_api_base(api_base: &str, token: Option<&str>) -> Result<Self> {
        Self::build(api_base, token, true)
    }

    fn build(api_base: &str, token: Option<&str>, use_env_proxy: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-baseline/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| GitHubError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if !use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client, api_base: api_base.trim_end_matches('/').to_string() })
    }

    /// Full names (`owner/name`) of every repository owned by `account`.
    pub fn list_repositories(&self, account: &str) -> Result<Vec<String>> {
        let mut repos = Vec::new();
        let mut next_url = Some(format!(
            "{}/users/{account}/repos?per_page=100&type=owner&sort=full_name",
            self.api_base
        ));

        while let Some(url) = next_url.take() {
            debug!("GET {url}");
            let response = self.client.get(&url).send()?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(GitHubError::NotFound(account.to_string()));
            }
            if !status.is_success() {
                return Err(GitHubError::Status(status.as_u16()));
            }

            next_url = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_next_link);

            let payload: serde_json::Value = response.json()?;
            let items = payload.as_array().ok_or(GitHubError::UnexpectedPayload)?;
            for item in items {
                let summary: RepoSummary = serde_json::from_value(item.clone())
                    .map_err(|_| GitHubError::UnexpectedPayload)?;
                if let Some(full_name) = summary.full_name.filter(|n| !n.is_empty()) {
                    repos.push(full_name);
                }
            }
        }

        Ok(repos)
    }
}

/// Write repositories one per line, sorted and de-duplicated.
pub fn write_repo_list(path: &Path, repos: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let unique: BTreeSet<&str> = repos.iter().map(String::as_str).collect();
    let mut content = String::new();
    for repo in unique {
        content.push_str(repo);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

/// Resolve the account, fetch its repositories and write them to `output`.
pub fn export_repos(
    client: &GitHubClient,
    url_or_name: &str,
    output: &Path,
) -> Result<(String, Vec<String>)> {
    let account = parse_github_account(url_or_name)?;
    let repos = client.list_repositories(&account)?;
    write_repo_list(output, &repos)?;
    Ok((account, repos))
}
