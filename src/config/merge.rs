//! CLI argument merging with config

use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub repos_file: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub commit_message: Option<String>,
    pub dry_run: Option<bool>,
    pub write_stats: Option<bool>,
    pub refresh_stats: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(repos_file) = cli.repos_file {
        base_config.repos_file = Some(repos_file);
    }
    if let Some(base_dir) = cli.base_dir {
        base_config.base_dir = base_dir;
    }

    if let Some(author) = cli.author {
        base_config.author = Some(author);
    }
    if let Some(year) = cli.year {
        base_config.year = year;
    }
    if let Some(commit_message) = cli.commit_message {
        base_config.commit_message = commit_message;
    }

    if let Some(dry_run) = cli.dry_run {
        base_config.dry_run = dry_run;
    }
    if let Some(write_stats) = cli.write_stats {
        base_config.write_stats = write_stats;
    }
    if let Some(refresh_stats) = cli.refresh_stats {
        base_config.refresh_stats = refresh_stats;
    }

    base_config
}

#[cfg(test)]
mod tests {
    use super::{merge_cli_with_config, CliOverrides};
    use crate::domain::Config;
    use std::path::PathBuf;

    #[test]
    fn cli_overrides_replace_base_values() {
        let base = Config {
            base_dir: PathBuf::from("/srv/checkouts"),
            author: Some("File Author".to_string()),
            year: "2019".to_string(),
            ..Config::default()
        };

        let cli = CliOverrides {
            repos_file: Some(PathBuf::from("list.txt")),
            author: Some("Cli Author".to_string()),
            dry_run: Some(true),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(base, cli);
        assert_eq!(merged.repos_file, Some(PathBuf::from("list.txt")));
        assert_eq!(merged.author.as_deref(), Some("Cli Author"));
        assert!(merged.dry_run);
        assert_eq!(merged.base_dir, PathBuf::from("/srv/checkouts"));
        assert_eq!(merged.year, "2019");
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let base = Config { write_stats: true, ..Config::default() };
        let merged = merge_cli_with_config(base, CliOverrides::default());
        assert!(merged.write_stats);
        assert!(!merged.refresh_stats);
    }
}
