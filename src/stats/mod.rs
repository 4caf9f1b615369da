//! Working-tree statistics
//!
//! Counts files and approximate lines per extension, skipping the `.git`
//! directory, and renders the result as `REPO_STATS.md`.

use crate::domain::RepoStats;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Walk `repo_dir` and tally files and lines by extension.
pub fn collect_repo_stats(repo_dir: &Path) -> RepoStats {
    let mut stats = RepoStats::default();

    let walker = WalkDir::new(repo_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == ".git"));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        // Symlinked directories are not followed and do not count as files.
        if entry.file_type().is_dir() || entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let ext = extension_of(&name);
        let lines = match fs::read(entry.path()) {
            Ok(bytes) => count_lines(&bytes),
            Err(err) => {
                debug!("Counting {} as zero lines: {err}", entry.path().display());
                0
            }
        };
        stats.record(&ext, lines);
    }

    stats
}

/// Lower-case extension with its leading dot, or empty.
///
/// Leading dots belong to the stem, so `.gitignore` has no extension.
pub fn extension_of(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let rest = &file_name[stem_start..];
    match rest.rfind('.') {
        Some(idx) => rest[idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Count lines the way a universal-newline reader splits them: `\n`, `\r\n`
/// and a lone `\r` each end a line, and a trailing partial line counts.
fn count_lines(bytes: &[u8]) -> usize {
    let mut lines = 0;
    let mut iter = bytes.iter().peekable();
    while let Some(&byte) = iter.next() {
        match byte {
            b'\n' => lines += 1,
            b'\r' => {
                lines += 1;
                if iter.peek() == Some(&&b'\n') {
                    iter.next();
                }
            }
            _ => {}
        }
    }
    if matches!(bytes.last(), Some(b) if *b != b'\n' && *b != b'\r') {
        lines += 1;
    }
    lines
}

pub fn format_stats_markdown(stats: &RepoStats, repo_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Repository statistics for {repo_name}\n\n"));
    out.push_str(&format!("- Total files: {}\n", stats.total_files));
    out.push_str(&format!("- Total lines (approx): {}\n\n", stats.total_lines));
    out.push_str("## By extension\n\n");
    out.push_str("| Extension | Files | Approx. lines |\n");
    out.push_str("|-----------|-------|---------------|\n");

    let mut exts: Vec<(&String, &usize)> = stats.by_ext_files.iter().collect();
    exts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (ext, files) in exts {
        let lines = stats.by_ext_lines.get(ext).copied().unwrap_or(0);
        let label = if ext.is_empty() { "(no extension)" } else { ext.as_str() };
        out.push_str(&format!("| {label} | {files} | {lines} |\n"));
    }

    out.push_str("\n_These statistics are approximate and were generated automatically._\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use tempfile::TempDir;

    #[test]
    fn extension_rules() {
        assert_eq!(extension_of("main.RS"), ".rs");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of(".gitignore"), "");
        assert_eq!(extension_of("..hidden"), "");
        assert_eq!(extension_of(".env.local"), ".local");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn line_counting() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"one"), 1);
        assert_eq!(count_lines(b"one\n"), 1);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b"\n\n"), 2);
        assert_eq!(count_lines(b"a\rb\rc"), 3);
        assert_eq!(count_lines(b"a\r\nb\r\n"), 2);
        assert_eq!(count_lines(b"\r\r\n\n"), 3);
    }

    #[test]
    fn walk_skips_git_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/config"), "[core]\n").unwrap();
        fs::write(root.join(".git/objects/blob"), "x\ny\n").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/lib.rs"), "fn a() {}\nfn b() {}\n").unwrap();
        fs::write(root.join("src/util.rs"), "fn c() {}").unwrap();
        fs::write(root.join("Makefile"), "all:\n\ttrue\n").unwrap();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();

        let stats = collect_repo_stats(root);
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.total_lines, 6);
        assert_eq!(stats.by_ext_files[".rs"], 2);
        assert_eq!(stats.by_ext_lines[".rs"], 3);
        assert_eq!(stats.by_ext_files[""], 2);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("vendor.py")).unwrap();

        let stats = collect_repo_stats(root);
        assert_eq!(stats.total_files, 0);
        assert!(!stats.by_ext_files.contains_key(".py"));
    }

    #[test]
    fn markdown_sorted_by_file_count() {
        let mut stats = RepoStats::default();
        stats.record(".md", 12);
        stats.record(".py", 40);
        stats.record(".py", 2);
        stats.record("", 3);

        assert_snapshot!(format_stats_markdown(&stats, "demo"), @r###"
        # Repository statistics for demo

        - Total files: 4
        - Total lines (approx): 57

        ## By extension

        | Extension | Files | Approx. lines |
        |-----------|-------|---------------|
        | .py | 2 | 42 |
        | (no extension) | 1 | 3 |
        | .md | 1 | 12 |

        _These statistics are approximate and were generated automatically._
        "###);
    }
}
