//! Language-aware `.gitignore` generation
//!
//! Languages are inferred from file extensions collected by the stats walk,
//! and each one contributes a fixed snippet after the shared base block.

use crate::domain::{Language, RepoStats};
use std::collections::BTreeSet;

const BASE: &str = r#"# General
.DS_Store
Thumbs.db
*.log
*.tmp
*.swp
*.swo

# Editors
.vscode/
.idea/
*.iml

# Environments
.env
.env.*
"#;

const PYTHON: &str = r#"# Python
__pycache__/
*.py[cod]
*$py.class

# Distribution / packaging
build/
dist/
.eggs/
*.egg-info/

# Virtual environments
.venv/
venv/
env/

# Tooling
.mypy_cache/
.pytest_cache/
.coverage
htmlcov/
.tox/
"#;

const NODE: &str = r#"# Node / JS / TS
node_modules/
npm-debug.log*
yarn-debug.log*
pnpm-debug.log*

# Build outputs
dist/
build/
.cache/
.next/
.nuxt/

# Tooling
coverage/
.npm/
.eslintcache
"#;

const JAVA: &str = r#"# Java
*.class
*.jar
*.war
*.ear
hs_err_pid*
out/
target/
"#;

const CSHARP: &str = r#"# C#
[Bb]in/
[Oo]bj/
*.user
*.suo
*.pdb
*.cache
*.mdb
*.opendb
*.VC.db
"#;

const GO: &str = r#"# Go
bin/
*.test
"#;

const RUST: &str = r#"# Rust
target/
*.rs.bk
"#;

const CPP: &str = r#"# C / C++
*.o
*.obj
*.so
*.dll
*.dylib
*.exe
*.out
build/
cmake-build-*/
"#;

const PHP: &str = r#"# PHP
vendor/
composer.lock
"#;

const RUBY: &str = r#"# Ruby
.bundle/
vendor/bundle/
log/
tmp/
coverage/
"#;

const SWIFT: &str = r#"# Swift
.build/
DerivedData/
Package.resolved
"#;

const KOTLIN: &str = r#"# Kotlin / Gradle
.gradle/
build/
out/
"#;

/// Snippet appended for a detected language.
pub fn template_for(language: Language) -> &'static str {
    match language {
        Language::Python => PYTHON,
        Language::Node => NODE,
        Language::Java => JAVA,
        Language::Csharp => CSHARP,
        Language::Go => GO,
        Language::Rust => RUST,
        Language::Cpp => CPP,
        Language::Php => PHP,
        Language::Ruby => RUBY,
        Language::Swift => SWIFT,
        Language::Kotlin => KOTLIN,
    }
}

/// Map a lower-case extension (with leading dot) to a language.
pub fn language_for_extension(ext: &str) -> Option<Language> {
    let language = match ext {
        ".py" | ".pyw" => Language::Python,
        ".js" | ".mjs" | ".cjs" | ".ts" | ".tsx" | ".jsx" => Language::Node,
        ".java" => Language::Java,
        ".cs" => Language::Csharp,
        ".go" => Language::Go,
        ".rs" => Language::Rust,
        ".c" | ".h" | ".cpp" | ".cc" | ".cxx" | ".hpp" | ".hh" | ".hxx" => Language::Cpp,
        ".php" => Language::Php,
        ".rb" => Language::Ruby,
        ".swift" => Language::Swift,
        ".kt" | ".kts" => Language::Kotlin,
        _ => return None,
    };
    Some(language)
}

pub fn detect_languages(stats: &RepoStats) -> BTreeSet<Language> {
    stats
        .by_ext_files
        .iter()
        .filter(|(ext, count)| !ext.is_empty() && **count > 0)
        .filter_map(|(ext, _)| language_for_extension(ext))
        .collect()
}

/// Base block followed by one block per language, separated by a blank line.
pub fn generate_gitignore_content(languages: &BTreeSet<Language>) -> String {
    let parts: Vec<&str> = std::iter::once(BASE)
        .chain(languages.iter().map(|language| template_for(*language)))
        .map(str::trim_end)
        .filter(|part| !part.is_empty())
        .collect();

    let content = parts.join("\n\n");
    let content = content.trim();
    if content.is_empty() {
        String::new()
    } else {
        format!("{content}\n")
    }
}
