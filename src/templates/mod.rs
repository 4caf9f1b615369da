//! Content for generated baseline files

pub mod gitignore;

pub use gitignore::{detect_languages, generate_gitignore_content, language_for_extension};

const MIT_LICENSE: &str = "MIT License

Copyright (c) {year} {name}

Permission is hereby granted, free of charge, to any person obtaining a copy \
of this software and associated documentation files (the \"Software\"), to deal \
in the Software without restriction, including without limitation the rights \
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell \
copies of the Software, and to permit persons to whom the Software is \
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all \
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR \
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, \
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE \
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER \
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, \
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE \
SOFTWARE.
";

const README: &str = "# {repo_name}

This project currently has an auto-generated README.

You should replace this with proper documentation for:

- What the project does
- How to install dependencies
- How to build / run / test
";

/// Engineering playbook written to `AGENTS.md`.
pub const AGENTS: &str = r#"# AGENTS

This file documents how we expect humans and automated agents to work
with this repository. Treat it as a lightweight "engineering playbook".

## 1. Engineering values

- Prefer clarity over cleverness.
- Small, composable modules are easier to test and maintain.
- Automate repeatable tasks, but keep the automation simple enough
  that a new contributor can understand and debug it.
- Document why a decision was made, not just what was done.

## 2. Code quality

- Keep functions short and focused on a single responsibility.
- Avoid hidden global state; pass data explicitly.
- Make "failure" a first-class path: handle errors and timeouts.
- Default to immutable data structures where practical.

## 3. Documentation

- Every non-trivial module should explain:
  - What problem it solves.
  - How it is expected to be used.
  - Any surprising trade-offs or limitations.
- Favour short, accurate docs over long, outdated ones.
- Update docs in the same commit as behavioural changes.

## 4. Testing

- Prefer fast, deterministic tests that can run locally.
- When fixing a bug, add a test that would have caught it.
- Keep test fixtures small and readable.
- Make it obvious how to run the whole test suite from the command line.

## 5. Tooling & automation

- Keep CI scripts and dev tooling in version control.
- Fail fast in CI when configuration is wrong or required tools are missing.
- Log enough information that production issues can be diagnosed
  without guessing or re-running the incident.

## 6. Security & privacy

- Do not commit secrets, tokens, or production credentials.
- Treat logs and dumps that might contain user data with care.
- Rotate credentials when people leave the project or roles change.

## 7. Collaboration

- Prefer many small, focussed pull requests over huge "mega" changes.
- Make it easy for reviewers: good titles, summaries, and clear diffs.
- Assume good intent and be generous with explanations and examples.

If you are reading this and something in our workflow feels confusing,
slow, or fragile, open an issue and propose an improvement.
Small, continuous improvements compound over time.
"#;

/// MIT license text for the given year and copyright holder.
pub fn render_license(year: &str, name: &str) -> String {
    MIT_LICENSE.replace("{year}", year).replace("{name}", name)
}

pub fn render_readme(repo_name: &str) -> String {
    README.replace("{repo_name}", repo_name)
}
