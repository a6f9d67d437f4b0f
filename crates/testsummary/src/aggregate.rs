// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report aggregation
//!
//! Expands the requested paths, parses every report concurrently and merges
//! the per-file results in the order the files were named.
//!
//! # Example
//!
//! ```no_run
//! use testsummary::aggregate::{expand_paths, summarize};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let paths = expand_paths(&["target/reports/*.xml".to_string()])?;
//! let result = summarize(&paths).await?;
//! println!("{} failed", result.counts().failed);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use testsummary_parser::{TestCounts, TestResult, detect_and_parse};

// ============================================================================
// Path expansion
// ============================================================================

/// Whether `path` contains glob metacharacters
#[must_use]
pub fn has_magic(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Expand path arguments into report files
///
/// Each argument is split on newlines. Entries with glob metacharacters are
/// expanded (matches in sorted order); others are taken as given.
///
/// # Errors
///
/// Returns an error for an invalid glob pattern or an unreadable match.
pub fn expand_paths(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in args.iter().flat_map(|arg| arg.lines()).map(str::trim) {
        if entry.is_empty() {
            continue;
        }

        if !has_magic(entry) {
            paths.push(PathBuf::from(entry));
            continue;
        }

        let matches = glob::glob(entry)
            .with_context(|| format!("Invalid glob pattern '{entry}'"))?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to expand glob pattern '{entry}'"))?;

        if matches.is_empty() {
            warn!(pattern = entry, "Glob pattern matched no files");
        }
        debug!(pattern = entry, matches = matches.len(), "Expanded glob pattern");
        paths.extend(matches);
    }

    Ok(paths)
}

// ============================================================================
// Parsing
// ============================================================================

/// Read and parse one report
///
/// # Errors
///
/// Returns an error naming the file if it cannot be read or parsed.
pub async fn parse_file(path: &Path) -> Result<TestResult> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let identifier = path.display().to_string();
    let result = tokio::task::spawn_blocking(move || detect_and_parse(&identifier, &content))
        .await
        .context("Parser task failed")?
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let counts = result.counts();
    info!(
        path = %path.display(),
        passed = counts.passed,
        failed = counts.failed,
        skipped = counts.skipped,
        "Parsed test report"
    );
    if let Some(exception) = result.exception() {
        warn!(path = %path.display(), exception, "Test run aborted");
    }

    Ok(result)
}

/// Parse every report concurrently and merge them in input order
///
/// # Errors
///
/// Returns the error of the first file, in input order, that fails. Tasks
/// for the files after it are aborted.
pub async fn summarize(paths: &[PathBuf]) -> Result<TestResult> {
    let mut handles = paths
        .iter()
        .cloned()
        .map(|path| tokio::spawn(async move { parse_file(&path).await }))
        .collect::<Vec<_>>()
        .into_iter();

    let mut total = TestResult::empty();
    while let Some(handle) = handles.next() {
        match handle.await.context("Report task failed").and_then(|r| r) {
            Ok(result) => total.merge(result),
            Err(e) => {
                for pending in handles {
                    pending.abort();
                }
                return Err(e);
            }
        }
    }

    let counts = total.counts();
    info!(
        files = paths.len(),
        passed = counts.passed,
        failed = counts.failed,
        skipped = counts.skipped,
        "Summarized test reports"
    );

    Ok(total)
}

// ============================================================================
// GitHub outputs
// ============================================================================

/// Step outputs in `GITHUB_OUTPUT` format
#[must_use]
pub fn github_outputs(counts: &TestCounts) -> String {
    [
        ("passed", counts.passed),
        ("failed", counts.failed),
        ("skipped", counts.skipped),
        ("total", counts.total()),
    ]
    .into_iter()
    .map(|(key, value)| format!("{key}={value}\n"))
    .collect()
}

/// Append the step outputs to `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub async fn write_github_outputs(path: &Path, counts: &TestCounts) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(github_outputs(counts).as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush().await?;

    debug!(path = %path.display(), "Wrote GitHub step outputs");
    Ok(())
}
