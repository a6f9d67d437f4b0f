// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testsummary library
//!
//! This module exports the aggregation, rendering and configuration used by
//! the `testsummary` binary, for use in integration tests and as a library.

use anyhow::{Context, Result};
use tracing::{debug, info};

use testsummary_parser::TestResult;

pub mod aggregate;
pub mod config;
pub mod render;

pub use config::{Config, ConfigError, OutputFormat};

/// Summarize the reports named by `config` and write the output
///
/// Returns the merged result so callers can inspect the counts.
///
/// # Errors
///
/// Returns an error if a path cannot be expanded, a report cannot be read or
/// parsed, or an output cannot be written.
pub async fn run(config: &Config) -> Result<TestResult> {
    let paths = aggregate::expand_paths(&config.paths)?;
    debug!(paths = ?paths, show = %config.show, "Reports to summarize");

    let result = aggregate::summarize(&paths).await?;
    let output = render::render(&result, config.show, config.format)?;

    match config.output_path() {
        Some(path) => {
            tokio::fs::write(path, &output)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote test summary");
        }
        None => println!("{output}"),
    }

    if let Some(path) = &config.github_output {
        aggregate::write_github_outputs(path, &result.counts()).await?;
    }

    Ok(result)
}
