// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the testsummary command
//!
//! This module provides the command-line arguments, their environment
//! fallbacks for GitHub Actions, and logging options.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use testsummary_parser::StatusFilter;

/// Value of `--output` that writes to standard output
pub const STDOUT: &str = "-";

/// Summarize TAP and JUnit XML test reports
#[derive(Parser, Debug, Clone)]
#[command(name = "testsummary")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Test report files or glob patterns
    ///
    /// Each value may hold several newline-separated entries, as produced
    /// by a multi-line YAML scalar. Patterns containing `*`, `?` or `[`
    /// are expanded.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<String>,

    /// File to write the summary to, or `-` for standard output
    #[arg(
        short,
        long,
        env = "GITHUB_STEP_SUMMARY",
        default_value = STDOUT,
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Test statuses to list in the results table
    ///
    /// A comma-separated list of `pass`, `fail` and `skip`, or `all` or
    /// `none`.
    #[arg(short, long, default_value = "fail", value_name = "LIST")]
    pub show: StatusFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dashboard)]
    pub format: OutputFormat,

    /// File to append `passed`, `failed`, `skipped` and `total` counts to
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "FILE")]
    pub github_output: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with a summary written
    /// to stdout.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Rendered output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// HTML summary image and results table
    #[default]
    Dashboard,
    /// The merged result as JSON
    Json,
}

impl Config {
    /// The output file, or `None` for standard output
    #[must_use]
    pub fn output_path(&self) -> Option<&Path> {
        (self.output.as_os_str() != STDOUT).then_some(self.output.as_path())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No report paths were given
    /// - The directory of the output file or of the GitHub output file
    ///   does not exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigError::NoPaths);
        }

        for path in self.output_path().into_iter().chain(self.github_output.as_deref()) {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.is_dir()
            {
                return Err(ConfigError::OutputDirectoryNotFound(parent.to_path_buf()));
            }
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No report paths given
    #[error("No test report paths given")]
    NoPaths,

    /// Output directory does not exist
    #[error("Output directory not found: {0}")]
    OutputDirectoryNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use testsummary_parser::TestStatus;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["testsummary", "report.tap"]);
        assert_eq!(config.paths, vec!["report.tap".to_string()]);
        assert_eq!(config.show, StatusFilter::only(TestStatus::Fail));
        assert_eq!(config.format, OutputFormat::Dashboard);
        assert!(!config.verbose);
        assert!(!config.quiet);
        if std::env::var_os("GITHUB_STEP_SUMMARY").is_none() {
            assert_eq!(config.output_path(), None);
        }
    }

    #[test]
    fn test_show_list() {
        let config = parse(&["testsummary", "--show", "fail, skip", "a.xml"]);
        assert_eq!(config.show, TestStatus::Fail | TestStatus::Skip);

        let config = parse(&["testsummary", "-s", "none", "a.xml"]);
        assert!(config.show.is_empty());
    }

    #[test]
    fn test_unknown_show_rejected() {
        let err = Config::try_parse_from(["testsummary", "--show", "flaky", "a.xml"]).unwrap_err();
        assert!(err.to_string().contains("unknown test type: flaky"));
    }

    #[test]
    fn test_output_path() {
        let config = parse(&["testsummary", "-o", "summary.html", "a.xml"]);
        assert_eq!(config.output_path(), Some(Path::new("summary.html")));

        let config = parse(&["testsummary", "-o", "-", "a.xml"]);
        assert_eq!(config.output_path(), None);
    }

    #[test]
    fn test_validate_requires_paths() {
        let config = parse(&["testsummary", "-o", "-"]);
        assert!(matches!(config.validate(), Err(ConfigError::NoPaths)));

        let config = parse(&["testsummary", "-o", "-", "\n"]);
        assert!(matches!(config.validate(), Err(ConfigError::NoPaths)));
    }

    #[test]
    fn test_validate_output_directory() {
        let config = parse(&[
            "testsummary",
            "-o",
            "/nonexistent/testsummary/dir/summary.html",
            "a.xml",
        ]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutputDirectoryNotFound(_))
        ));

        let config = parse(&["testsummary", "-o", "summary.html", "a.xml"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["testsummary", "a"]).log_level(), tracing::Level::INFO);
        assert_eq!(parse(&["testsummary", "-v", "a"]).log_level(), tracing::Level::DEBUG);
        assert_eq!(parse(&["testsummary", "-q", "a"]).log_level(), tracing::Level::WARN);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
