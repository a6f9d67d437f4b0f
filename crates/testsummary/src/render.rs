// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Dashboard rendering
//!
//! Produces the HTML fragment written to a GitHub step summary: a summary
//! image with the pass/fail/skip counts, and a table listing the cases the
//! caller asked to see.

use anyhow::{Context, Result};

use testsummary_parser::{StatusFilter, TestCase, TestResult, TestStatus};

use crate::config::OutputFormat;

const DASHBOARD_URL: &str = "https://svg.test-summary.com/dashboard.svg";
const PASS_ICON_URL: &str = "https://svg.test-summary.com/icon/pass.svg?s=12";
const FAIL_ICON_URL: &str = "https://svg.test-summary.com/icon/fail.svg?s=12";
const SKIP_ICON_URL: &str = "https://svg.test-summary.com/icon/skip.svg?s=12";

const UNNAMED_TEST_CASE: &str = "<no name>";

const FOOTER: &str = "This test report was produced by testsummary.";

/// Escape `& " ' < >` for HTML text and attribute values
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Render `result` in the requested format
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(result: &TestResult, show: StatusFilter, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Dashboard => Ok(dashboard(result, show)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize test results")
        }
    }
}

/// Summary image, exception notice and results table
#[must_use]
pub fn dashboard(result: &TestResult, show: StatusFilter) -> String {
    let mut out = dashboard_summary(result);
    if let Some(exception) = dashboard_exception(result) {
        out.push_str(&exception);
    }
    out.push_str(&dashboard_results(result, show));
    out
}

/// The summary image, with the counts as alt text
#[must_use]
pub fn dashboard_summary(result: &TestResult) -> String {
    let counts = result.counts();

    let parts: Vec<String> = [
        (counts.passed, "passed"),
        (counts.failed, "failed"),
        (counts.skipped, "skipped"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, label)| format!("{n} {label}"))
    .collect();

    format!(
        r#"<img src="{DASHBOARD_URL}?p={}&f={}&s={}" alt="{}">"#,
        counts.passed,
        counts.failed,
        counts.skipped,
        parts.join(", ")
    )
}

/// A paragraph naming why the run aborted, if it did
#[must_use]
pub fn dashboard_exception(result: &TestResult) -> Option<String> {
    result
        .exception()
        .map(|e| format!("<p><strong>Test run aborted:</strong> {}</p>", escape_html(e)))
}

/// The results table for cases matching `show`
///
/// Empty when `show` is empty or no case matches.
#[must_use]
pub fn dashboard_results(result: &TestResult, show: StatusFilter) -> String {
    let rows: Vec<String> = result
        .cases_matching(show)
        .map(|(_, case)| case_row(case))
        .collect();

    if rows.is_empty() {
        return String::new();
    }

    let mut table = String::from("<table>");
    table.push_str(&format!(
        r#"<tr><th align="left">{}:</th></tr>"#,
        status_title(show)
    ));
    for row in rows {
        table.push_str(&row);
    }
    table.push_str(&format!("<tr><td><sub>{FOOTER}</sub></td></tr>"));
    table.push_str("</table>");
    table
}

fn status_title(show: StatusFilter) -> &'static str {
    match show.single() {
        Some(TestStatus::Fail) => "Test failures",
        Some(TestStatus::Skip) => "Skipped tests",
        Some(TestStatus::Pass) => "Passing tests",
        None => "Test results",
    }
}

fn status_icon(status: TestStatus) -> String {
    let url = match status {
        TestStatus::Pass => PASS_ICON_URL,
        TestStatus::Fail => FAIL_ICON_URL,
        TestStatus::Skip => SKIP_ICON_URL,
    };
    format!(r#"<img src="{url}" alt="" />"#)
}

fn case_row(case: &TestCase) -> String {
    let mut row = String::from("<tr><td>");

    row.push_str(&status_icon(case.status));
    row.push_str("&nbsp; ");
    row.push_str(&escape_html(case.name.as_deref().unwrap_or(UNNAMED_TEST_CASE)));

    if let Some(description) = &case.description {
        row.push_str(": ");
        row.push_str(&escape_html(description));
    }

    if case.message.is_some() || case.details.is_some() {
        row.push_str("<br/>\n");
        for block in [&case.message, &case.details].into_iter().flatten() {
            row.push_str("<pre><code>");
            row.push_str(&escape_html(block));
            row.push_str("</code></pre>");
        }
    }

    row.push_str("</td></tr>\n");
    row
}
