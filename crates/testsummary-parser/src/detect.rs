// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report format detection
//!
//! TAP is recognized from its first line; anything else is decoded as XML
//! and accepted if its root is a JUnit `testsuites` or `testsuite` element.
//! TAP is checked first since TAP text is not well-formed XML.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReportError;
use crate::junit::parse_junit;
use crate::result::TestResult;
use crate::tap::parse_tap;
use crate::xml::XmlDocument;

/// A supported report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Test Anything Protocol
    Tap,
    /// JUnit XML
    Junit,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Tap => f.write_str("TAP"),
            ReportFormat::Junit => f.write_str("JUnit XML"),
        }
    }
}

/// A report whose format has been recognized
///
/// JUnit reports carry their decoded document so it is only parsed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedReport {
    /// TAP text
    Tap,
    /// A decoded JUnit document
    Junit(XmlDocument),
}

impl DetectedReport {
    /// The recognized format
    #[must_use]
    pub fn format(&self) -> ReportFormat {
        match self {
            DetectedReport::Tap => ReportFormat::Tap,
            DetectedReport::Junit(_) => ReportFormat::Junit,
        }
    }
}

/// Whether `content` starts like a TAP stream
#[must_use]
pub fn looks_like_tap(content: &str) -> bool {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line = content.lines().next().unwrap_or("");

    first_line == "TAP version 13" || content.starts_with("ok ") || content.starts_with("not ok ")
}

/// Recognize the format of `content`
///
/// `identifier` names the source in errors, usually its path.
///
/// # Errors
///
/// Returns `ReportError::UnknownFormat` if the content is neither TAP nor a
/// JUnit document, and `ReportError::XmlSyntax` if it is not TAP and not
/// well-formed XML either.
pub fn detect(identifier: &str, content: &str) -> Result<DetectedReport, ReportError> {
    if looks_like_tap(content) {
        return Ok(DetectedReport::Tap);
    }

    let unknown = || ReportError::UnknownFormat {
        identifier: identifier.to_string(),
    };

    if content.trim_start_matches('\u{feff}').trim().is_empty() {
        return Err(unknown());
    }

    let document = XmlDocument::parse(content)?;
    match document.root().name() {
        "testsuites" | "testsuite" => Ok(DetectedReport::Junit(document)),
        other => {
            debug!(identifier, root = other, "XML root is not a JUnit report");
            Err(unknown())
        }
    }
}

/// Detect the format of `content` and parse it
///
/// # Errors
///
/// Returns any detection or parse error; see [`detect`],
/// [`parse_tap`] and [`parse_junit`].
pub fn detect_and_parse(identifier: &str, content: &str) -> Result<TestResult, ReportError> {
    let report = detect(identifier, content)?;
    debug!(identifier, format = %report.format(), "Detected report format");

    match report {
        DetectedReport::Tap => parse_tap(content),
        DetectedReport::Junit(document) => parse_junit(&document),
    }
}
