// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! JUnit XML mapping
//!
//! Maps an [`XmlDocument`] holding a JUnit report onto a [`TestResult`].
//! Accepted shapes are a `<testsuites>` wrapper around `<testsuite>`
//! elements, or a single top-level `<testsuite>`.

use tracing::debug;

use crate::error::ReportError;
use crate::result::{TestCase, TestResult, TestStatus, TestSuite};
use crate::xml::{XmlDocument, XmlElement};

const TAG_REPORT: &str = "testsuites";
const TAG_TEST_SUITE: &str = "testsuite";
const TAG_TEST_CASE: &str = "testcase";
const TAG_SKIPPED: &str = "skipped";
const TAG_FAILURE: &str = "failure";
const TAG_ERROR: &str = "error";

/// Decode and map a JUnit XML report
///
/// # Errors
///
/// Returns `ReportError::XmlSyntax` for malformed XML and
/// `ReportError::Structure` for a document that is not a JUnit report.
pub fn parse_junit_str(content: &str) -> Result<TestResult, ReportError> {
    parse_junit(&XmlDocument::parse(content)?)
}

/// Map a decoded JUnit XML document
///
/// An empty `<testsuites/>` or `<testsuite/>` is a valid report with no
/// suites. Suites without any `<testcase>` are left out.
///
/// # Errors
///
/// Returns `ReportError::Structure` if the root is neither `testsuites` nor
/// `testsuite`.
pub fn parse_junit(document: &XmlDocument) -> Result<TestResult, ReportError> {
    let root = document.root();

    let suites: Vec<&XmlElement> = match root.name() {
        TAG_REPORT | TAG_TEST_SUITE if root.is_empty() => {
            debug!(root = root.name(), "Empty JUnit report");
            return Ok(TestResult::empty());
        }
        TAG_REPORT => root.children_named(TAG_TEST_SUITE).collect(),
        TAG_TEST_SUITE => vec![root],
        other => {
            return Err(ReportError::Structure {
                node: format!("<{other}>"),
                message: "expected top-level testsuites or testsuite node".to_string(),
            });
        }
    };

    let suites = suites.into_iter().filter_map(map_suite).collect();
    Ok(TestResult::new(suites, None))
}

fn map_suite(suite: &XmlElement) -> Option<TestSuite> {
    let cases: Vec<TestCase> = suite.children_named(TAG_TEST_CASE).map(map_case).collect();

    if cases.is_empty() {
        debug!(suite = ?suite.attribute("name"), "JUnit suite has no test cases");
        return None;
    }

    Some(TestSuite {
        name: owned(suite.attribute("name")),
        timestamp: owned(suite.attribute("timestamp")),
        filename: owned(suite.attribute("file")),
        cases,
    })
}

/// Outcome of a testcase, decided once from its marker elements
#[derive(Debug, Clone, PartialEq, Eq)]
enum CaseOutcome {
    Skipped {
        message: Option<String>,
    },
    Failed {
        message: Option<String>,
        details: Option<String>,
    },
    Passed,
}

impl CaseOutcome {
    /// Skip wins over failure when a runner emits both
    fn of(testcase: &XmlElement) -> Self {
        if let Some(skipped) = testcase.child(TAG_SKIPPED) {
            return CaseOutcome::Skipped {
                message: owned(skipped.attribute("message")),
            };
        }

        let marker = testcase
            .child(TAG_FAILURE)
            .or_else(|| testcase.child(TAG_ERROR));
        match marker {
            Some(failure) => CaseOutcome::Failed {
                message: owned(failure.attribute("message")),
                details: Some(failure.text())
                    .filter(|t| !t.trim().is_empty())
                    .map(str::to_string),
            },
            None => CaseOutcome::Passed,
        }
    }
}

fn map_case(testcase: &XmlElement) -> TestCase {
    let (status, message, details) = match CaseOutcome::of(testcase) {
        CaseOutcome::Skipped { message } => (TestStatus::Skip, message, None),
        CaseOutcome::Failed { message, details } => (TestStatus::Fail, message, details),
        CaseOutcome::Passed => (TestStatus::Pass, None, None),
    };

    TestCase {
        status,
        name: owned(testcase.attribute("name")),
        description: owned(testcase.attribute("classname")),
        message,
        details,
        duration: owned(testcase.attribute("time")),
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}
