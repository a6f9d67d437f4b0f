// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test result types
//!
//! These are the format-agnostic values every parser produces. A
//! [`TestResult`] derives its counts from its suites, so the counts always
//! agree with the cases it holds.

use std::fmt;
use std::ops::{AddAssign, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped (including TAP TODO failures)
    Skip,
}

impl TestStatus {
    /// All statuses in display order
    pub const ALL: [TestStatus; 3] = [TestStatus::Pass, TestStatus::Fail, TestStatus::Skip];

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::Skip => "skip",
        }
    }

    fn bit(self) -> u8 {
        match self {
            TestStatus::Pass => 1 << 0,
            TestStatus::Fail => 1 << 1,
            TestStatus::Skip => 1 << 2,
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status name that is not `pass`, `fail` or `skip`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown test type: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(TestStatus::Pass),
            "fail" => Ok(TestStatus::Fail),
            "skip" => Ok(TestStatus::Skip),
            _ => Err(UnknownStatus(s.trim().to_string())),
        }
    }
}

/// A set of statuses a caller wants to see
///
/// This is a query predicate, kept apart from [`TestStatus`] which is the
/// outcome of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusFilter(u8);

impl StatusFilter {
    /// Matches nothing
    pub const NONE: StatusFilter = StatusFilter(0);
    /// Matches every status
    pub const ALL: StatusFilter = StatusFilter(0b111);

    /// A filter matching exactly one status
    #[must_use]
    pub fn only(status: TestStatus) -> Self {
        Self(status.bit())
    }

    /// Whether `status` is in the set
    #[must_use]
    pub fn contains(self, status: TestStatus) -> bool {
        self.0 & status.bit() != 0
    }

    /// Add a status to the set
    pub fn insert(&mut self, status: TestStatus) {
        self.0 |= status.bit();
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The single status in the set, if it holds exactly one
    #[must_use]
    pub fn single(self) -> Option<TestStatus> {
        let mut statuses = self.statuses();
        match (statuses.next(), statuses.next()) {
            (Some(status), None) => Some(status),
            _ => None,
        }
    }

    /// Statuses in the set, in display order
    pub fn statuses(self) -> impl Iterator<Item = TestStatus> {
        TestStatus::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl From<TestStatus> for StatusFilter {
    fn from(status: TestStatus) -> Self {
        Self::only(status)
    }
}

impl BitOr for StatusFilter {
    type Output = StatusFilter;

    fn bitor(self, rhs: StatusFilter) -> StatusFilter {
        StatusFilter(self.0 | rhs.0)
    }
}

impl BitOr<TestStatus> for StatusFilter {
    type Output = StatusFilter;

    fn bitor(self, rhs: TestStatus) -> StatusFilter {
        StatusFilter(self.0 | rhs.bit())
    }
}

impl BitOr for TestStatus {
    type Output = StatusFilter;

    fn bitor(self, rhs: TestStatus) -> StatusFilter {
        StatusFilter(self.bit() | rhs.bit())
    }
}

impl BitOrAssign<TestStatus> for StatusFilter {
    fn bitor_assign(&mut self, rhs: TestStatus) {
        self.insert(rhs);
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    /// Parse a comma-separated list such as `fail, skip`
    ///
    /// `all` and `none` are accepted as entries; names are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut filter = StatusFilter::NONE;

        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "none" => {}
                "all" => filter = StatusFilter::ALL,
                _ => filter.insert(name.parse()?),
            }
        }

        Ok(filter)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.statuses().map(TestStatus::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

/// A single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Outcome
    pub status: TestStatus,
    /// Test name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description (TAP directive reason, JUnit classname)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Short failure or skip message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Free-form diagnostic text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Duration exactly as reported, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl TestCase {
    /// Create a case with the given outcome and no other data
    #[must_use]
    pub fn new(status: TestStatus) -> Self {
        Self {
            status,
            name: None,
            description: None,
            message: None,
            details: None,
            duration: None,
        }
    }

    /// Set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the details
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// An ordered group of test cases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Timestamp exactly as reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Source file the suite was defined in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Cases in report order
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    /// Create a suite holding `cases`
    #[must_use]
    pub fn new(name: Option<String>, cases: Vec<TestCase>) -> Self {
        Self {
            name,
            cases,
            ..Default::default()
        }
    }
}

/// Number of cases per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    /// Passed cases
    pub passed: usize,
    /// Failed cases
    pub failed: usize,
    /// Skipped cases
    pub skipped: usize,
}

impl TestCounts {
    /// Count the cases of every suite
    #[must_use]
    pub fn tally(suites: &[TestSuite]) -> Self {
        let mut counts = Self::default();
        for case in suites.iter().flat_map(|s| &s.cases) {
            counts.record(case.status);
        }
        counts
    }

    /// Count one more case with `status`
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
        }
    }

    /// Count for one status
    #[must_use]
    pub fn get(&self, status: TestStatus) -> usize {
        match status {
            TestStatus::Pass => self.passed,
            TestStatus::Fail => self.failed,
            TestStatus::Skip => self.skipped,
        }
    }

    /// Total number of cases
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

impl AddAssign for TestCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.passed += rhs.passed;
        self.failed += rhs.failed;
        self.skipped += rhs.skipped;
    }
}

/// The parsed content of one or more reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestResult {
    counts: TestCounts,
    suites: Vec<TestSuite>,
    /// Set when the run itself aborted (TAP bail out)
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<String>,
}

impl TestResult {
    /// Build a result from suites, deriving the counts
    #[must_use]
    pub fn new(suites: Vec<TestSuite>, exception: Option<String>) -> Self {
        Self {
            counts: TestCounts::tally(&suites),
            suites,
            exception,
        }
    }

    /// A result with no suites
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Per-status counts
    #[must_use]
    pub fn counts(&self) -> TestCounts {
        self.counts
    }

    /// Suites in report order
    #[must_use]
    pub fn suites(&self) -> &[TestSuite] {
        &self.suites
    }

    /// Why the run aborted, if it did
    #[must_use]
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// Consume the result, keeping its suites
    #[must_use]
    pub fn into_suites(self) -> Vec<TestSuite> {
        self.suites
    }

    /// All cases across all suites
    pub fn cases(&self) -> impl Iterator<Item = &TestCase> {
        self.suites.iter().flat_map(|s| &s.cases)
    }

    /// Cases whose status is in `filter`, with their suite
    pub fn cases_matching(
        &self,
        filter: StatusFilter,
    ) -> impl Iterator<Item = (&TestSuite, &TestCase)> {
        self.suites.iter().flat_map(move |suite| {
            suite
                .cases
                .iter()
                .filter(move |case| filter.contains(case.status))
                .map(move |case| (suite, case))
        })
    }

    /// No failures and no aborted run
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.counts.failed == 0 && self.exception.is_none()
    }

    /// Append another result: counts are summed, suites concatenated
    ///
    /// The first exception seen is kept.
    pub fn merge(&mut self, other: TestResult) {
        self.counts += other.counts;
        self.suites.extend(other.suites);
        if self.exception.is_none() {
            self.exception = other.exception;
        }
    }
}

impl Extend<TestResult> for TestResult {
    fn extend<I: IntoIterator<Item = TestResult>>(&mut self, iter: I) {
        for result in iter {
            self.merge(result);
        }
    }
}

impl FromIterator<TestResult> for TestResult {
    fn from_iter<I: IntoIterator<Item = TestResult>>(iter: I) -> Self {
        let mut total = TestResult::empty();
        total.extend(iter);
        total
    }
}
