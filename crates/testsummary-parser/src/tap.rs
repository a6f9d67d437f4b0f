// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TAP (Test Anything Protocol) parsing
//!
//! The parser walks the report line by line. Each line is classified, and
//! result lines are fed to a small state machine (`SuiteBuilder`) that
//! infers suite boundaries from comment lines: TAP has no suites of its own,
//! so a comment before a run of results becomes that run's suite name.
//!
//! # Example
//!
//! ```
//! use testsummary_parser::tap::parse_tap;
//!
//! let result = parse_tap("# group A\nok 1 - x\nnot ok 2 - y # TODO later\n").unwrap();
//! assert_eq!(result.counts().passed, 1);
//! assert_eq!(result.counts().skipped, 1);
//! assert_eq!(result.suites()[0].name.as_deref(), Some("group A"));
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, trace, warn};

use crate::error::ReportError;
use crate::result::{TestCase, TestResult, TestStatus, TestSuite};

const VERSION_13: &str = "TAP version 13";
const DIAGNOSTIC_OPEN: &str = "  ---";
const DIAGNOSTIC_CLOSE: &str = "  ...";
const DIAGNOSTIC_INDENT: &str = "  ";
const BAIL_OUT: &str = "Bail out!";

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#(.*)$").expect("valid comment regex"));

static OK_SKIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ok\b(?:\s+(\d+))?\s*-?\s*([^#]*?)\s*#\s*(?i:skip)\S*(?:\s+(.*?))?\s*$")
        .expect("valid ok/skip regex")
});

static OK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ok\b(?:\s+(\d+))?\s*-?\s*(.*?)\s*$").expect("valid ok regex")
});

static NOT_OK_TODO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^not ok\b(?:\s+(\d+))?\s*-?\s*([^#]*?)\s*#\s*(?i:todo)(?:\s+(.*?))?\s*$")
        .expect("valid not ok/todo regex")
});

static NOT_OK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^not ok\b(?:\s+(\d+))?\s*-?\s*(.*?)\s*$").expect("valid not ok regex")
});

static PLAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1\.\.(\d+)(?:\s.*)?$").expect("valid plan regex"));

/// Parse a complete TAP report
///
/// # Errors
///
/// Returns a [`ReportError`] for an unrecognized line, a malformed or
/// unterminated diagnostic block, results after the trailing plan, or a
/// second plan line. No partial result is returned.
pub fn parse_tap(content: &str) -> Result<TestResult, ReportError> {
    TapParser::new(content).run()
}

// ============================================================================
// Line classification
// ============================================================================

/// A single result line, before numbering is applied
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultLine<'a> {
    number: Option<u64>,
    status: TestStatus,
    name: Option<&'a str>,
    reason: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TapLine<'a> {
    Comment(&'a str),
    Result(ResultLine<'a>),
    BailOut(&'a str),
    Blank,
    Plan(Option<usize>),
    Unrecognized,
}

fn classify(line: &str) -> TapLine<'_> {
    if let Some(caps) = COMMENT.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str()).trim();
        return TapLine::Comment(text);
    }

    let directives: [(&Regex, TestStatus); 4] = [
        (&*OK_SKIP, TestStatus::Skip),
        (&*OK, TestStatus::Pass),
        (&*NOT_OK_TODO, TestStatus::Skip),
        (&*NOT_OK, TestStatus::Fail),
    ];
    for (regex, status) in directives {
        if let Some(caps) = regex.captures(line) {
            return TapLine::Result(result_line(&caps, status));
        }
    }

    if let Some(message) = line.strip_prefix(BAIL_OUT) {
        return TapLine::BailOut(message.trim());
    }
    if line.trim().is_empty() {
        return TapLine::Blank;
    }
    if let Some(caps) = PLAN.captures(line) {
        return TapLine::Plan(caps.get(1).and_then(|m| m.as_str().parse().ok()));
    }

    TapLine::Unrecognized
}

fn result_line<'a>(caps: &Captures<'a>, status: TestStatus) -> ResultLine<'a> {
    let non_empty = |i: usize| caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());
    ResultLine {
        number: caps.get(1).and_then(|m| m.as_str().parse().ok()),
        status,
        name: non_empty(2),
        reason: non_empty(3),
    }
}

// ============================================================================
// Suite inference
// ============================================================================

/// Where the builder is between suite boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
enum SuiteState {
    NoPendingLabel,
    PendingLabel(String),
    AccumulatingCases {
        label: Option<String>,
        cases: Vec<TestCase>,
    },
}

/// Groups result lines into suites named by the comments preceding them
#[derive(Debug)]
struct SuiteBuilder {
    state: SuiteState,
    suites: Vec<TestSuite>,
}

impl SuiteBuilder {
    fn new() -> Self {
        Self {
            state: SuiteState::NoPendingLabel,
            suites: Vec::new(),
        }
    }

    fn comment(&mut self, text: &str) {
        self.state = match std::mem::replace(&mut self.state, SuiteState::NoPendingLabel) {
            SuiteState::NoPendingLabel => SuiteState::PendingLabel(text.to_string()),
            SuiteState::PendingLabel(label) => SuiteState::PendingLabel(format!("{label} {text}")),
            SuiteState::AccumulatingCases { label, cases } => {
                self.close(label, cases);
                SuiteState::PendingLabel(text.to_string())
            }
        };
    }

    fn case(&mut self, case: TestCase) {
        self.state = match std::mem::replace(&mut self.state, SuiteState::NoPendingLabel) {
            SuiteState::NoPendingLabel => SuiteState::AccumulatingCases {
                label: None,
                cases: vec![case],
            },
            SuiteState::PendingLabel(label) => SuiteState::AccumulatingCases {
                label: Some(label),
                cases: vec![case],
            },
            SuiteState::AccumulatingCases { label, mut cases } => {
                cases.push(case);
                SuiteState::AccumulatingCases { label, cases }
            }
        };
    }

    fn close(&mut self, label: Option<String>, cases: Vec<TestCase>) {
        debug!(suite = ?label, cases = cases.len(), "Closing TAP suite");
        self.suites.push(TestSuite::new(label, cases));
    }

    fn finish(mut self) -> Vec<TestSuite> {
        match std::mem::replace(&mut self.state, SuiteState::NoPendingLabel) {
            SuiteState::AccumulatingCases { label, cases } => self.close(label, cases),
            SuiteState::PendingLabel(label) => {
                debug!(label = %label, "Dropping TAP label with no results");
            }
            SuiteState::NoPendingLabel => {}
        }

        // A stream with no results still reports one (empty) suite
        if self.suites.is_empty() {
            self.suites.push(TestSuite::default());
        }
        self.suites
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Implicit TAP numbering: a monotonic high-water mark
#[derive(Debug, Default)]
struct Numbering {
    max: u64,
}

impl Numbering {
    fn assign(&mut self, explicit: Option<u64>) -> u64 {
        match explicit {
            Some(number) => {
                self.max = self.max.max(number);
                number
            }
            None => {
                self.max = self.max.saturating_add(1);
                self.max
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    count: Option<usize>,
    trailer: bool,
}

struct TapParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    suites: SuiteBuilder,
    numbering: Numbering,
    plan: Option<Plan>,
    results: usize,
    exception: Option<String>,
}

impl<'a> TapParser<'a> {
    fn new(content: &'a str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self {
            lines: content.lines().collect(),
            pos: 0,
            suites: SuiteBuilder::new(),
            numbering: Numbering::default(),
            plan: None,
            results: 0,
            exception: None,
        }
    }

    /// Next line with its 1-based line number
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some((self.pos, line))
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn header(&mut self) {
        while self.peek().is_some_and(|l| l.trim().is_empty()) {
            self.pos += 1;
        }

        if self.peek() == Some(VERSION_13) {
            debug!("TAP version 13 header");
            self.pos += 1;
        }

        if let Some(TapLine::Plan(count)) = self.peek().map(classify) {
            debug!(count = ?count, "TAP plan in header");
            self.plan = Some(Plan {
                count,
                trailer: false,
            });
            self.pos += 1;
        }
    }

    fn run(mut self) -> Result<TestResult, ReportError> {
        self.header();

        while let Some((line_number, line)) = self.next_line() {
            match classify(line) {
                TapLine::Comment("") | TapLine::Blank => {}
                TapLine::Comment(text) => self.suites.comment(text),
                TapLine::Result(result) => self.result(line_number, result)?,
                TapLine::BailOut(message) => {
                    debug!(line = line_number, reason = message, "TAP bail out");
                    self.exception = Some(message.to_string());
                    break;
                }
                TapLine::Plan(count) => {
                    if self.plan.is_some() {
                        return Err(ReportError::DuplicatePlan { line_number });
                    }
                    self.plan = Some(Plan {
                        count,
                        trailer: true,
                    });
                }
                TapLine::Unrecognized => {
                    return Err(ReportError::UnrecognizedLine {
                        line_number,
                        content: line.to_string(),
                    });
                }
            }
        }

        self.check_plan();
        Ok(TestResult::new(self.suites.finish(), self.exception))
    }

    fn result(&mut self, line_number: usize, line: ResultLine<'a>) -> Result<(), ReportError> {
        if self.plan.is_some_and(|p| p.trailer) {
            return Err(ReportError::ResultsAfterTrailer { line_number });
        }

        let number = self.numbering.assign(line.number);
        let details = self.diagnostic_block()?;
        trace!(number, status = %line.status, "TAP result");

        self.results += 1;
        self.suites.case(TestCase {
            status: line.status,
            name: line.name.map(str::to_string),
            description: line.reason.map(str::to_string),
            message: None,
            details,
            duration: None,
        });
        Ok(())
    }

    /// Consume the diagnostic block following a result line, if any
    fn diagnostic_block(&mut self) -> Result<Option<String>, ReportError> {
        if self.peek() != Some(DIAGNOSTIC_OPEN) {
            return Ok(None);
        }
        let Some((open_line, _)) = self.next_line() else {
            return Ok(None);
        };

        let mut details: Vec<&str> = Vec::new();
        loop {
            match self.next_line() {
                None => {
                    return Err(ReportError::TruncatedDiagnosticBlock {
                        line_number: open_line,
                    });
                }
                Some((_, DIAGNOSTIC_CLOSE)) => break,
                Some((line_number, line)) => match line.strip_prefix(DIAGNOSTIC_INDENT) {
                    Some(detail) => details.push(detail),
                    None => {
                        return Err(ReportError::MalformedDiagnosticBlock {
                            line_number,
                            content: line.to_string(),
                        });
                    }
                },
            }
        }

        Ok((!details.is_empty()).then(|| details.join("\n")))
    }

    fn check_plan(&self) {
        let Some(Plan {
            count: Some(declared),
            ..
        }) = self.plan
        else {
            return;
        };

        if self.exception.is_none() && declared != self.results {
            warn!(
                declared,
                actual = self.results,
                "TAP plan does not match the number of results"
            );
        }
    }
}
