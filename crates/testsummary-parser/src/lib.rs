// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! testsummary-parser: TAP and JUnit XML report parsing
//!
//! This library crate turns test reports in TAP or JUnit XML form into one
//! normalized [`TestResult`]: per-status counts, suites of cases and failure
//! diagnostics. It does no file I/O; callers hand it text (or an already
//! decoded [`XmlDocument`]).
//!
//! # Example
//!
//! ```
//! use testsummary_parser::{detect_and_parse, TestResult};
//!
//! let tap = detect_and_parse("unit.tap", "ok 1 - adds\nnot ok 2 - divides\n").unwrap();
//! let junit = detect_and_parse(
//!     "integration.xml",
//!     r#"<testsuite name="api"><testcase name="login"/></testsuite>"#,
//! )
//! .unwrap();
//!
//! let total: TestResult = [tap, junit].into_iter().collect();
//! assert_eq!(total.counts().passed, 2);
//! assert_eq!(total.counts().failed, 1);
//! assert_eq!(total.suites().len(), 2);
//! ```

pub mod detect;
pub mod error;
pub mod junit;
pub mod result;
pub mod tap;
pub mod xml;

pub use detect::{DetectedReport, ReportFormat, detect, detect_and_parse};
pub use error::ReportError;
pub use junit::{parse_junit, parse_junit_str};
pub use result::{
    StatusFilter, TestCase, TestCounts, TestResult, TestStatus, TestSuite, UnknownStatus,
};
pub use tap::parse_tap;
pub use xml::{XmlDocument, XmlElement};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::detect::detect_and_parse;
    pub use crate::error::ReportError;
    pub use crate::result::{StatusFilter, TestCase, TestResult, TestStatus, TestSuite};
}
