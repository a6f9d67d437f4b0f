// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for testsummary-parser

use thiserror::Error;

/// Errors that can occur while detecting or parsing a test report
///
/// Every variant is fatal for the report being parsed: no partial result is
/// ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Content is neither TAP nor a JUnit XML document
    #[error("unknown test file type for '{identifier}'")]
    UnknownFormat {
        /// Identifier of the source (usually its path)
        identifier: String,
    },

    /// A TAP line that matches no known construct
    #[error("unknown TAP line {line_number}: '{content}'")]
    UnrecognizedLine {
        /// 1-based line number in the input
        line_number: usize,
        /// The offending line
        content: String,
    },

    /// A line inside a diagnostic block without the two-space indent
    #[error("invalid yaml in test case details at line {line_number}: '{content}'")]
    MalformedDiagnosticBlock {
        /// 1-based line number in the input
        line_number: usize,
        /// The offending line
        content: String,
    },

    /// A diagnostic block that is never closed with `  ...`
    #[error("truncated yaml in test case details starting at line {line_number}")]
    TruncatedDiagnosticBlock {
        /// 1-based line number of the opening `  ---`
        line_number: usize,
    },

    /// A TAP result line after the trailing plan
    #[error("unexpected test results after trailer at line {line_number}")]
    ResultsAfterTrailer {
        /// 1-based line number of the result line
        line_number: usize,
    },

    /// A second TAP plan line
    #[error("duplicate TAP plan at line {line_number}")]
    DuplicatePlan {
        /// 1-based line number of the second plan
        line_number: usize,
    },

    /// The XML document does not have the shape of a JUnit report
    #[error("unexpected JUnit structure at {node}: {message}")]
    Structure {
        /// Description of the offending node, e.g. `<html>`
        node: String,
        /// What was expected instead
        message: String,
    },

    /// The document is not well-formed XML
    #[error("XML syntax error at byte {position}: {message}")]
    XmlSyntax {
        /// Byte offset in the input where decoding stopped
        position: u64,
        /// Decoder message
        message: String,
    },
}

impl ReportError {
    /// Whether this error came from the TAP line grammar
    #[must_use]
    pub fn is_tap_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedLine { .. }
                | Self::MalformedDiagnosticBlock { .. }
                | Self::TruncatedDiagnosticBlock { .. }
                | Self::ResultsAfterTrailer { .. }
                | Self::DuplicatePlan { .. }
        )
    }

    /// 1-based input line the error points at, for TAP errors
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::UnrecognizedLine { line_number, .. }
            | Self::MalformedDiagnosticBlock { line_number, .. }
            | Self::TruncatedDiagnosticBlock { line_number }
            | Self::ResultsAfterTrailer { line_number }
            | Self::DuplicatePlan { line_number } => Some(*line_number),
            _ => None,
        }
    }
}
