// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for testsummary-parser
//!
//! These tests use proptest to check that parsing holds its invariants for
//! arbitrary inputs: no panics on garbage, counts that always agree with the
//! cases, and names that survive XML escaping.

use proptest::prelude::*;

use testsummary_parser::{
    StatusFilter, TestCase, TestResult, TestStatus, TestSuite, detect_and_parse, parse_junit_str,
    parse_tap,
};

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary text including lines that look almost like TAP or XML
fn arbitrary_report() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("TAP version 13\n".to_string()),
        Just("ok\nnot ok\n1..2\n".to_string()),
        Just("ok 1\n  ---\n".to_string()),
        Just("<testsuites><testsuite>".to_string()),
        Just("\u{feff}<testsuite/>".to_string()),
        Just("Bail out!".to_string()),
        Just("1..0\n1..0\n".to_string()),
        "(ok|not ok|#|  ---|  \\.\\.\\.|1\\.\\.[0-9]|Bail out!)[ a-zA-Z0-9#-]{0,20}(\n|\r\n)"
            .prop_map(|s| s),
        ".{0,200}".prop_map(|s| s),
    ]
}

/// A kind of TAP result line and the status it should map to
#[derive(Debug, Clone, Copy)]
enum LineKind {
    Ok,
    NotOk,
    OkSkip,
    NotOkTodo,
}

impl LineKind {
    fn status(self) -> TestStatus {
        match self {
            LineKind::Ok => TestStatus::Pass,
            LineKind::NotOk => TestStatus::Fail,
            LineKind::OkSkip | LineKind::NotOkTodo => TestStatus::Skip,
        }
    }

    fn render(self, number: usize, name: &str) -> String {
        match self {
            LineKind::Ok => format!("ok {number} - {name}"),
            LineKind::NotOk => format!("not ok {number} - {name}"),
            LineKind::OkSkip => format!("ok {number} - {name} # SKIP not today"),
            LineKind::NotOkTodo => format!("not ok {number} - {name} # TODO later"),
        }
    }
}

fn line_kind() -> impl Strategy<Value = LineKind> {
    prop_oneof![
        Just(LineKind::Ok),
        Just(LineKind::NotOk),
        Just(LineKind::OkSkip),
        Just(LineKind::NotOkTodo),
    ]
}

fn test_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 _.:/-]{0,24}[a-zA-Z0-9]"
}

/// Attribute-safe text that still exercises every XML special character
fn xml_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"'.:/_-]{0,30}"
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn status() -> impl Strategy<Value = TestStatus> {
    prop_oneof![
        Just(TestStatus::Pass),
        Just(TestStatus::Fail),
        Just(TestStatus::Skip),
    ]
}

fn test_result() -> impl Strategy<Value = TestResult> {
    (
        prop::collection::vec(prop::collection::vec(status(), 0..5), 0..4),
        prop::option::of("[a-z ]{1,10}"),
    )
        .prop_map(|(suites, exception)| {
            let suites = suites
                .into_iter()
                .map(|statuses| {
                    TestSuite::new(None, statuses.into_iter().map(TestCase::new).collect())
                })
                .collect();
            TestResult::new(suites, exception)
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_parsers_never_panic(content in arbitrary_report()) {
        let _ = parse_tap(&content);
        let _ = parse_junit_str(&content);
        let _ = detect_and_parse("fuzz", &content);
    }

    #[test]
    fn prop_parsed_counts_match_cases(content in arbitrary_report()) {
        if let Ok(result) = detect_and_parse("input", &content) {
            prop_assert_eq!(result.counts().total(), result.cases().count());
        }
    }

    #[test]
    fn prop_tap_lines_map_to_statuses(
        lines in prop::collection::vec((line_kind(), test_name()), 1..40),
        trailer in any::<bool>(),
    ) {
        let mut content = String::from("TAP version 13\n");
        if !trailer {
            content.push_str(&format!("1..{}\n", lines.len()));
        }
        for (i, (kind, name)) in lines.iter().enumerate() {
            content.push_str(&kind.render(i + 1, name));
            content.push('\n');
        }
        if trailer {
            content.push_str(&format!("1..{}\n", lines.len()));
        }

        let result = parse_tap(&content).expect("generated TAP is valid");
        prop_assert_eq!(result.suites().len(), 1);

        let cases = &result.suites()[0].cases;
        prop_assert_eq!(cases.len(), lines.len());
        for (case, (kind, name)) in cases.iter().zip(&lines) {
            prop_assert_eq!(case.status, kind.status());
            prop_assert_eq!(case.name.as_deref(), Some(name.trim()));
        }
    }

    #[test]
    fn prop_tap_comments_split_suites(
        groups in prop::collection::vec(("[a-zA-Z][a-zA-Z ]{0,10}[a-z]", 1usize..5), 1..6),
    ) {
        let mut content = String::new();
        for (label, size) in &groups {
            content.push_str(&format!("# {label}\n"));
            for _ in 0..*size {
                content.push_str("ok\n");
            }
        }

        let result = parse_tap(&content).expect("generated TAP is valid");
        let labels: Vec<Option<&str>> = result.suites().iter().map(|s| s.name.as_deref()).collect();
        let expected: Vec<Option<&str>> = groups.iter().map(|(l, _)| Some(l.as_str())).collect();
        prop_assert_eq!(labels, expected);
        prop_assert_eq!(
            result.counts().passed,
            groups.iter().map(|(_, size)| size).sum::<usize>()
        );
    }

    #[test]
    fn prop_junit_names_survive_escaping(
        cases in prop::collection::vec((xml_text(), xml_text(), status()), 1..10),
    ) {
        let mut content = String::from("<testsuites>\n  <testsuite name=\"generated\">\n");
        for (name, message, status) in &cases {
            let marker = match status {
                TestStatus::Pass => String::new(),
                TestStatus::Fail => format!("<failure message=\"{}\"/>", escape_xml(message)),
                TestStatus::Skip => format!("<skipped message=\"{}\"/>", escape_xml(message)),
            };
            content.push_str(&format!(
                "    <testcase name=\"{}\">{marker}</testcase>\n",
                escape_xml(name)
            ));
        }
        content.push_str("  </testsuite>\n</testsuites>\n");

        let result = parse_junit_str(&content).expect("generated JUnit is valid");
        let parsed = &result.suites()[0].cases;
        prop_assert_eq!(parsed.len(), cases.len());
        for (case, (name, message, status)) in parsed.iter().zip(&cases) {
            prop_assert_eq!(case.name.as_deref(), Some(name.as_str()));
            prop_assert_eq!(case.status, *status);
            if *status != TestStatus::Pass {
                prop_assert_eq!(case.message.as_deref(), Some(message.as_str()));
            }
        }
    }

    #[test]
    fn prop_merge_sums_counts(left in test_result(), right in test_result()) {
        let mut merged = left.clone();
        merged.merge(right.clone());

        prop_assert_eq!(merged.counts().passed, left.counts().passed + right.counts().passed);
        prop_assert_eq!(merged.counts().failed, left.counts().failed + right.counts().failed);
        prop_assert_eq!(merged.counts().skipped, left.counts().skipped + right.counts().skipped);
        prop_assert_eq!(merged.suites().len(), left.suites().len() + right.suites().len());
        prop_assert_eq!(
            merged.exception(),
            left.exception().or(right.exception())
        );
    }

    #[test]
    fn prop_filter_selects_exact_statuses(
        result in test_result(),
        wanted in prop::collection::vec(status(), 0..3),
    ) {
        let filter = wanted.iter().fold(StatusFilter::NONE, |f, s| f | *s);
        let expected: usize = wanted
            .iter()
            .copied()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .map(|s| result.counts().get(s))
            .sum();

        prop_assert_eq!(result.cases_matching(filter).count(), expected);
    }
}
