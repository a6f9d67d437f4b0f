// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for TAP parsing from structured lines
//!
//! Raw bytes rarely form valid TAP, so this target builds streams from
//! line shapes the parser knows about and checks the state machine.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use testsummary_parser::parse_tap;

#[derive(Debug, Arbitrary)]
enum Line {
    Ok(Option<u8>, String),
    NotOk(Option<u8>, String),
    Skip(String),
    Todo(String),
    Comment(String),
    Plan(u8),
    Blank,
    Diagnostic(Vec<String>),
    BailOut(String),
}

impl Line {
    fn render(&self, out: &mut String) {
        let number = |n: &Option<u8>| n.map(|n| format!(" {n}")).unwrap_or_default();
        match self {
            Line::Ok(n, name) => out.push_str(&format!("ok{} - {name}\n", number(n))),
            Line::NotOk(n, name) => out.push_str(&format!("not ok{} - {name}\n", number(n))),
            Line::Skip(reason) => out.push_str(&format!("ok # SKIP {reason}\n")),
            Line::Todo(reason) => out.push_str(&format!("not ok # TODO {reason}\n")),
            Line::Comment(text) => out.push_str(&format!("# {text}\n")),
            Line::Plan(count) => out.push_str(&format!("1..{count}\n")),
            Line::Blank => out.push('\n'),
            Line::Diagnostic(lines) => {
                out.push_str("  ---\n");
                for line in lines {
                    out.push_str(&format!("  {line}\n"));
                }
                out.push_str("  ...\n");
            }
            Line::BailOut(reason) => out.push_str(&format!("Bail out! {reason}\n")),
        }
    }
}

fuzz_target!(|lines: Vec<Line>| {
    let mut input = String::from("TAP version 13\n");
    for line in &lines {
        line.render(&mut input);
    }

    if let Ok(result) = parse_tap(&input) {
        assert!(!result.suites().is_empty());
        assert_eq!(result.counts().total(), result.cases().count());
    }
});
