// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for XML decoding and JUnit mapping

#![no_main]

use libfuzzer_sys::fuzz_target;

use testsummary_parser::{XmlDocument, parse_junit};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Decoding and mapping should never panic on any input
        if let Ok(document) = XmlDocument::parse(input) {
            let _ = parse_junit(&document);
        }
    }
});
