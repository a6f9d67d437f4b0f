// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for format detection followed by parsing

#![no_main]

use libfuzzer_sys::fuzz_target;

use testsummary_parser::detect_and_parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = detect_and_parse("fuzz-input", input);
    }
});
