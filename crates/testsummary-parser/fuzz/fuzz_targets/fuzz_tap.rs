// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for TAP parsing

#![no_main]

use libfuzzer_sys::fuzz_target;

use testsummary_parser::parse_tap;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(result) = parse_tap(input) {
            assert_eq!(result.counts().total(), result.cases().count());
        }
    }
});
