// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    bare_seconds = { "30", 30 },
    suffixed_seconds = { "45s", 45 },
    minutes = { "5m", 300 },
    hours = { "2h", 7200 },
    days = { "1d", 86400 },
    long_form = { "10 minutes", 600 },
)]
fn parses_second_multiples(input: &str, expected_secs: u64) {
    assert_eq!(
        parse_duration(input).unwrap(),
        Duration::from_secs(expected_secs)
    );
}

#[test]
fn parses_milliseconds() {
    assert_eq!(
        parse_duration("250ms").unwrap(),
        Duration::from_millis(250)
    );
}

#[parameterized(
    empty = { "" },
    no_number = { "s" },
    bad_suffix = { "10parsecs" },
    negative = { "-5s" },
)]
fn rejects_malformed(input: &str) {
    assert!(parse_duration(input).is_err());
}

#[parameterized(
    sub_minute = { 4200, "4.2s" },
    minutes = { 185_000, "3m05s" },
    hours = { 4_320_000, "1h12m" },
)]
fn formats_elapsed(millis: u64, expected: &str) {
    assert_eq!(format_elapsed(Duration::from_millis(millis)), expected);
}
