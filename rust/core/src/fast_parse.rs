// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Low-level numeric parsing helpers shared by the statement grammar.
//!
//! Number recognition is a hand-rolled byte scan; conversion uses
//! [fast-float](https://docs.rs/fast-float) for floats and
//! [lexical-core](https://docs.rs/lexical-core) for integers.

/// Check if byte can start a numeric literal (digit or decimal point)
#[inline(always)]
pub fn is_number_start(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.'
}

/// Returns the byte length of the numeric literal at the start of `input`,
/// or 0 if `input` does not start with one.
///
/// Accepts `42`, `3.14`, `0.`, `.5`, `1e-2`, `1.5E+10`. The sign is not part
/// of the literal; unary minus is handled by the expression grammar.
pub fn number_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    let mut has_digits = false;

    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
        has_digits = true;
    }

    if i < len && bytes[i] == b'.' {
        i += 1;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
            has_digits = true;
        }
    }

    if !has_digits {
        return 0;
    }

    // Optional exponent; only consumed if at least one digit follows.
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < len && bytes[j].is_ascii_digit() {
            while j < len && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    i
}

/// Parse an f64 with fast-float.
#[inline]
pub fn parse_f64(s: &str) -> Option<f64> {
    fast_float::parse(s).ok()
}

/// Parse a u32 with lexical-core.
#[inline]
pub fn parse_u32(s: &str) -> Option<u32> {
    lexical_core::parse(s.as_bytes()).ok()
}

/// Parse a literal recognized by [`number_len`]. Digit-only literals take the
/// integer path (entity tags and references are small integers); anything
/// with a fraction, exponent, or outside u32 range goes through fast-float.
#[inline]
pub fn parse_number(s: &str) -> Option<f64> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(v) = parse_u32(s) {
            return Some(f64::from(v));
        }
    }
    parse_f64(s)
}
