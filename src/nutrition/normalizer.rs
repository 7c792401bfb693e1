// ABOUTME: Canonicalizes raw food text into the lookup key used by the reference table
// ABOUTME: Lowercases, trims and collapses whitespace runs into single spaces
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Whitespace as typed text sees it
///
/// Unicode `White_Space` minus NEL (U+0085), plus the byte-order mark
/// (U+FEFF) that clipboard text often carries.
#[must_use]
pub fn is_separator(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{FEFF}' => true,
        _ => c.is_whitespace(),
    }
}

/// Canonical form of a food description
///
/// Lowercases the input, drops leading and trailing whitespace and replaces
/// every internal run of whitespace with a single space. Whitespace is
/// decided by [`is_separator`]. The result is a fixed point:
/// `normalize(&normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut canonical = String::with_capacity(lowered.len());
    for word in lowered.split(is_separator).filter(|w| !w.is_empty()) {
        if !canonical.is_empty() {
            canonical.push(' ');
        }
        canonical.push_str(word);
    }
    canonical
}

/// Whether `text` is already in canonical form
#[must_use]
pub fn is_canonical(text: &str) -> bool {
    normalize(text) == text
}
