//! Tokenizing loosely-structured spreadsheet cells.
//!
//! HR sheets pack multiple people into one cell in two shapes: numbered lists
//! ("1. Alice 2. Bob") and delimiter-separated runs ("Alice, Bob; Carol").
//! Name cells are split structurally; email cells are regex-scanned instead,
//! so stray prose around an address never leaks into the output. The two
//! policies are intentionally not unified.

use regex::Regex;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("static pattern")
    })
}

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.)]").expect("static pattern"))
}

fn delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n,;]+").expect("static pattern"))
}

fn marker_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+[.)]").expect("static pattern"))
}

/// How a name cell is tokenized, resolved once per input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Cell starts with `digits` + `.` or `)`: split on every such marker.
    NumberedList,
    /// Split on runs of newlines, commas, or semicolons.
    DelimiterSplit,
}

impl SplitPolicy {
    pub fn detect(input: &str) -> Self {
        if marker_re().is_match(input) {
            SplitPolicy::NumberedList
        } else {
            SplitPolicy::DelimiterSplit
        }
    }
}

/// Splits a name cell into trimmed, non-empty fragments, in input order.
/// Empty input yields an empty list.
pub fn extract_names(raw: &str) -> Vec<String> {
    let input = raw.trim();
    if input.is_empty() {
        return Vec::new();
    }

    let splitter = match SplitPolicy::detect(input) {
        SplitPolicy::NumberedList => marker_split_re(),
        SplitPolicy::DelimiterSplit => delimiter_re(),
    };

    splitter
        .split(input)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Scans a cell for email addresses and returns every match, in input order.
///
/// Leading numbered-list markers that the pattern swallowed ("1.a@x.com") are
/// stripped off each match; fragments that are not addresses are dropped
/// without an error. Already-clean input comes back unchanged.
pub fn extract_emails(raw: &str) -> Vec<String> {
    email_re()
        .find_iter(raw)
        .filter_map(|m| clean_email(m.as_str()))
        .collect()
}

fn clean_email(matched: &str) -> Option<String> {
    let stripped = marker_re().replace(matched, "");
    let stripped = stripped
        .trim()
        .trim_end_matches(['.', ',', ';', ':'])
        .to_string();
    // A match whose local part was nothing but a list marker is not an address.
    if stripped.is_empty() || stripped.starts_with('@') {
        tracing::debug!("Dropping malformed email fragment: {}", matched);
        return None;
    }
    Some(stripped)
}
