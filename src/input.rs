//! Parsing of the free-text input line.
//!
//! A line may carry one date token wrapped in `/` and `\`:
//! `buy milk /25/12/2024\` yields the text `buy milk` and the date
//! `25/12/2024`. Without a token the date is today's, as `DD/MM/YYYY`.

use chrono::{Local, NaiveDate};

pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub text: String,
    pub date: String,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Splits `raw` into task text and date.
///
/// Returns `None` when nothing usable is left: blank input, or a line that
/// is only a date token.
pub fn parse_input(raw: &str, today: NaiveDate) -> Option<ParsedInput> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (text, date) = match extract_date_token(raw) {
        Some((text, token)) => (text, token.to_string()),
        None => (raw.to_string(), format_date(today)),
    };

    if text.is_empty() {
        return None;
    }
    Some(ParsedInput { text, date })
}

/// Finds the `/…\` token, returning the remaining text and the token body.
fn extract_date_token(raw: &str) -> Option<(String, &str)> {
    // Dates contain slashes themselves, so the opening marker is a slash
    // that starts a word, rightmost first, falling back to the first slash.
    let word_starts = raw
        .char_indices()
        .filter(|&(i, c)| c == '/' && (i == 0 || raw[..i].ends_with(char::is_whitespace)))
        .map(|(i, _)| i)
        .rev();
    word_starts
        .chain(raw.find('/'))
        .find_map(|open| split_at_token(raw, open))
}

/// Closes the token opened at `open` on the first following backslash.
fn split_at_token(raw: &str, open: usize) -> Option<(String, &str)> {
    let body_start = open + 1;
    let close = body_start + raw[body_start..].find('\\')?;
    let token = raw[body_start..close].trim();
    if token.is_empty() {
        return None;
    }

    let before = raw[..open].trim_end();
    let after = raw[close + 1..].trim_start();
    let text = if before.is_empty() || after.is_empty() {
        format!("{before}{after}")
    } else {
        format!("{before} {after}")
    };
    Some((text, token))
}
