//! Tolerant scanner for JS/TS message descriptors
//!
//! Extracts records shaped like
//!
//! ```text
//! greeting: {
//!   id: 'app.greeting',
//!   defaultMessage: 'Hello, {name}!',
//!   description: 'Shown on the home page',
//! },
//! ```
//!
//! This is not a JavaScript parser. String literals, template literals and
//! comments are blanked out first so that ICU braces inside messages cannot
//! confuse brace matching, then each `key: {` is matched to its closing brace
//! and the object body is searched for a `defaultMessage` that sits directly
//! inside it.

use super::{FormatError, InputFormat};
use crate::ParsedEntry;
use regex::Regex;
use std::sync::LazyLock;

/// `key: {`, where key is an identifier or a quoted string
static RECORD_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:([A-Za-z_$][\w$]*)|'([^'\n]*)'|"([^"\n]*)")\s*:\s*\{"#)
        .expect("record start pattern is valid")
});

/// `defaultMessage:` followed by the opening quote of its value
static DEFAULT_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bdefaultMessage\s*:\s*(['"`])"#).expect("defaultMessage pattern is valid")
});

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Code,
    Literal { quote: char, escaped: bool },
    LineComment,
    BlockComment,
}

/// Parse JS/TS message descriptors into entries keyed by their object key
///
/// # Errors
/// Fails when no `key: { defaultMessage: ... }` record is found.
pub fn parse_js_messages(input: &str) -> Result<Vec<ParsedEntry>, FormatError> {
    let masked = mask_literals(input);
    let mut entries = Vec::new();
    let mut records_found = 0;
    let mut pos = 0;

    while let Some(caps) = RECORD_START.captures_at(&masked, pos) {
        let Some(whole) = caps.get(0) else { break };
        let open = whole.end() - 1;
        let close = matching_brace(&masked, open).unwrap_or(masked.len());

        let key = (1..=3)
            .find_map(|group| caps.get(group))
            .and_then(|m| input.get(m.range()));

        match (key, top_level_default_message(input, &masked, open + 1, close)) {
            (Some(key), Some(message)) => {
                records_found += 1;
                if message.trim().is_empty() {
                    tracing::debug!(key = %key, "Skipping empty defaultMessage");
                } else {
                    entries.push(ParsedEntry::with_id(key, message));
                }
                pos = close + 1;
            }
            // Not a message record itself; look for records nested inside it
            _ => pos = open + 1,
        }

        if pos >= masked.len() {
            break;
        }
    }

    if records_found == 0 {
        return Err(FormatError::new(InputFormat::Js, "no `defaultMessage` entries found"));
    }

    Ok(entries)
}

/// Find the `defaultMessage` value declared at depth zero of `masked[start..end]`
fn top_level_default_message<'a>(
    input: &'a str,
    masked: &str,
    start: usize,
    end: usize,
) -> Option<&'a str> {
    let body = masked.get(start..end)?;

    for caps in DEFAULT_MESSAGE.captures_iter(body) {
        let whole = caps.get(0)?;
        if brace_depth(&body[..whole.start()]) != 0 {
            continue;
        }

        let quote = caps.get(1)?;
        let quote_char = body[quote.range()].chars().next()?;
        let value_start = start + quote.end();
        // Literal contents are blanked, so the next matching quote closes it
        let value_end = value_start + masked.get(value_start..)?.find(quote_char)?;
        return input.get(value_start..value_end);
    }

    None
}

fn brace_depth(masked: &str) -> i32 {
    masked.bytes().fold(0, |depth, b| match b {
        b'{' => depth + 1,
        b'}' => depth - 1,
        _ => depth,
    })
}

fn matching_brace(masked: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in masked.bytes().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Blank out literal contents and comments, keeping byte offsets intact
///
/// Quote delimiters are kept so literal boundaries stay visible.
fn mask_literals(source: &str) -> String {
    let mut masked = String::with_capacity(source.len());
    let mut state = ScanState::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            ScanState::Code => match c {
                '\'' | '"' | '`' => {
                    masked.push(c);
                    ScanState::Literal {
                        quote: c,
                        escaped: false,
                    }
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    masked.push_str("  ");
                    ScanState::LineComment
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    masked.push_str("  ");
                    ScanState::BlockComment
                }
                _ => {
                    masked.push(c);
                    ScanState::Code
                }
            },
            ScanState::Literal { quote, escaped } => {
                if !escaped && c == quote {
                    masked.push(c);
                    ScanState::Code
                } else {
                    blank(&mut masked, c);
                    ScanState::Literal {
                        quote,
                        escaped: !escaped && c == '\\',
                    }
                }
            }
            ScanState::LineComment => {
                if c == '\n' {
                    masked.push(c);
                    ScanState::Code
                } else {
                    blank(&mut masked, c);
                    ScanState::LineComment
                }
            }
            ScanState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    masked.push_str("  ");
                    ScanState::Code
                } else {
                    blank(&mut masked, c);
                    ScanState::BlockComment
                }
            }
        };
    }

    masked
}

fn blank(masked: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        masked.push(' ');
    }
}
