use crate::ParsedEntry;

/// Parse plain text, one message per line
///
/// Lines are trimmed and blank lines are dropped. Never fails: an empty result
/// is left for the caller to report.
pub fn parse_text(input: &str) -> Vec<ParsedEntry> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ParsedEntry::new)
        .collect()
}
