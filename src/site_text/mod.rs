mod line;
mod parser;
mod serializer;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::site::Site;

pub use serializer::serialize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:yaml)?\s*\n(.*?)\n```").expect("valid fence regex"));

/// Parse loosely formatted site text (usually pasted from an AI assistant).
///
/// Behavior:
/// - A ```` ```yaml ```` fence anywhere in the input narrows parsing to its body
/// - Blank lines and `#` comment lines are skipped
/// - `links:` and `tags:` open list sections, `description:` may continue on
///   indented lines
/// - Any other `key: value` at the top level becomes a field
/// - Fails only when `name` or `url` is missing
pub fn parse(input: &str) -> Result<Site, ParseError> {
    parser::parse_body(fenced_body(input))
}

/// Body of the first fenced block, or the whole input when there is none.
pub fn fenced_body(input: &str) -> &str {
    match FENCE.captures(input).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str(),
        None => input,
    }
}

/// Strip one matching pair of surrounding quotes, then trim.
pub(crate) fn clean_value(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].trim().to_string();
        }
    }
    value.to_string()
}
