/// One physical input line, classified by shape only.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    /// Blank or `#` comment.
    Skip,
    /// `- payload`, at any indentation.
    Item(&'a str),
    /// Indented by two or more whitespace characters; trimmed content.
    Nested(&'a str),
    /// Top-level `key: value`, both trimmed.
    Entry { key: &'a str, value: &'a str },
    /// Anything else (top-level text without a key).
    Other,
}

pub fn classify(raw: &str) -> Line<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Skip;
    }

    if let Some(payload) = trimmed.strip_prefix('-') {
        return Line::Item(payload.trim());
    }

    // raw characters, tabs count as one
    let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
    if indent >= 2 {
        return Line::Nested(trimmed);
    }

    match split_key_value(trimmed) {
        Some((key, value)) => Line::Entry { key, value },
        None => Line::Other,
    }
}

/// Split on the first colon. A colon in the first position is not a key.
pub fn split_key_value(content: &str) -> Option<(&str, &str)> {
    match content.find(':') {
        Some(idx) if idx > 0 => Some((content[..idx].trim(), content[idx + 1..].trim())),
        _ => None,
    }
}
