/// A parsed search box value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Lowercased free text, segments joined by single spaces.
    pub search_term: String,
    /// Lowercased tags, `#` stripped, in input order.
    pub tags: Vec<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.tags.is_empty()
    }
}

/// Split a comma separated query into free text and `#tag` segments.
///
/// `"foo, #bar, #Baz"` → term `"foo"`, tags `["bar", "baz"]`.
pub fn parse_query(input: &str) -> Query {
    let input = input.trim();
    if input.is_empty() {
        return Query::default();
    }

    let mut terms = Vec::new();
    let mut tags = Vec::new();

    for segment in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match segment.strip_prefix('#') {
            Some(tag) => tags.push(tag.to_lowercase()),
            None => terms.push(segment),
        }
    }

    Query {
        search_term: terms.join(" ").to_lowercase(),
        tags,
    }
}

/// Inverse of the tag half of `parse_query`.
pub fn format_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
