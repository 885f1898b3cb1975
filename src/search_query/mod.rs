mod eval;
mod parser;

use crate::site::Site;

pub use eval::matches;
pub use parser::{format_tags, parse_query, Query};

/// Search state for one dashboard view.
///
/// Owns the set of tags toggled on by clicking them. Separate instances
/// never share that set.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    active_tags: Vec<String>,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_query(&self, input: &str) -> Query {
        parse_query(input)
    }

    pub fn matches(&self, site: &Site, query: &Query) -> bool {
        matches(site, &query.search_term, &query.tags)
    }

    /// Flip `tag` (lowercased) in the active set and return the set in
    /// insertion order.
    pub fn toggle_tag(&mut self, tag: &str) -> Vec<String> {
        let tag = tag.to_lowercase();
        match self.active_tags.iter().position(|t| *t == tag) {
            Some(idx) => {
                self.active_tags.remove(idx);
            }
            None => self.active_tags.push(tag),
        }
        self.active_tags.clone()
    }

    pub fn active_tags(&self) -> &[String] {
        &self.active_tags
    }

    pub fn format_tags<S: AsRef<str>>(&self, tags: &[S]) -> String {
        format_tags(tags)
    }

    /// Filter `sites` with a raw query string.
    pub fn filter<'a>(&self, sites: &'a [Site], input: &str) -> Vec<&'a Site> {
        let query = self.parse_query(input);
        if query.is_empty() {
            return sites.iter().collect();
        }

        sites
            .iter()
            .filter(|site| self.matches(site, &query))
            .collect()
    }
}
