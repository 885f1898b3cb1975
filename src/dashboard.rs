use serde::Serialize;

use crate::{
    search_query::QueryEngine,
    site::Site,
    site_text::{self, ParseError},
    url_normalize::{compare_key, detect_url, site_exists},
};

/// Result of one search box change.
#[derive(Debug, Clone, Serialize)]
pub struct SearchView<'a> {
    pub sites: Vec<&'a Site>,
    /// Set when the query looks like a URL no stored site points at.
    pub detected_url: Option<String>,
    /// Tags toggled on by clicking, for highlighting.
    pub active_tags: &'a [String],
}

/// Owns the site collection and the search state for one view.
#[derive(Debug, Default)]
pub struct Dashboard {
    sites: Vec<Site>,
    engine: QueryEngine,
}

impl Dashboard {
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            sites,
            engine: QueryEngine::new(),
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Swap in a whole collection, keeping the search state.
    pub fn replace_sites(&mut self, sites: Vec<Site>) {
        self.sites = sites;
    }

    pub fn search(&self, query: &str) -> SearchView<'_> {
        let detected_url = detect_url(query).filter(|url| !site_exists(&self.sites, url));

        SearchView {
            sites: self.engine.filter(&self.sites, query),
            detected_url,
            active_tags: self.engine.active_tags(),
        }
    }

    /// Toggle `tag` and return the new search box value built from the
    /// free text of `current_query` and the active tags.
    pub fn click_tag(&mut self, tag: &str, current_query: &str) -> String {
        let active = self.engine.toggle_tag(tag);
        let term = self.engine.parse_query(current_query).search_term;

        if active.is_empty() {
            return term;
        }

        let tags = self.engine.format_tags(&active);
        if term.is_empty() {
            tags
        } else {
            format!("{term}, {tags}")
        }
    }

    pub fn find(&self, url: &str) -> Option<&Site> {
        let key = compare_key(url);
        self.sites.iter().find(|site| compare_key(&site.url) == key)
    }

    /// Editable text for the site at `url`.
    pub fn edit_text(&self, url: &str) -> Option<String> {
        self.find(url).map(site_text::serialize)
    }

    /// Parse `text` and store the site, replacing one at the same address.
    /// Returns the stored site and whether an existing one was replaced.
    pub fn save_text(&mut self, text: &str) -> Result<(&Site, bool), ParseError> {
        let site = site_text::parse(text)?;
        Ok(self.upsert(site))
    }

    pub fn upsert(&mut self, site: Site) -> (&Site, bool) {
        let key = compare_key(&site.url);
        match self.sites.iter().position(|s| compare_key(&s.url) == key) {
            Some(idx) => {
                log::debug!("replacing site {} at {}", site.name, site.url);
                self.sites[idx] = site;
                (&self.sites[idx], true)
            }
            None => {
                log::debug!("adding site {} at {}", site.name, site.url);
                self.sites.push(site);
                let last = self.sites.len() - 1;
                (&self.sites[last], false)
            }
        }
    }

    pub fn remove(&mut self, url: &str) -> Option<Site> {
        let key = compare_key(url);
        let idx = self.sites.iter().position(|s| compare_key(&s.url) == key)?;
        Some(self.sites.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        let text = [
            "name: Rust Guide\nurl: https://rust.dev\ntags:\n  - dev\n  - rust",
            "name: Python Tutorial\nurl: https://python.dev/learn/\ntags:\n  - dev",
            "name: Cookbook\nurl: https://cook.example\ndescription: recipes",
        ];
        Dashboard::new(text.iter().map(|t| site_text::parse(t).unwrap()).collect())
    }

    #[test]
    fn test_search_filters_and_detects() {
        let dash = dashboard();

        let view = dash.search("#dev");
        assert_eq!(view.sites.len(), 2);
        assert_eq!(view.detected_url, None);

        let view = dash.search("new-site.io");
        assert!(view.sites.is_empty());
        assert_eq!(view.detected_url.as_deref(), Some("https://new-site.io"));
    }

    #[test]
    fn test_search_hides_known_url() {
        let dash = dashboard();
        let view = dash.search("www.python.dev/learn");
        assert_eq!(view.detected_url, None);
    }

    #[test]
    fn test_click_tag_rebuilds_query() {
        let mut dash = dashboard();
        assert_eq!(dash.click_tag("Dev", ""), "#dev");
        assert_eq!(dash.click_tag("rust", "guide, #dev"), "guide, #dev, #rust");
        assert_eq!(dash.click_tag("dev", "guide, #dev, #rust"), "guide, #rust");
        assert_eq!(dash.click_tag("rust", "guide, #rust"), "guide");
    }

    #[test]
    fn test_search_view_reports_active_tags() {
        let mut dash = dashboard();
        assert!(dash.search("").active_tags.is_empty());

        let query = dash.click_tag("Rust", "");
        let view = dash.search(&query);
        assert_eq!(view.active_tags, ["rust"]);
        assert_eq!(view.sites.len(), 1);
    }

    #[test]
    fn test_replace_sites_keeps_tags() {
        let mut dash = dashboard();
        dash.click_tag("dev", "");
        let before = dash.sites().to_vec();

        dash.save_text("name: New\nurl: https://new.dev").unwrap();
        dash.replace_sites(before);

        assert_eq!(dash.sites().len(), 3);
        assert!(dash.find("https://new.dev").is_none());
        assert_eq!(dash.search("").active_tags, ["dev"]);
    }

    #[test]
    fn test_edit_and_save_round_trip() {
        let mut dash = dashboard();
        let text = dash.edit_text("https://rust.dev/").unwrap();
        let edited = text.replace("Rust Guide", "Rust Book");

        let (site, overwritten) = dash.save_text(&edited).unwrap();
        assert_eq!(site.name, "Rust Book");
        assert!(overwritten);
        assert_eq!(dash.sites().len(), 3);
    }

    #[test]
    fn test_save_new_and_invalid() {
        let mut dash = dashboard();
        let (_, overwritten) = dash.save_text("name: New\nurl: https://new.dev").unwrap();
        assert!(!overwritten);
        assert_eq!(dash.sites().len(), 4);

        assert!(dash.save_text("name: broken").is_err());
        assert_eq!(dash.sites().len(), 4);
    }

    #[test]
    fn test_remove() {
        let mut dash = dashboard();
        assert_eq!(dash.remove("https://www.cook.example/").unwrap().name, "Cookbook");
        assert!(dash.remove("https://cook.example").is_none());
        assert_eq!(dash.sites().len(), 2);
    }
}
