use crate::site::Site;

/// Tags are AND-ed and compared case-insensitively against the site's own
/// tags. The term is a substring search over name, description and tags.
pub fn matches<S: AsRef<str>>(site: &Site, search_term: &str, tags: &[S]) -> bool {
    if !tags.is_empty() {
        let site_tags = site
            .tags
            .iter()
            .map(|t| t.to_lowercase())
            .collect::<Vec<_>>();
        let all_present = tags
            .iter()
            .all(|tag| site_tags.contains(&tag.as_ref().to_lowercase()));
        if !all_present {
            return false;
        }
    }

    if search_term.is_empty() {
        return true;
    }

    haystack(site).contains(&search_term.to_lowercase())
}

fn haystack(site: &Site) -> String {
    format!(
        "{} {} {}",
        site.name,
        site.description,
        site.tags.join(" ")
    )
    .to_lowercase()
}
