use crate::site::Site;

/// Render a site back into the text shape `parse` accepts.
///
/// Field order is fixed: group, name, url, icon, description, links, tags.
/// Empty fields and empty lists are left out. Extra fields other than
/// `group` are not written.
pub fn serialize(site: &Site) -> String {
    let mut lines = Vec::new();

    let scalars = [
        ("group", site.group().unwrap_or_default()),
        ("name", site.name.as_str()),
        ("url", site.url.as_str()),
        ("icon", site.icon.as_str()),
        ("description", site.description.as_str()),
    ];
    for (key, value) in scalars {
        if !value.is_empty() {
            lines.push(format!("{key}: {value}"));
        }
    }

    if !site.links.is_empty() {
        lines.push("links:".to_string());
        for link in &site.links {
            lines.push(format!("  - text: {}", link.text));
            lines.push(format!("    url: {}", link.url).trim_end().to_string());
        }
    }

    if !site.tags.is_empty() {
        lines.push("tags:".to_string());
        for tag in &site.tags {
            lines.push(format!("  - {tag}"));
        }
    }

    lines.join("\n")
}
