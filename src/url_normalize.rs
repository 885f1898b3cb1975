use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::site::Site;

static HTTP_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme regex"));

/// Detect whether the input looks like a site address.
///
/// - Input without an `http(s)://` prefix gets `https://` prepended
/// - Anything that doesn't parse, or parses to another scheme, is `None`
/// - A single trailing slash is dropped from the result
pub fn detect_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if HTTP_PREFIX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let href = parsed.as_str();
    match href.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => Some(stripped.to_string()),
        _ => Some(href.to_string()),
    }
}

/// Comparison-only form: host without `www.` plus path without a trailing
/// slash, lowercased. Unparseable input is compared as lowercased text.
pub fn compare_key(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return url.to_lowercase(),
    };

    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let path = parsed.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    let path = if path.is_empty() { "/" } else { path };

    format!("{host}{path}").to_lowercase()
}

/// True when any site points at the same place as `url`.
pub fn site_exists(sites: &[Site], url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let target = compare_key(url);
    sites
        .iter()
        .filter(|site| !site.url.is_empty())
        .any(|site| compare_key(&site.url) == target)
}
