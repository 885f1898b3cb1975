use crate::dashboard::Dashboard;
use crate::prompt::{build_prompt, DEFAULT_RULES};
use crate::search_query::{format_tags, parse_query};
use crate::site_text;

const AI_REPLY: &str = r#"Sure! Here is the site information:

```yaml
# generated
name: "Tool X"
url: https://tool-x.dev
icon: 🛠
description: An AI toolkit
  for building agents
  quickly.
links:
  - text: Docs
    url: https://tool-x.dev/docs
  - text: Pricing url: https://tool-x.dev/pricing
tags:
  - AI
  - agents
```

Let me know if you need anything else."#;

#[test]
fn test_paste_search_and_tag_flow() {
    let mut dash = Dashboard::new(vec![]);

    // the query box holds a URL nobody has stored yet
    let view = dash.search("tool-x.dev");
    assert_eq!(view.detected_url.as_deref(), Some("https://tool-x.dev"));

    let prompt = build_prompt(view.detected_url.as_deref().unwrap(), DEFAULT_RULES);
    assert!(prompt.contains("```yaml"));

    let (site, overwritten) = dash.save_text(AI_REPLY).unwrap();
    assert!(!overwritten);
    assert_eq!(site.name, "Tool X");
    assert_eq!(site.description, "An AI toolkit for building agents quickly.");
    assert_eq!(site.links.len(), 2);
    assert_eq!(site.links[1].url, "https://tool-x.dev/pricing");

    // now known, so no add affordance
    assert_eq!(dash.search("https://tool-x.dev/").detected_url, None);

    let query = dash.click_tag("agents", "toolkit");
    assert_eq!(query, "toolkit, #agents");
    assert_eq!(dash.search(&query).sites.len(), 1);

    let query = dash.click_tag("ai", &query);
    assert_eq!(query, "toolkit, #agents, #ai");
    assert_eq!(dash.search(&query).sites.len(), 1);

    let query = dash.click_tag("missing", &query);
    assert!(dash.search(&query).sites.is_empty());
}

#[test]
fn test_edit_round_trip_keeps_structured_fields() {
    let site = site_text::parse(AI_REPLY).unwrap();
    let reparsed = site_text::parse(&site_text::serialize(&site)).unwrap();
    assert_eq!(reparsed, site);
}

#[test]
fn test_query_format_inverse() {
    let tags = ["ai", "agents", "dev-tools"];
    let query = parse_query(&format_tags(&tags));
    assert_eq!(query.tags, tags);
    assert_eq!(query.search_term, "");
}
