use crate::config::Config;
use anyhow::Context;

/// Used when no rules file is configured.
pub const DEFAULT_RULES: &str = "\
- name: the official product or site name, without marketing slogans
- icon: a single emoji that fits the site
- description: what the site offers, 50-150 characters, plain text on one line
- links: up to five important subpages (docs, pricing, blog), each with text and url
- tags: three to six short lowercase keywords";

/// Instructions asking an AI assistant to describe `url` in the text shape
/// the site parser accepts.
pub fn build_prompt(url: &str, rules: &str) -> String {
    format!(
        "Generate the site information for {url} according to the rules below:

{rules}

Reply with the complete site information in YAML, following this example:
```yaml
name: Site name
url: {url}
icon: 🔗
description: A detailed description of the site
links:
  - text: Link text
    url: https://example.com/
tags:
  - tag1
  - tag2
```"
    )
}

/// Rules text from the configured rules file, or the built-in default.
pub fn load_rules(config: &Config) -> anyhow::Result<String> {
    match config.rules_path() {
        Some(path) => {
            let rules = std::fs::read_to_string(&path)
                .with_context(|| format!("couldnt read rules file {}", path.display()))?;
            log::debug!("loaded rules from {}", path.display());
            Ok(rules.trim().to_string())
        }
        None => Ok(DEFAULT_RULES.to_string()),
    }
}
