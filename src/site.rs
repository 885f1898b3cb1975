use crate::storage::StorageManager;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const TYPED_FIELDS: [&str; 6] = ["name", "url", "icon", "description", "links", "tags"];

/// A single dashboard entry.
///
/// `name`, `url`, `icon`, `description`, `links`, `tags` and `group` are the
/// field names the backend stores, so they must not be renamed. Every other
/// top-level key the backend (or a pasted text) carries ends up in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    #[serde(default)]
    pub url: String,
}

impl Site {
    pub fn group(&self) -> Option<&str> {
        self.extra
            .get("group")
            .map(String::as_str)
            .filter(|group| !group.is_empty())
    }

    /// Assign a top-level scalar by key. Unknown keys go to `extra`.
    pub fn set_field(&mut self, key: &str, value: String) {
        match key {
            "name" => self.name = value,
            "url" => self.url = value,
            "icon" => self.icon = value,
            "description" => self.description = value,
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}

/// Persistence for the site collection, kept as one JSON array.
pub struct SiteStore<S: StorageManager> {
    storage: S,
    ident: String,
}

impl<S: StorageManager> SiteStore<S> {
    pub fn new(storage: S, ident: &str) -> Self {
        Self {
            storage,
            ident: ident.to_string(),
        }
    }

    /// Load every stored site.
    ///
    /// Each entry is decoded on its own: entries that do not decode, or that
    /// lack a name or url, are skipped with a warning. Only a file that is
    /// not a JSON array fails the load.
    pub fn load(&self) -> anyhow::Result<Vec<Site>> {
        if !self.storage.exists(&self.ident) {
            log::info!("no site collection at {}, starting empty", self.ident);
            return Ok(vec![]);
        }

        let bytes = self
            .storage
            .read(&self.ident)
            .with_context(|| format!("couldnt read {}", self.ident))?;
        let entries: Vec<Value> = serde_json::from_slice(&bytes)
            .with_context(|| format!("{} is not a valid site list", self.ident))?;

        let total = entries.len();
        let sites = entries
            .into_iter()
            .enumerate()
            .filter_map(|(idx, entry)| match decode_site(entry) {
                Ok(site) => Some(site),
                Err(err) => {
                    log::warn!("skipping site #{idx} in {}: {err}", self.ident);
                    None
                }
            })
            .filter(|site| !site.name.is_empty() && !site.url.is_empty())
            .collect::<Vec<_>>();

        if sites.len() != total {
            log::warn!(
                "skipped {} unreadable or incomplete sites in {}",
                total - sites.len(),
                self.ident
            );
        }
        log::debug!("loaded {} sites from {}", sites.len(), self.ident);

        Ok(sites)
    }

    pub fn save(&self, sites: &[Site]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(sites)?;
        self.storage
            .write(&self.ident, &json)
            .with_context(|| format!("couldnt write {}", self.ident))?;
        log::debug!("saved {} sites to {}", sites.len(), self.ident);
        Ok(())
    }
}

/// Decode one stored entry. Scalar extras that are not strings (`"id": 7`,
/// `"pinned": true`) are kept as their JSON text; null and nested extras
/// are dropped.
fn decode_site(mut entry: Value) -> serde_json::Result<Site> {
    if let Value::Object(map) = &mut entry {
        map.retain(|key, value| {
            if TYPED_FIELDS.contains(&key.as_str()) {
                return true;
            }
            match value {
                Value::String(_) => true,
                Value::Number(_) | Value::Bool(_) => {
                    *value = Value::String(value.to_string());
                    true
                }
                _ => {
                    log::debug!("dropping non scalar field {key}");
                    false
                }
            }
        });
    }
    serde_json::from_value(entry)
}
