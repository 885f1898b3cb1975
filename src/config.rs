use crate::{
    site::SiteStore,
    storage::{BackendLocal, StorageManager},
};
use anyhow::{bail, Context};
use homedir::my_home;
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf};

const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_SITES_FILE: &str = "sites.json";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// Pasted site text is small; 1 MiB is plenty.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Site collection, relative to the base path.
    #[serde(default = "default_sites_file")]
    pub sites_file: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Rules text used by `prompt`, relative to the base path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<String>,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites_file: default_sites_file(),
            listen_addr: default_listen_addr(),
            rules_file: None,
            max_body_bytes: default_max_body_bytes(),
            base_path: String::new(),
        }
    }
}

fn default_sites_file() -> String {
    DEFAULT_SITES_FILE.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// `SITEDASH_BASE_PATH`, or `~/.local/share/sitedash`.
pub fn base_path() -> anyhow::Result<String> {
    if let Ok(path) = std::env::var("SITEDASH_BASE_PATH") {
        return Ok(path);
    }

    let home = my_home()
        .context("couldnt find home dir")?
        .context("couldnt find home dir")?;
    Ok(format!("{}/.local/share/sitedash", home.to_string_lossy()))
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        if self.sites_file.trim().is_empty() {
            bail!("sites_file cannot be empty");
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            bail!(
                "listen_addr must be an ip:port pair, got '{}'",
                self.listen_addr
            );
        }

        if self.max_body_bytes == 0 {
            bail!("max_body_bytes must be greater than 0");
        }

        Ok(())
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(&base_path()?)
    }

    pub fn load_with(base_path: &str) -> anyhow::Result<Self> {
        let store = BackendLocal::new(base_path)
            .with_context(|| format!("couldnt create base dir {base_path}"))?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            log::info!("creating default config at {base_path}/{CONFIG_FILE}");
            store.write(
                CONFIG_FILE,
                serde_yml::to_string(&Self::default())?.as_bytes(),
            )?;
        }

        let config_str =
            String::from_utf8(store.read(CONFIG_FILE)?).context("config file is not valid utf8")?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let store = BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    pub fn rules_path(&self) -> Option<PathBuf> {
        self.rules_file
            .as_ref()
            .map(|file| PathBuf::from(&self.base_path).join(file))
    }

    pub fn site_store(&self) -> anyhow::Result<SiteStore<BackendLocal>> {
        let store = BackendLocal::new(&self.base_path)?;
        Ok(SiteStore::new(store, &self.sites_file))
    }
}
