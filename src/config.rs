use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Site configuration, extracted from the Rocket figment (`Rocket.toml`,
/// `ROCKET_*` env vars). Every field has a default so an empty config boots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    /// Appended to the project title: "Etherlocked - Portfolio".
    pub title_suffix: String,
    pub catalog: CatalogConfig,
    pub contact: ContactConfig,
    pub preloader: PreloaderConfig,
    pub footer: FooterConfig,
    /// Reverse proxies whose forwarding headers are believed. Empty means the
    /// socket peer is the client.
    pub trusted_proxies: Vec<IpAddr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub works_path: String,
    pub cards_path: String,
    /// Use `inline` without reading `works_path` at all.
    pub prefer_inline: bool,
    /// Offline copy of the works document, also used when the file read fails.
    pub inline: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub enabled: bool,
    /// Declared form action, e.g. `https://formsubmit.co/you@example.com`.
    pub action: String,
    /// Hidden fields relayed with every message (`_subject`, `_template`, ...).
    pub extra_fields: BTreeMap<String, String>,
    /// Submissions allowed per client per 15 minutes.
    pub rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub enabled: bool,
    pub min_display_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub copy: String,
    pub social: BTreeMap<String, String>,
    pub portrait: String,
    pub portrait_hover: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Portfolio".to_string(),
            title_suffix: "Portfolio".to_string(),
            catalog: CatalogConfig::default(),
            contact: ContactConfig::default(),
            preloader: PreloaderConfig::default(),
            footer: FooterConfig::default(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            works_path: "website/assets/json/works.json".to_string(),
            cards_path: "website/assets/json/cards.json".to_string(),
            prefer_inline: false,
            inline: None,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            enabled: true,
            action: String::new(),
            extra_fields: BTreeMap::new(),
            rate_limit: 5,
        }
    }
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        PreloaderConfig {
            enabled: true,
            min_display_ms: 3000,
        }
    }
}
