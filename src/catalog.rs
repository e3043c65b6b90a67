//! Catalog documents: the works list behind project pages and the card list
//! behind the home grid. Records are loosely typed; every field is optional
//! and an empty string counts as absent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::CatalogConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub play_link: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub play_icon: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub play_text: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub bg_image: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub type_html: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
    #[serde(default, deserialize_with = "loose_strings", skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<String>,
    #[serde(default, deserialize_with = "loose_strings", skip_serializing_if = "Vec::is_empty")]
    pub team: Vec<String>,
    #[serde(default, deserialize_with = "loose_records", skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, deserialize_with = "loose_strings", skip_serializing_if = "Vec::is_empty")]
    pub intro_highlights: Vec<String>,
    #[serde(default, deserialize_with = "loose_strings", skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    #[serde(default, deserialize_with = "loose_alts", skip_serializing_if = "Vec::is_empty")]
    pub gallery_alts: Vec<Option<String>>,
    #[serde(default, deserialize_with = "loose_records", skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub footer_bg_image: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub footer_copy: Option<String>,
    #[serde(default, deserialize_with = "loose_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub social: BTreeMap<String, String>,
}

/// One body section of a multi-section project page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, deserialize_with = "loose_strings", skip_serializing_if = "Vec::is_empty")]
    pub intro_highlights: Vec<String>,
    #[serde(default, deserialize_with = "loose_strings", skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
    #[serde(default, deserialize_with = "loose_alts", skip_serializing_if = "Vec::is_empty")]
    pub gallery_alts: Vec<Option<String>>,
    #[serde(default, rename = "usePictureContainer4", deserialize_with = "loose_bool")]
    pub use_picture_container4: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Home-grid entry from `cards.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Ordered project records, addressed by index, looked up by slug or title.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Catalog { projects }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }
}

/// Treat `Some("")` like the field was never there.
pub fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

// ── Loading ────────────────────────────────────────────

/// One attempt at the works document. Failures are logged and answered with
/// the inline document when one is configured, otherwise `None`.
pub fn load_catalog(cfg: &CatalogConfig) -> Option<Catalog> {
    let inline = cfg.inline.as_ref().filter(|doc| !is_empty_doc(doc));

    if cfg.prefer_inline {
        if let Some(doc) = inline {
            info!("Using inline catalog.");
            return parse_inline(doc);
        }
    }

    match read_json(Path::new(&cfg.works_path)).and_then(parse_catalog) {
        Ok(catalog) => {
            info!("Loaded {} projects from {}", catalog.len(), cfg.works_path);
            Some(catalog)
        }
        Err(e) => {
            warn!("Failed to load {}: {}", cfg.works_path, e);
            let doc = inline?;
            info!("Falling back to inline catalog.");
            parse_inline(doc)
        }
    }
}

fn parse_inline(doc: &Value) -> Option<Catalog> {
    match parse_catalog(doc.clone()) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            warn!("Inline catalog unusable: {}", e);
            None
        }
    }
}

/// Read the card list. A document that is not an array yields no cards.
pub fn load_cards(path: &str) -> Result<Vec<Card>, String> {
    let doc = read_json(Path::new(path))?;
    match doc {
        Value::Array(items) => Ok(records_from(items)),
        _ => Ok(Vec::new()),
    }
}

/// Accepts a bare array of records or `{ "projects": [...] }`.
pub fn parse_catalog(doc: Value) -> Result<Catalog, String> {
    match doc {
        Value::Array(items) => Ok(Catalog::new(records_from(items))),
        Value::Object(mut map) => match map.remove("projects") {
            Some(Value::Array(items)) => Ok(Catalog::new(records_from(items))),
            _ => Err("document has no projects array".to_string()),
        },
        _ => Err("document is neither an array nor an object".to_string()),
    }
}

fn read_json(path: &Path) -> Result<Value, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid JSON: {}", e))
}

fn is_empty_doc(doc: &Value) -> bool {
    match doc {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn records_from<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect()
}

// ── Lenient field decoding ─────────────────────────────

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(scalar_text))
}

fn loose_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => Ok(items.iter().filter_map(scalar_text).collect()),
        _ => Ok(Vec::new()),
    }
}

fn loose_alts<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<String>>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => Ok(items.iter().map(scalar_text).collect()),
        _ => Ok(Vec::new()),
    }
}

fn loose_map<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, String>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        Some(Value::Object(map)) => Ok(map
            .iter()
            .filter_map(|(k, v)| scalar_text(v).map(|url| (k.clone(), url)))
            .collect()),
        _ => Ok(BTreeMap::new()),
    }
}

/// Truthiness as a catalog author would expect it: `1`, `"yes"` and `{}` are
/// set; `0`, `""`, `false` and `null` are not.
fn loose_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}

fn loose_records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => Ok(records_from(items)),
        _ => Ok(Vec::new()),
    }
}
