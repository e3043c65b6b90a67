use log::{info, warn};

use crate::catalog::{Catalog, Project};

/// Which rule picked the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Slug,
    Title,
    Partial,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub index: usize,
    pub tier: MatchTier,
}

/// Trim and lowercase, the form every comparison below works on.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// `?project=` wins over `?slug=`; an empty value falls through to the next.
pub fn requested_slug(project: Option<&str>, slug: Option<&str>) -> String {
    let raw = project
        .filter(|s| !s.is_empty())
        .or(slug.filter(|s| !s.is_empty()))
        .unwrap_or("");
    normalize(raw)
}

/// Pick one record for `query`. Each tier only runs when the previous one
/// found nothing; the first record is the last resort. `None` only for an
/// empty catalog.
pub fn resolve(catalog: &Catalog, query: &str) -> Option<Resolution> {
    if catalog.is_empty() {
        return None;
    }
    let query = normalize(query);
    let fallback = Resolution {
        index: 0,
        tier: MatchTier::Fallback,
    };

    if query.is_empty() {
        info!(
            "No project requested, using first: {}",
            catalog.projects[0].slug.as_deref().unwrap_or("")
        );
        return Some(fallback);
    }

    let slugs: Vec<String> = catalog
        .projects
        .iter()
        .map(|p| normalize(p.slug.as_deref().unwrap_or("")))
        .collect();

    if let Some(index) = slugs.iter().position(|s| *s == query) {
        return Some(Resolution {
            index,
            tier: MatchTier::Slug,
        });
    }

    if let Some(index) = catalog
        .projects
        .iter()
        .position(|p| normalize(p.title.as_deref().unwrap_or("")) == query)
    {
        return Some(Resolution {
            index,
            tier: MatchTier::Title,
        });
    }

    if let Some(index) = slugs
        .iter()
        .position(|s| s.contains(&query) || query.contains(s.as_str()))
    {
        return Some(Resolution {
            index,
            tier: MatchTier::Partial,
        });
    }

    warn!(
        "No project matched \"{}\", falling back to first ({})",
        query,
        slugs[0]
    );
    Some(fallback)
}

pub fn find_project<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a Project> {
    resolve(catalog, query).and_then(|r| catalog.get(r.index))
}
