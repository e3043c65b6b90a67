//! Project ("work") page: resolve one record and bind it onto the skeleton.

use log::warn;

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::populate::populate;
use crate::render::render_message;
use crate::resolve::find_project;
use crate::skeleton::{Footer, Skeleton};

pub struct WorkPage {
    pub document_title: String,
    pub body: String,
    pub footer: Footer,
}

/// Build the work page for `query`. A missing or empty catalog renders the
/// degraded "could not load" page instead of a half-bound skeleton.
pub fn build(cfg: &SiteConfig, catalog: Option<&Catalog>, query: &str) -> WorkPage {
    let degraded = |message: &str| WorkPage {
        document_title: cfg.site_name.clone(),
        body: render_message("work", message),
        footer: Footer::from_config(&cfg.footer),
    };

    let Some(catalog) = catalog else {
        warn!("No catalog loaded, check works_path and the server");
        return degraded("Could not load this project.");
    };
    let Some(project) = find_project(catalog, query) else {
        warn!("Catalog is empty, nothing to render");
        return degraded("No projects yet.");
    };

    let mut skeleton = Skeleton::work_page(&cfg.site_name, &cfg.title_suffix);
    populate(project, &mut skeleton);

    WorkPage {
        body: skeleton.to_html(),
        document_title: skeleton.document_title,
        footer: skeleton.footer,
    }
}
