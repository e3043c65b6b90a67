use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog;
use crate::client::ClientIp;
use crate::config::SiteConfig;
use crate::contact::{self, ContactForm, InFlight, Mailer, SubmitResult};
use crate::rate_limit::RateLimiter;
use crate::resolve::{requested_slug, resolve};
use crate::routes::public::submit_status;

// ── Catalog ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub title: String,
}

#[get("/projects")]
pub fn projects(cfg: &State<SiteConfig>) -> Json<Vec<ProjectSummary>> {
    let summaries = catalog::load_catalog(&cfg.catalog)
        .map(|c| {
            c.projects
                .into_iter()
                .map(|p| ProjectSummary {
                    slug: p.slug.unwrap_or_default(),
                    title: p.title.unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();
    Json(summaries)
}

#[get("/project?<project>&<slug>")]
pub fn project(
    cfg: &State<SiteConfig>,
    project: Option<&str>,
    slug: Option<&str>,
) -> Option<Json<Value>> {
    let catalog = catalog::load_catalog(&cfg.catalog)?;
    let query = requested_slug(project, slug);
    let found = resolve(&catalog, &query)?;
    let record = catalog.get(found.index)?;
    Some(Json(json!({
        "index": found.index,
        "tier": found.tier,
        "project": record,
    })))
}

// ── Contact submission ─────────────────────────────────

#[post("/contact", format = "json", data = "<form>")]
pub async fn contact_submit(
    cfg: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    in_flight: &State<InFlight>,
    mailer: &State<Mailer>,
    client_ip: ClientIp,
    form: Json<ContactForm>,
) -> (Status, Json<Value>) {
    if !cfg.contact.enabled {
        return (
            Status::NotFound,
            Json(json!({"success": false, "message": "Contact form is disabled"})),
        );
    }
    let form = form.into_inner();
    let result = contact::submit(
        &cfg.contact,
        &form,
        &client_ip.key(),
        limiter,
        in_flight,
        mailer.0.as_ref(),
    )
    .await;

    let body = match &result {
        SubmitResult::Rejected(errors) => json!({
            "success": false,
            "message": "Please fix the highlighted fields",
            "errors": errors,
        }),
        SubmitResult::Sent(contact::RelayOutcome::Hiccup) => json!({
            "success": true,
            "message": "Received, but the form service returned a non-standard response",
        }),
        r if r.is_success() => json!({"success": true, "message": "Message sent"}),
        r => json!({
            "success": false,
            "message": r.alert().unwrap_or("Sending failed"),
        }),
    };
    (submit_status(&result), Json(body))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![projects, project, contact_submit]
}
