use rocket::form::Form;
use rocket::http::{Cookie, CookieJar, Status};
use rocket::response::content::RawHtml;
use rocket::State;

use crate::catalog;
use crate::client::ClientIp;
use crate::config::SiteConfig;
use crate::contact::{self, ContactForm, InFlight, Mailer, SubmitResult};
use crate::designs;
use crate::designs::contact::ContactView;
use crate::rate_limit::RateLimiter;
use crate::render::{self, NavItem, PageParts};
use crate::resolve::requested_slug;
use crate::skeleton::Footer;

const PRELOADER_COOKIE: &str = "preloader_shown";

/// True on the first page of a browser session; marks the session as seen.
fn preloader_pending(cookies: &CookieJar<'_>) -> bool {
    if cookies.get(PRELOADER_COOKIE).is_some() {
        return false;
    }
    cookies.add(Cookie::new(PRELOADER_COOKIE, "true"));
    true
}

fn page(
    cfg: &SiteConfig,
    cookies: &CookieJar<'_>,
    title: &str,
    active: NavItem,
    body: &str,
    footer: &Footer,
) -> String {
    render::render_page(
        cfg,
        &PageParts {
            title,
            active,
            body,
            footer,
            show_preloader: preloader_pending(cookies),
        },
    )
}

// ── Home (card grid) ───────────────────────────────────

#[get("/?<category>")]
pub fn home(
    cfg: &State<SiteConfig>,
    cookies: &CookieJar<'_>,
    category: Option<&str>,
) -> RawHtml<String> {
    let cards = match catalog::load_cards(&cfg.catalog.cards_path) {
        Ok(cards) => Some(cards),
        Err(e) => {
            log::error!("Failed to load {}: {}", cfg.catalog.cards_path, e);
            None
        }
    };
    let body = designs::cards::render_body(
        cards.as_deref(),
        category.unwrap_or("all"),
        &cfg.footer,
    );
    let footer = Footer::from_config(&cfg.footer);
    RawHtml(page(cfg, cookies, &cfg.site_name, NavItem::Home, &body, &footer))
}

// ── Project page ───────────────────────────────────────

#[get("/work?<project>&<slug>")]
pub fn work(
    cfg: &State<SiteConfig>,
    cookies: &CookieJar<'_>,
    project: Option<&str>,
    slug: Option<&str>,
) -> RawHtml<String> {
    let query = requested_slug(project, slug);
    log::info!(
        "Requested project slug: {}",
        if query.is_empty() { "(none)" } else { query.as_str() }
    );

    let loaded = catalog::load_catalog(&cfg.catalog);
    let work = designs::work::build(cfg, loaded.as_ref(), &query);
    RawHtml(page(
        cfg,
        cookies,
        &work.document_title,
        NavItem::Work,
        &work.body,
        &work.footer,
    ))
}

// ── Contact ────────────────────────────────────────────

#[get("/contact")]
pub fn contact_page(cfg: &State<SiteConfig>, cookies: &CookieJar<'_>) -> Option<RawHtml<String>> {
    if !cfg.contact.enabled {
        return None;
    }
    let body = designs::contact::render_body(&ContactView::default());
    let footer = Footer::from_config(&cfg.footer);
    Some(RawHtml(page(
        cfg,
        cookies,
        &format!("Contact - {}", cfg.site_name),
        NavItem::Contact,
        &body,
        &footer,
    )))
}

/// HTTP status for a finished submission.
pub fn submit_status(result: &SubmitResult) -> Status {
    match result {
        SubmitResult::Rejected(_) => Status::UnprocessableEntity,
        SubmitResult::RateLimited => Status::TooManyRequests,
        SubmitResult::Busy => Status::Conflict,
        SubmitResult::Sent(contact::RelayOutcome::Failed(_)) => Status::BadGateway,
        _ => Status::Ok,
    }
}

#[post("/contact", data = "<form>")]
pub async fn contact_submit(
    cfg: &State<SiteConfig>,
    limiter: &State<RateLimiter>,
    in_flight: &State<InFlight>,
    mailer: &State<Mailer>,
    client_ip: ClientIp,
    cookies: &CookieJar<'_>,
    form: Form<ContactForm>,
) -> Option<(Status, RawHtml<String>)> {
    if !cfg.contact.enabled {
        return None;
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

    let body = designs::contact::render_body(&ContactView {
        form: Some(&form),
        result: Some(&result),
    });
    let footer = Footer::from_config(&cfg.footer);
    let html = page(
        cfg,
        cookies,
        &format!("Contact - {}", cfg.site_name),
        NavItem::Contact,
        &body,
        &footer,
    );
    Some((submit_status(&result), RawHtml(html)))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![home, work, contact_page, contact_submit]
}
