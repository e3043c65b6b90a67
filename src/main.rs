#[macro_use]
extern crate rocket;

use rocket::fs::{FileServer, Options};
use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

mod boot;
mod catalog;
mod client;
mod config;
mod contact;
mod designs;
mod highlight;
mod populate;
mod rate_limit;
mod render;
mod resolve;
mod routes;
mod skeleton;


use config::SiteConfig;
use contact::{FormSubmitRelay, InFlight, Mailer, Relay};
use rate_limit::RateLimiter;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Home</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the server around a config and a contact relay.
pub fn build(cfg: SiteConfig, relay: Box<dyn Relay>) -> Rocket<Build> {
    rocket::build()
        .manage(cfg)
        .manage(RateLimiter::new())
        .manage(InFlight::new())
        .manage(Mailer(relay))
        .mount("/static", FileServer::new("website/static", Options::Index | Options::Missing))
        .mount("/assets", FileServer::new("website/assets", Options::Index | Options::Missing))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let cfg: SiteConfig = rocket::Config::figment()
        .extract()
        .expect("Invalid site configuration");

    // Boot check: create directories, report missing catalogs
    boot::run(&cfg);

    let relay = FormSubmitRelay::new().expect("Failed to build contact relay client");
    log::info!("Serving {} from {}", cfg.site_name, cfg.catalog.works_path);

    build(cfg, Box::new(relay))
}
