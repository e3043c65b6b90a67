//! Contact form: validation, endpoint derivation and relaying to the form
//! service (FormSubmit-style `/ajax/` endpoints answering JSON).

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use log::{error, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ContactConfig;
use crate::rate_limit::RateLimiter;

pub const SEND_FAILED: &str = "Sending failed. Please try again later or email directly.";
pub const NETWORK_ERROR: &str = "Network error when sending message. Please try again later.";

#[derive(Debug, Clone, Default, FromForm, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    #[field(name = "_honey")]
    #[serde(rename = "_honey", default)]
    pub honey: Option<String>,
}

impl ContactForm {
    fn field(v: &Option<String>) -> &str {
        v.as_deref().unwrap_or("").trim()
    }

    pub fn name(&self) -> &str {
        Self::field(&self.name)
    }

    pub fn email(&self) -> &str {
        Self::field(&self.email)
    }

    pub fn message(&self) -> &str {
        Self::field(&self.message)
    }
}

/// Per-field messages; all `None` means the form may be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

pub fn is_valid_email(v: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is valid")
        })
        .is_match(v)
}

pub fn validate(form: &ContactForm) -> FieldErrors {
    let email = form.email();
    FieldErrors {
        name: form.name().is_empty().then_some("Name can't be blank"),
        email: if email.is_empty() {
            Some("Email address can't be blank")
        } else if !is_valid_email(email) {
            Some("Please enter a valid email address")
        } else {
            None
        },
        message: form.message().is_empty().then_some("Message can't be blank"),
    }
}

/// The form service's AJAX endpoint for a declared form action:
/// `https://formsubmit.co/me@x.io` becomes `https://formsubmit.co/ajax/me@x.io`.
pub fn ajax_url_for(action: &str) -> Option<String> {
    let action = action.trim();
    if action.is_empty() {
        return None;
    }
    if action.contains("/ajax/") {
        return Some(action.to_string());
    }
    match url::Url::parse(action) {
        Ok(u) => {
            let host = u.host_str()?;
            let authority = match u.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            Some(format!("{}://{}/ajax{}", u.scheme(), authority, u.path()))
        }
        Err(e) => {
            if action.contains('/') {
                Some(action.replace("/submit", "/ajax/submit"))
            } else {
                warn!("Cannot derive AJAX endpoint from {:?}: {}", action, e);
                None
            }
        }
    }
}

// ── Relay ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    /// Accepted by the service, but the response was not the usual one.
    Hiccup,
    Failed(String),
}

/// Map a form service response onto an outcome.
pub fn classify(status: u16, body: &str) -> RelayOutcome {
    if !(200..300).contains(&status) {
        warn!("Form service answered {}", status);
        return RelayOutcome::Failed(SEND_FAILED.to_string());
    }
    let standard = status == 200
        && match serde_json::from_str::<Value>(body) {
            Err(_) | Ok(Value::Null) => true,
            Ok(json) => {
                let success = json
                    .get("success")
                    .map(|s| *s == true || *s == "true")
                    .unwrap_or(false);
                let message = json
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(|m| !m.is_empty())
                    .unwrap_or(false);
                success || message
            }
        };
    if standard {
        RelayOutcome::Delivered
    } else {
        warn!("Unexpected form service response: {}", body);
        RelayOutcome::Hiccup
    }
}

#[rocket::async_trait]
pub trait Relay: Send + Sync {
    async fn send(&self, endpoint: &str, fields: &[(String, String)]) -> RelayOutcome;
}

/// Posts multipart form data to the form service.
pub struct FormSubmitRelay {
    client: reqwest::Client,
}

impl FormSubmitRelay {
    pub fn new() -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(FormSubmitRelay { client })
    }
}

#[rocket::async_trait]
impl Relay for FormSubmitRelay {
    async fn send(&self, endpoint: &str, fields: &[(String, String)]) -> RelayOutcome {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key.clone(), value.clone());
        }
        let resp = match self
            .client
            .post(endpoint)
            .header("Accept", "application/json")
            .multipart(form)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("Contact relay to {} failed: {}", endpoint, e);
                return RelayOutcome::Failed(NETWORK_ERROR.to_string());
            }
        };
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        classify(status, &body)
    }
}

/// Managed-state wrapper so routes can take `&State<Mailer>`.
pub struct Mailer(pub Box<dyn Relay>);

// ── In-flight guard ────────────────────────────────────

/// Clients with a submission currently being relayed.
pub struct InFlight {
    keys: Mutex<HashSet<String>>,
}

pub struct InFlightTicket<'a> {
    owner: &'a InFlight,
    key: String,
}

impl InFlight {
    pub fn new() -> Self {
        InFlight {
            keys: Mutex::new(HashSet::new()),
        }
    }

    /// `None` while another submission for `key` is outstanding.
    pub fn try_acquire(&self, key: &str) -> Option<InFlightTicket<'_>> {
        let mut keys = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        if keys.insert(key.to_string()) {
            Some(InFlightTicket {
                owner: self,
                key: key.to_string(),
            })
        } else {
            None
        }
    }
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.owner
            .keys
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

// ── Submission ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Rejected(FieldErrors),
    /// Honeypot filled; looks like success to the sender, nothing is relayed.
    Ignored,
    RateLimited,
    Busy,
    Sent(RelayOutcome),
}

impl SubmitResult {
    /// Whether the success overlay should be shown.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SubmitResult::Ignored
                | SubmitResult::Sent(RelayOutcome::Delivered)
                | SubmitResult::Sent(RelayOutcome::Hiccup)
        )
    }

    /// Alert text for results that did not go through.
    pub fn alert(&self) -> Option<&str> {
        match self {
            SubmitResult::RateLimited => {
                Some("Too many messages. Please wait before sending again.")
            }
            SubmitResult::Busy => Some("Your previous message is still being sent."),
            SubmitResult::Sent(RelayOutcome::Failed(msg)) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Validate, guard and relay one submission. Invalid forms never reach the relay.
pub async fn submit(
    cfg: &ContactConfig,
    form: &ContactForm,
    client_key: &str,
    limiter: &RateLimiter,
    in_flight: &InFlight,
    relay: &dyn Relay,
) -> SubmitResult {
    let errors = validate(form);
    if !errors.is_empty() {
        return SubmitResult::Rejected(errors);
    }

    if form.honey.as_deref().is_some_and(|h| !h.is_empty()) {
        info!("Contact honeypot triggered, dropping message");
        return SubmitResult::Ignored;
    }

    // a refused duplicate must not spend quota, so the ticket comes first
    let Some(_ticket) = in_flight.try_acquire(client_key) else {
        return SubmitResult::Busy;
    };

    let window = Duration::from_secs(15 * 60);
    if !limiter.check_and_record("contact", client_key, cfg.rate_limit.max(1), window) {
        return SubmitResult::RateLimited;
    }

    let endpoint = match ajax_url_for(&cfg.action) {
        Some(url) => url,
        None if !cfg.action.trim().is_empty() => cfg.action.trim().to_string(),
        None => {
            error!("Contact form action is not configured");
            return SubmitResult::Sent(RelayOutcome::Failed(SEND_FAILED.to_string()));
        }
    };

    let mut fields = vec![
        ("name".to_string(), form.name().to_string()),
        ("email".to_string(), form.email().to_string()),
        ("message".to_string(), form.message().to_string()),
    ];
    fields.extend(cfg.extra_fields.iter().map(|(k, v)| (k.clone(), v.clone())));

    let outcome = relay.send(&endpoint, &fields).await;
    info!("Contact message relayed to {}: {:?}", endpoint, outcome);
    SubmitResult::Sent(outcome)
}
