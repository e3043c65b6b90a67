use crate::contact::{ContactForm, FieldErrors, RelayOutcome, SubmitResult};
use crate::render::html_escape;

/// What the contact page shows after (or before) a submission.
#[derive(Default)]
pub struct ContactView<'a> {
    /// Values to refill; dropped after a successful send.
    pub form: Option<&'a ContactForm>,
    pub result: Option<&'a SubmitResult>,
}

/// Build the contact page body HTML.
pub fn render_body(view: &ContactView) -> String {
    let no_errors = FieldErrors::default();
    let errors = match view.result {
        Some(SubmitResult::Rejected(errors)) => errors,
        _ => &no_errors,
    };
    let success = view.result.map(|r| r.is_success()).unwrap_or(false);
    let refill = if success { None } else { view.form };

    let flash_html = match view.result.and_then(|r| r.alert()) {
        Some(msg) => format!(
            "<div class=\"contact-flash contact-flash-error\" role=\"alert\">{}</div>\n",
            html_escape(msg)
        ),
        None => String::new(),
    };

    let name = refill.map(|f| f.name()).unwrap_or("");
    let email = refill.map(|f| f.email()).unwrap_or("");
    let message = refill.map(|f| f.message()).unwrap_or("");

    let fields = format!(
        "{}{}{}",
        field_html("name", "Name", "text", name, errors.name),
        field_html("email", "Email", "email", email, errors.email),
        field_html("message", "Message", "textarea", message, errors.message),
    );

    format!(
        r#"<section class="contact section" id="contact">
<div class="contact-inner container">
<h1 class="contact-title">Contact</h1>
{flash_html}<form method="post" action="/contact" class="contact-form" novalidate>
{fields}<div style="display:none"><input type="text" name="_honey" tabindex="-1" autocomplete="off"></div>
<button type="submit" class="contact-submit pop-btn">Send Message</button>
</form>
</div>
</section>
{success_panel}"#,
        flash_html = flash_html,
        fields = fields,
        success_panel = success_panel(view.result, success),
    ) + css()
}

fn field_html(
    id: &str,
    label: &str,
    kind: &str,
    value: &str,
    error: Option<&str>,
) -> String {
    let (class, invalid) = if error.is_some() {
        ("field error", " aria-invalid=\"true\"")
    } else {
        ("field", "")
    };
    let input = if kind == "textarea" {
        format!(
            "<textarea id=\"{id}\" name=\"{id}\" class=\"form-input\" rows=\"6\" required{invalid}>{value}</textarea>",
            id = id,
            invalid = invalid,
            value = html_escape(value)
        )
    } else {
        format!(
            "<input type=\"{kind}\" id=\"{id}\" name=\"{id}\" class=\"form-input\" value=\"{value}\" required{invalid}>",
            kind = kind,
            id = id,
            invalid = invalid,
            value = html_escape(value)
        )
    };
    format!(
        "<div class=\"{class}\"><label for=\"{id}\">{label}</label>{input}<small class=\"error-txt\">{error}</small></div>\n",
        class = class,
        id = id,
        label = label,
        input = input,
        error = html_escape(error.unwrap_or(""))
    )
}

fn success_panel(result: Option<&SubmitResult>, open: bool) -> String {
    let (heading, body) = match result {
        Some(SubmitResult::Sent(RelayOutcome::Hiccup)) => (
            "Thanks, but there was a hiccup",
            "Your message was received but the server returned a non-standard response. If you don't get a reply, please try again later.",
        ),
        _ => (
            "Thanks, message sent!",
            "I'll get back to you as soon as possible.",
        ),
    };
    let (class, hidden, style) = if open {
        (" class=\"open\"", "false", "display:flex")
    } else {
        ("", "true", "display:none")
    };
    format!(
        "<div id=\"contact-success\"{} aria-hidden=\"{}\" style=\"{}\"><div class=\"success-card\"><h3>{}</h3><p>{}</p><a id=\"success-close\" class=\"pop-btn\" href=\"/contact\">Close</a></div></div>\n",
        class, hidden, style, heading, body
    )
}

pub fn css() -> &'static str {
    r#"<style>
.contact-title { font-size:2em; margin-bottom:24px; }
.contact-flash { padding:12px; margin-bottom:16px; border-radius:6px; font-size:14px; }
.contact-flash-error { background:rgba(239,68,68,.12); color:#ef4444; }
.field { margin-bottom:16px; }
.field label { display:block; font-size:.9em; font-weight:600; margin-bottom:6px; }
.field .form-input {
    width:100%; padding:10px 12px; font-size:.95em; border:1px solid rgba(128,128,128,.3);
    background:transparent; color:inherit; border-radius:4px; font-family:inherit;
    box-sizing:border-box;
}
.field textarea.form-input { resize:vertical; }
.field .error-txt { display:none; color:#ef4444; font-size:.85em; margin-top:4px; }
.field.error .form-input { border-color:#ef4444; }
.field.error .error-txt { display:block; }
#contact-success { position:fixed; inset:0; align-items:center; justify-content:center; background:rgba(0,0,0,.5); z-index:100; }
#contact-success .success-card { background:#fff; color:#222; padding:32px; border-radius:8px; max-width:420px; text-align:center; }
</style>"#
}
