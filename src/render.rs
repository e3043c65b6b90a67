use crate::config::SiteConfig;
use crate::skeleton::Footer;

/// Pages that get a nav link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Work,
    Contact,
}

/// Everything that varies between pages; the shell around it is shared.
pub struct PageParts<'a> {
    pub title: &'a str,
    pub active: NavItem,
    pub body: &'a str,
    pub footer: &'a Footer,
    pub show_preloader: bool,
}

/// Wrap a page body in the site shell: head, header/nav, preloader, footer.
pub fn render_page(cfg: &SiteConfig, parts: &PageParts) -> String {
    let preloader = if parts.show_preloader && cfg.preloader.enabled {
        format!(
            "<div id=\"preloader\" data-min-display=\"{}\"><div class=\"preloader-spinner\"></div></div>\n",
            cfg.preloader.min_display_ms
        )
    } else {
        String::new()
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/remixicon@4.2.0/fonts/remixicon.css">
<link rel="stylesheet" href="/static/css/styles.css">
</head>
<body>
{preloader}{header}<main class="main">
{body}</main>
{footer}<a href="#" class="scrollup" id="scroll-up"><i class="ri-arrow-up-line"></i></a>
<script src="/static/js/main.js"></script>
</body>
</html>
"##,
        title = html_escape(parts.title),
        preloader = preloader,
        header = build_header(cfg, parts.active),
        body = parts.body,
        footer = parts.footer.to_html(),
    )
}

fn build_header(cfg: &SiteConfig, active: NavItem) -> String {
    let mut links: Vec<(NavItem, &str, &str)> = vec![
        (NavItem::Home, "/", "Home"),
        (NavItem::Work, "/work", "Work"),
    ];
    if cfg.contact.enabled {
        links.push((NavItem::Contact, "/contact", "Contact"));
    }

    let mut items = String::new();
    for (item, href, label) in links {
        let class = if item == active {
            "nav-link active-link"
        } else {
            "nav-link"
        };
        items.push_str(&format!(
            "<li class=\"nav-item\"><a href=\"{}\" class=\"{}\">{}</a></li>\n",
            href, class, label
        ));
    }

    format!(
        "<header class=\"header\" id=\"header\">\n\
         <nav class=\"nav container\">\n\
         <a href=\"/\" class=\"nav-logo\">{}</a>\n\
         <div class=\"nav-menu\" id=\"nav-menu\">\n\
         <ul class=\"nav-list\">\n{}</ul>\n\
         <div class=\"nav-close\" id=\"nav-close\"><i class=\"ri-close-line\"></i></div>\n\
         </div>\n\
         <div class=\"nav-toggle\" id=\"nav-toggle\"><i class=\"ri-menu-line\"></i></div>\n\
         </nav>\n</header>\n",
        html_escape(&cfg.site_name),
        items
    )
}

/// Inline body for pages that have nothing to show.
pub fn render_message(class: &str, message: &str) -> String {
    format!(
        "<section class=\"{} container\"><p>{}</p></section>\n",
        class,
        html_escape(message)
    )
}

pub fn urlencoding_simple(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
