//! Home page card grid with category filter buttons.

use crate::catalog::{present, Card};
use crate::config::FooterConfig;
use crate::render::{html_escape, urlencoding_simple};

/// Cards whose category equals `category` (case-insensitive); "all" keeps everything.
pub fn filter_cards<'a>(cards: &'a [Card], category: &str) -> Vec<&'a Card> {
    let wanted = category.trim().to_lowercase();
    cards
        .iter()
        .filter(|card| wanted == "all" || card_category(card) == wanted)
        .collect()
}

/// Filter button values: "all" first, then each category in first-seen order.
pub fn categories(cards: &[Card]) -> Vec<String> {
    let mut out = vec!["all".to_string()];
    for card in cards {
        let cat = card_category(card);
        if !cat.is_empty() && !out.contains(&cat) {
            out.push(cat);
        }
    }
    out
}

fn card_category(card: &Card) -> String {
    card.category.as_deref().unwrap_or("").to_lowercase()
}

/// Project page link by slug, else the card's own href, else "#".
pub fn card_href(card: &Card) -> String {
    if let Some(slug) = present(&card.slug) {
        format!("/work?project={}", urlencoding_simple(slug))
    } else if let Some(href) = present(&card.href) {
        href.to_string()
    } else {
        "#".to_string()
    }
}

fn card_html(card: &Card) -> String {
    let title = card.title.as_deref().unwrap_or("");
    let alt = present(&card.alt).unwrap_or(title);
    format!(
        "<a class=\"card\" data-name=\"{}\" href=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"><div class=\"card-body\"><h3 class=\"card-title\">{}</h3></div></a>\n",
        html_escape(&card_category(card)),
        html_escape(&card_href(card)),
        html_escape(card.image_src.as_deref().unwrap_or("")),
        html_escape(alt),
        html_escape(title)
    )
}

fn filter_label(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn build_portrait(footer: &FooterConfig) -> String {
    if footer.portrait.is_empty() {
        return String::new();
    }
    let hover = if footer.portrait_hover.is_empty() {
        String::new()
    } else {
        format!(" data-hover=\"{}\"", html_escape(&footer.portrait_hover))
    };
    format!(
        "<div class=\"home-portrait\"><img class=\"me-img\" src=\"{}\"{} alt=\"Portrait\" tabindex=\"0\"></div>\n",
        html_escape(&footer.portrait),
        hover
    )
}

/// Build the home page body. `cards` is `None` when the card list failed to load.
pub fn render_body(cards: Option<&[Card]>, selected: &str, footer: &FooterConfig) -> String {
    let mut html = String::from("<section class=\"portfolio section\" id=\"portfolio\">\n");
    html.push_str(&build_portrait(footer));

    let Some(cards) = cards else {
        html.push_str("<div id=\"portfolio-cards\" class=\"portfolio-cards\"><p>Could not load portfolio items.</p></div>\n</section>\n");
        return html;
    };

    let selected = selected.trim().to_lowercase();
    let selected = if selected.is_empty() { "all".to_string() } else { selected };

    html.push_str("<div class=\"portfolio-filters\">");
    for value in categories(cards) {
        let class = if value == selected {
            "slide-btn active"
        } else {
            "slide-btn"
        };
        html.push_str(&format!(
            "<a class=\"{}\" data-name=\"{}\" href=\"/?category={}\">{}</a>",
            class,
            html_escape(&value),
            urlencoding_simple(&value),
            html_escape(&filter_label(&value))
        ));
    }
    html.push_str("</div>\n<div id=\"portfolio-cards\" class=\"portfolio-cards\">\n");
    for card in filter_cards(cards, &selected) {
        html.push_str(&card_html(card));
    }
    html.push_str("</div>\n</section>\n");
    html
}
