//! The project page skeleton: a fixed page structure whose regions are typed
//! optional slots. A `None` slot is a removed region; serialization simply
//! skips it. Removal is one-way, there is no way to get a slot back short of
//! building a fresh skeleton.

use std::collections::BTreeMap;

use crate::config::FooterConfig;
use crate::render::html_escape;

/// Slot content: plain text (escaped on output) or trusted markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Text(String),
    Html(String),
}

impl Markup {
    pub fn to_html(&self) -> String {
        match self {
            Markup::Text(t) => html_escape(t),
            Markup::Html(h) => h.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayButton {
    pub href: String,
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    /// Four-column variant (`picture-container--4`).
    pub wide: bool,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSection {
    pub subtitle: Option<String>,
    pub intro: Option<Markup>,
    pub gallery: Option<Gallery>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolBadge {
    pub src: String,
    pub alt: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Instagram,
    Facebook,
    Linkedin,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Instagram, Network::Facebook, Network::Linkedin];

    /// Key in a record's `social` map.
    pub fn key(self) -> &'static str {
        match self {
            Network::Instagram => "instagram",
            Network::Facebook => "facebook",
            Network::Linkedin => "linkedin",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Network::Instagram => "Instagram",
            Network::Facebook => "Facebook",
            Network::Linkedin => "LinkedIn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub network: Network,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub bg_image: Option<String>,
    pub copy: Option<Markup>,
    pub social: Option<Vec<SocialLink>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    pub document_title: String,
    /// Appended to a bound title: "{title} - {suffix}".
    pub title_suffix: String,
    pub bg_image: Option<String>,
    pub title: Option<Markup>,
    pub play_button: Option<PlayButton>,
    /// "Type:" detail.
    pub type_info: Option<Markup>,
    /// "Role:" detail.
    pub contributions: Option<Vec<String>>,
    /// "Team:" detail.
    pub team: Option<Vec<String>>,
    pub sections: Vec<PictureSection>,
    pub tools: Option<Vec<ToolBadge>>,
    pub footer: Footer,
}

impl Skeleton {
    /// The work page as it exists before any record is bound to it.
    pub fn work_page(site_name: &str, title_suffix: &str) -> Self {
        Skeleton {
            document_title: site_name.to_string(),
            title_suffix: title_suffix.to_string(),
            bg_image: None,
            title: Some(Markup::Text("Project Title".to_string())),
            play_button: Some(PlayButton {
                href: "#".to_string(),
                icon: "/assets/img/icons/play.svg".to_string(),
                text: "Play".to_string(),
            }),
            type_info: Some(Markup::Text("Project type".to_string())),
            contributions: Some(vec!["Contribution".to_string()]),
            team: Some(vec!["Team member".to_string()]),
            sections: vec![PictureSection {
                subtitle: None,
                intro: Some(Markup::Text("Project description.".to_string())),
                gallery: Some(Gallery {
                    wide: false,
                    images: Vec::new(),
                }),
            }],
            tools: Some(Vec::new()),
            footer: Footer {
                bg_image: None,
                copy: Some(Markup::Text(String::new())),
                social: Some(
                    Network::ALL
                        .iter()
                        .map(|&network| SocialLink {
                            network,
                            href: "#".to_string(),
                        })
                        .collect(),
                ),
            },
        }
    }

    /// Body of `<main>` for the work page.
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "<section class=\"work\"{}>\n<div class=\"work-header container\">\n",
            css_var_style("--bg-image", self.bg_image.as_deref())
        ));
        if let Some(title) = &self.title {
            html.push_str(&format!(
                "<h1 class=\"work-title\">{}</h1>\n",
                title.to_html()
            ));
        }
        if let Some(play) = &self.play_button {
            html.push_str(&format!(
                "<a class=\"slide-btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\"><img src=\"{}\" alt=\"\"><span>{}</span></a>\n",
                html_escape(&play.href),
                html_escape(&play.icon),
                html_escape(&play.text)
            ));
        }

        let mut details = String::new();
        if let Some(info) = &self.type_info {
            details.push_str(&format!(
                "<div class=\"work-detail\"><span class=\"work-detail-label\">Type:</span><p class=\"work-detail-info\">{}</p></div>\n",
                info.to_html()
            ));
        }
        if let Some(items) = &self.contributions {
            details.push_str(&detail_list("Role:", "contribution-list", items));
        }
        if let Some(items) = &self.team {
            details.push_str(&detail_list("Team:", "team-list", items));
        }
        if !details.is_empty() {
            html.push_str(&format!(
                "<div class=\"work-details\">\n{}</div>\n",
                details
            ));
        }
        html.push_str("</div>\n</section>\n");

        for (i, section) in self.sections.iter().enumerate() {
            html.push_str("<hr class=\"section-divider\">\n");
            html.push_str(&section_html(section, i));
        }

        if let Some(tools) = &self.tools {
            html.push_str("<hr class=\"section-divider\">\n");
            html.push_str("<div class=\"container tools\">\n<h3 class=\"tools-title\">Tools</h3>\n<div class=\"tool-icons\">");
            for tool in tools {
                html.push_str(&format!(
                    "<div class=\"tool\"><img src=\"{}\" alt=\"{}\"><span>{}</span></div>",
                    html_escape(&tool.src),
                    html_escape(&tool.alt),
                    html_escape(&tool.label)
                ));
            }
            html.push_str("</div>\n</div>\n");
        }

        html
    }
}

fn detail_list(label: &str, class: &str, items: &[String]) -> String {
    let lis: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", html_escape(item)))
        .collect();
    format!(
        "<div class=\"work-detail\"><span class=\"work-detail-label\">{}</span><ul class=\"{}\">{}</ul></div>\n",
        label, class, lis
    )
}

fn section_html(section: &PictureSection, index: usize) -> String {
    let mut html = format!("<section class=\"picture\" data-index=\"{}\">\n", index);
    if let Some(subtitle) = &section.subtitle {
        html.push_str(&format!(
            "<h3 class=\"section-subtitle\">{}</h3>\n",
            html_escape(subtitle)
        ));
    }
    if let Some(intro) = &section.intro {
        html.push_str(&format!(
            "<p class=\"work-description container\">{}</p>\n",
            intro.to_html()
        ));
    }
    if let Some(gallery) = &section.gallery {
        let grid_class = if gallery.wide {
            "picture-container grid picture-container--4"
        } else {
            "picture-container grid"
        };
        html.push_str(&format!(
            "<div class=\"picture-gallery\"><div class=\"{}\">",
            grid_class
        ));
        for img in &gallery.images {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" class=\"picture-img\" loading=\"lazy\">",
                html_escape(&img.src),
                html_escape(&img.alt)
            ));
        }
        html.push_str("</div></div>\n");
    }
    html.push_str("</section>\n");
    html
}

impl Footer {
    /// Site-wide footer for pages without a project record.
    pub fn from_config(cfg: &FooterConfig) -> Self {
        Footer {
            bg_image: None,
            copy: Some(cfg.copy.as_str())
                .filter(|c| !c.is_empty())
                .map(|c| Markup::Html(c.to_string())),
            social: social_links(&cfg.social),
        }
    }

    pub fn to_html(&self) -> String {
        let mut inner = String::new();
        if let Some(copy) = &self.copy {
            inner.push_str(&format!("<p class=\"footer-copy\">{}</p>\n", copy.to_html()));
        }
        if let Some(links) = &self.social {
            inner.push_str("<div class=\"footer-social\">");
            for link in links {
                let key = link.network.key();
                inner.push_str(&format!(
                    "<a class=\"footer-social-link icon-{}\" href=\"{}\" target=\"_blank\" rel=\"noopener\" aria-label=\"{}\"><i class=\"ri-{}-fill\"></i></a>",
                    key,
                    html_escape(&link.href),
                    link.network.label(),
                    key
                ));
            }
            inner.push_str("</div>\n");
        }
        format!(
            "<footer class=\"footer\"{}>\n<div class=\"footer-container container\">\n{}</div>\n</footer>\n",
            css_var_style("--ft-image", self.bg_image.as_deref()),
            inner
        )
    }
}

/// Links for the known networks that have a URL; `None` when none do.
pub fn social_links(urls: &BTreeMap<String, String>) -> Option<Vec<SocialLink>> {
    let links: Vec<SocialLink> = Network::ALL
        .iter()
        .filter_map(|&network| {
            urls.get(network.key())
                .filter(|u| !u.is_empty())
                .map(|href| SocialLink {
                    network,
                    href: href.clone(),
                })
        })
        .collect();
    if links.is_empty() {
        None
    } else {
        Some(links)
    }
}

fn css_var_style(var: &str, url: Option<&str>) -> String {
    match url {
        Some(u) => format!(
            " style=\"{}\"",
            html_escape(&format!("{}: url(\"{}\")", var, css_url(u)))
        ),
        None => String::new(),
    }
}

/// Percent-encode whatever could close a quoted CSS `url()` or start an escape.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c.is_control() || "\"'()\\<>".contains(c) {
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}
