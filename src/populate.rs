//! Binds one project record onto a work page skeleton.
//!
//! Every region of the page has one entry in `BINDINGS`. A binding either
//! fills its slot from the record, removes the slot because the record has
//! nothing for it, or skips because the slot is already gone.

use log::debug;

use crate::catalog::{present, Project, Section};
use crate::highlight::wrap_highlights;
use crate::render::html_escape;
use crate::skeleton::{Gallery, Image, Markup, PictureSection, PlayButton, Skeleton, ToolBadge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Filled,
    Removed,
    Skipped,
}

type BindFn = fn(&Project, &mut Skeleton) -> Bound;

struct Binding {
    slot: &'static str,
    bind: BindFn,
}

const BINDINGS: &[Binding] = &[
    Binding { slot: "title", bind: bind_title },
    Binding { slot: "play_button", bind: bind_play_button },
    Binding { slot: "bg_image", bind: bind_bg_image },
    Binding { slot: "type", bind: bind_type },
    Binding { slot: "role", bind: bind_contributions },
    Binding { slot: "team", bind: bind_team },
    Binding { slot: "sections", bind: bind_sections },
    Binding { slot: "tools", bind: bind_tools },
    Binding { slot: "footer_bg", bind: bind_footer_bg },
    Binding { slot: "footer_copy", bind: bind_footer_copy },
    Binding { slot: "social", bind: bind_social },
    Binding { slot: "document_title", bind: bind_document_title },
];

/// Apply every binding in order. Returns what happened to each slot.
pub fn populate(project: &Project, skeleton: &mut Skeleton) -> Vec<(&'static str, Bound)> {
    BINDINGS
        .iter()
        .map(|b| {
            let outcome = (b.bind)(project, skeleton);
            debug!("bind {}: {:?}", b.slot, outcome);
            (b.slot, outcome)
        })
        .collect()
}

fn fill_or_remove<T>(slot: &mut Option<T>, value: Option<T>) -> Bound {
    if slot.is_none() {
        return Bound::Skipped;
    }
    match value {
        Some(v) => {
            *slot = Some(v);
            Bound::Filled
        }
        None => {
            *slot = None;
            Bound::Removed
        }
    }
}

fn bind_title(p: &Project, s: &mut Skeleton) -> Bound {
    let title = present(&p.title).map(|t| Markup::Text(t.to_string()));
    fill_or_remove(&mut s.title, title)
}

fn bind_play_button(p: &Project, s: &mut Skeleton) -> Bound {
    let Some(button) = s.play_button.as_ref() else {
        return Bound::Skipped;
    };
    let link = present(&p.play_link);
    let icon = present(&p.play_icon);
    let text = present(&p.play_text);
    if link.is_none() && icon.is_none() && text.is_none() {
        s.play_button = None;
        return Bound::Removed;
    }
    let updated = PlayButton {
        href: link.map(str::to_string).unwrap_or_else(|| button.href.clone()),
        icon: icon.map(str::to_string).unwrap_or_else(|| button.icon.clone()),
        text: text.map(str::to_string).unwrap_or_else(|| button.text.clone()),
    };
    s.play_button = Some(updated);
    Bound::Filled
}

fn bind_bg_image(p: &Project, s: &mut Skeleton) -> Bound {
    s.bg_image = present(&p.bg_image).map(str::to_string);
    if s.bg_image.is_some() {
        Bound::Filled
    } else {
        Bound::Removed
    }
}

fn bind_type(p: &Project, s: &mut Skeleton) -> Bound {
    let info = match present(&p.type_html) {
        Some(html) => Some(Markup::Html(html.to_string())),
        None => {
            let parts: Vec<String> = [present(&p.kind), present(&p.years)]
                .iter()
                .flatten()
                .map(|part| html_escape(part))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(Markup::Html(parts.join("<br>")))
            }
        }
    };
    fill_or_remove(&mut s.type_info, info)
}

fn non_empty(items: &[String]) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items.to_vec())
    }
}

fn bind_contributions(p: &Project, s: &mut Skeleton) -> Bound {
    fill_or_remove(&mut s.contributions, non_empty(&p.contributions))
}

fn bind_team(p: &Project, s: &mut Skeleton) -> Bound {
    fill_or_remove(&mut s.team, non_empty(&p.team))
}

fn intro_markup(intro: Option<&str>, highlights: &[String]) -> Option<Markup> {
    let text = intro?;
    if highlights.is_empty() {
        Some(Markup::Text(text.to_string()))
    } else {
        Some(Markup::Html(wrap_highlights(text, highlights)))
    }
}

fn gallery_images(sources: &[String], alts: &[Option<String>]) -> Vec<Image> {
    sources
        .iter()
        .enumerate()
        .map(|(i, src)| Image {
            src: src.clone(),
            alt: alts
                .get(i)
                .and_then(present)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Screenshot {}", i + 1)),
        })
        .collect()
}

fn build_section(sec: &Section) -> Option<PictureSection> {
    let gallery = if sec.gallery.is_empty() {
        None
    } else {
        Some(Gallery {
            wide: sec.use_picture_container4,
            images: gallery_images(&sec.gallery, &sec.gallery_alts),
        })
    };
    let section = PictureSection {
        subtitle: present(&sec.subtitle).map(str::to_string),
        intro: intro_markup(present(&sec.intro), &sec.intro_highlights),
        gallery,
    };
    if section.subtitle.is_none() && section.intro.is_none() && section.gallery.is_none() {
        None
    } else {
        Some(section)
    }
}

fn bind_sections(p: &Project, s: &mut Skeleton) -> Bound {
    if s.sections.is_empty() {
        return Bound::Skipped;
    }

    if !p.sections.is_empty() {
        s.sections = p.sections.iter().filter_map(build_section).collect();
        return if s.sections.is_empty() {
            Bound::Removed
        } else {
            Bound::Filled
        };
    }

    // single-section record: reuse the placeholder section
    let placeholder = &mut s.sections[0];
    placeholder.subtitle = None;
    placeholder.intro = intro_markup(present(&p.intro), &p.intro_highlights);
    let wide = placeholder.gallery.as_ref().map(|g| g.wide).unwrap_or(false);
    placeholder.gallery = if p.gallery.is_empty() {
        None
    } else {
        Some(Gallery {
            wide,
            images: gallery_images(&p.gallery, &p.gallery_alts),
        })
    };

    if placeholder.intro.is_none() && placeholder.gallery.is_none() {
        s.sections.remove(0);
        Bound::Removed
    } else {
        Bound::Filled
    }
}

fn bind_tools(p: &Project, s: &mut Skeleton) -> Bound {
    let badges: Vec<ToolBadge> = p
        .tools
        .iter()
        .map(|t| {
            let alt = present(&t.alt).or(present(&t.label)).unwrap_or("");
            let label = present(&t.label).or(present(&t.alt)).unwrap_or("");
            ToolBadge {
                src: t.src.clone().unwrap_or_default(),
                alt: alt.to_string(),
                label: label.to_string(),
            }
        })
        .collect();
    let value = if badges.is_empty() { None } else { Some(badges) };
    fill_or_remove(&mut s.tools, value)
}

fn bind_footer_bg(p: &Project, s: &mut Skeleton) -> Bound {
    s.footer.bg_image = present(&p.footer_bg_image)
        .or(present(&p.bg_image))
        .map(str::to_string);
    if s.footer.bg_image.is_some() {
        Bound::Filled
    } else {
        Bound::Removed
    }
}

fn bind_footer_copy(p: &Project, s: &mut Skeleton) -> Bound {
    let copy = present(&p.footer_copy).map(|c| Markup::Html(c.to_string()));
    fill_or_remove(&mut s.footer.copy, copy)
}

fn bind_social(p: &Project, s: &mut Skeleton) -> Bound {
    let Some(links) = s.footer.social.as_mut() else {
        return Bound::Skipped;
    };
    links.retain_mut(|link| match p.social.get(link.network.key()) {
        Some(url) if !url.is_empty() => {
            link.href = url.clone();
            true
        }
        _ => false,
    });
    if links.is_empty() {
        s.footer.social = None;
        Bound::Removed
    } else {
        Bound::Filled
    }
}

fn bind_document_title(p: &Project, s: &mut Skeleton) -> Bound {
    match present(&p.title) {
        Some(title) => {
            s.document_title = format!("{} - {}", title, s.title_suffix);
            Bound::Filled
        }
        None => Bound::Skipped,
    }
}
