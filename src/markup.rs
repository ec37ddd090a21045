// Overlay markup for the journey sections and which cards show at a given
// scroll position. Pure string building so it can be tested on the host.

use skyline_core::{ContentItem, Link, Panel, SceneConfig, SectionLayout, SectionState};

pub const CONTACT_HEADING: &str = "Let's Connect";
pub const CONTACT_TAGLINE: &str = "The journey's end is a new beginning.";
pub const SCROLL_HINT: &str = "Scroll to begin";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only web, mail and same-site links are rendered as given; anything else
/// (e.g. `javascript:`) becomes `#`.
pub fn safe_href(url: &str) -> String {
    let u = url.trim();
    let lower = u.to_ascii_lowercase();
    let allowed = lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || (u.starts_with('/') && !u.starts_with("//"))
        || u.starts_with('#');
    if allowed {
        escape_html(u)
    } else {
        "#".to_string()
    }
}

pub fn intro_id() -> String {
    "section-intro".to_string()
}

pub fn panel_id(index: usize) -> String {
    format!("section-panel-{index}")
}

pub fn item_id(index: usize) -> String {
    format!("section-item-{index}")
}

pub fn contact_id() -> String {
    "section-contact".to_string()
}

fn link_html(link: &Link, class: &str) -> String {
    let href = safe_href(&link.url);
    let external = if href.starts_with("mailto:") || href.starts_with('/') || href == "#" {
        ""
    } else {
        r#" target="_blank" rel="noopener noreferrer""#
    };
    format!(
        r#"<a class="{class}" href="{href}"{external}>{}</a>"#,
        escape_html(&link.label)
    )
}

pub fn intro_html(headline: &str, tagline: &str) -> String {
    format!(
        r#"<section class="journey-section"><div id="{}" class="card intro"><h1>{}</h1><p>{}</p><span class="scroll-hint">{SCROLL_HINT}</span></div></section>"#,
        intro_id(),
        escape_html(headline),
        escape_html(tagline),
    )
}

pub fn panel_html(index: usize, panel: &Panel) -> String {
    let body: String = panel
        .body
        .iter()
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect();
    format!(
        r#"<section class="journey-section"><div id="{}" class="card panel"><h2>{}</h2>{body}</div></section>"#,
        panel_id(index),
        escape_html(&panel.title),
    )
}

pub fn item_html(index: usize, item: &ContentItem) -> String {
    let links: String = item
        .links
        .iter()
        .map(|l| link_html(l, "item-link"))
        .collect();
    format!(
        r#"<section class="journey-section"><div id="{}" class="card item"><h2>{}</h2><p>{}</p><div class="links">{links}</div></div></section>"#,
        item_id(index),
        escape_html(&item.title),
        escape_html(&item.description),
    )
}

pub fn contact_html(links: &[Link]) -> String {
    let links: String = links.iter().map(|l| link_html(l, "contact-link")).collect();
    format!(
        r#"<section class="journey-section"><div id="{}" class="card contact"><h2>{CONTACT_HEADING}</h2><p>{CONTACT_TAGLINE}</p><div class="links">{links}</div></div></section>"#,
        contact_id(),
    )
}

/// Every section card in scroll order.
pub fn sections_html(config: &SceneConfig) -> String {
    let mut html = intro_html(&config.headline, &config.tagline);
    for (i, panel) in config.panels.iter().enumerate() {
        html.push_str(&panel_html(i, panel));
    }
    for (i, item) in config.items.iter().enumerate() {
        html.push_str(&item_html(i, item));
    }
    html.push_str(&contact_html(&config.contact));
    html
}

/// `(card id, visible)` for every card, in scroll order. The contact card is
/// always shown.
pub fn card_visibility(layout: &SectionLayout, state: &SectionState) -> Vec<(String, bool)> {
    let mut cards = Vec::with_capacity(layout.band_count());
    cards.push((intro_id(), state.show_intro));
    for k in 0..layout.lead_panels() {
        cards.push((panel_id(k), layout.panel_visible(k, state.progress)));
    }
    for k in 0..layout.content_count() {
        cards.push((item_id(k), state.active == Some(k)));
    }
    cards.push((contact_id(), true));
    cards
}

/// Text of the weather badge.
pub fn weather_badge_text(temperature: f32, condition: &str, description: &str) -> String {
    let head = format!("{:.0}°C · {}", temperature, condition.trim());
    if description.trim().is_empty() {
        head
    } else {
        format!("{head} · {}", description.trim())
    }
}
