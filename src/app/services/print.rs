//! Print-ready HTML for a rendered [`Presentation`].
//!
//! The document is a single self-contained page: an A4 portrait sheet with a
//! fixed margin, the Europass palette, and no interactive controls. All text
//! is escaped by `maud`.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::render::{
    PhotoSlot, Presentation, SectionBlock, SectionBody, TimelineItem, PHOTO_SIZE_PX,
};
use crate::app::domain::settings::{default_page_margin_mm, EditorSettings};

const DEFAULT_PRIMARY: &str = "#0A53B5";
const DEFAULT_BORDER: &str = "#E5E7EB";

/// Page geometry and colours used for the printed sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub margin_mm: u32,
    pub primary_color: String,
    pub border_color: String,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            margin_mm: default_page_margin_mm(),
            primary_color: DEFAULT_PRIMARY.to_string(),
            border_color: DEFAULT_BORDER.to_string(),
        }
    }
}

impl From<&EditorSettings> for PageSetup {
    fn from(settings: &EditorSettings) -> Self {
        let margin_mm = if settings.margin_in_range() {
            settings.page_margin_mm
        } else {
            default_page_margin_mm()
        };
        Self {
            margin_mm,
            primary_color: sanitize_color(&settings.primary_color, DEFAULT_PRIMARY),
            border_color: sanitize_color(&settings.border_color, DEFAULT_BORDER),
        }
    }
}

/// Only `#rgb` / `#rrggbb` reach the stylesheet.
fn sanitize_color(value: &str, fallback: &str) -> String {
    let valid = value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        value.to_string()
    } else {
        fallback.to_string()
    }
}

fn stylesheet(page: &PageSetup) -> String {
    format!(
        r#"@page {{ size: A4 portrait; margin: {margin}mm; }}
* {{ box-sizing: border-box; }}
body {{ margin: 0; background: #f3f4f6; font-family: Helvetica, Arial, sans-serif; font-size: 12px; line-height: 1.6; color: #111827; }}
.page {{ width: 210mm; min-height: 297mm; margin: 16px auto; padding: 32px; background: #ffffff; border: 1px solid {border}; }}
.header {{ display: flex; gap: 24px; align-items: flex-start; border-bottom: 1px solid {border}; padding-bottom: 16px; }}
.photo {{ width: {photo}px; height: {photo}px; object-fit: cover; border: 1px solid {border}; border-radius: 2px; flex: none; }}
.photo.placeholder {{ background: #F3F4F6; }}
.identity {{ flex: 1; }}
.identity h1 {{ margin: 0; font-size: 24px; font-weight: 600; }}
.identity .title {{ margin: 0; font-size: 14px; color: #374151; }}
.contact {{ margin-top: 8px; display: grid; grid-template-columns: 1fr 1fr; column-gap: 32px; font-size: 11px; color: #374151; }}
section {{ margin-top: 24px; }}
.section-title {{ display: flex; align-items: center; gap: 12px; }}
.section-title .bar {{ width: 4px; height: 20px; background: {primary}; }}
.section-title h2 {{ margin: 0; font-size: 14px; font-weight: 600; text-transform: uppercase; letter-spacing: 0.05em; color: {primary}; }}
.section-body {{ margin-top: 12px; }}
.statement, .description {{ white-space: pre-line; margin: 4px 0 0 0; }}
.timeline {{ display: flex; flex-direction: column; gap: 16px; }}
.item {{ display: grid; grid-template-columns: 140px 1fr; gap: 16px; }}
.when {{ font-size: 11px; color: #374151; }}
.heading {{ font-weight: 600; font-size: 13px; }}
.subheading {{ color: #374151; }}
.rows {{ list-style: none; margin: 0; padding: 0; display: grid; grid-template-columns: 1fr 1fr; column-gap: 32px; }}
.rows li {{ display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid {border}; padding: 4px 0; }}
.slots {{ display: flex; gap: 4px; }}
.slot {{ display: inline-block; width: 12px; height: 12px; border: 1px solid {border}; border-radius: 2px; background: transparent; }}
.slot.filled {{ background: {primary}; }}
.cefr {{ font-weight: 500; color: #1f2937; }}
.links {{ margin: 0; padding-left: 16px; }}
.links .label {{ font-weight: 500; }}
.links .url {{ color: #1d4ed8; }}
@media print {{
  body {{ background: #ffffff; }}
  .page {{ width: auto; min-height: 0; margin: 0; padding: 0; border: none; }}
}}
"#,
        margin = page.margin_mm,
        border = page.border_color,
        primary = page.primary_color,
        photo = PHOTO_SIZE_PX,
    )
}

fn photo(slot: &PhotoSlot) -> Markup {
    match slot {
        PhotoSlot::Image { src } => html! {
            img class="photo" src=(src) alt="Profile photo";
        },
        PhotoSlot::Placeholder => html! {
            div class="photo placeholder" aria-hidden="true" {}
        },
    }
}

fn timeline(items: &[TimelineItem]) -> Markup {
    html! {
        div class="timeline" {
            @for item in items {
                div class="item" {
                    div class="when" {
                        div { (item.period) }
                        @if let Some(locality) = &item.locality {
                            div { (locality) }
                        }
                    }
                    div {
                        div class="heading" { (item.heading) }
                        div class="subheading" { (item.subheading) }
                        @if let Some(description) = &item.description {
                            p class="description" { (description) }
                        }
                    }
                }
            }
        }
    }
}

fn section(block: &SectionBlock) -> Markup {
    html! {
        section {
            div class="section-title" {
                div class="bar" aria-hidden="true" {}
                h2 { (block.title()) }
            }
            div class="section-body" {
                @match &block.body {
                    SectionBody::Statement(text) => {
                        p class="statement" { (text) }
                    }
                    SectionBody::Timeline(items) => {
                        (timeline(items))
                    }
                    SectionBody::Skills(rows) => {
                        ul class="rows" {
                            @for row in rows {
                                li {
                                    span { (row.name) }
                                    div class="slots" aria-label=(row.aria_label()) {
                                        @for filled in row.slots {
                                            span class=(if filled { "slot filled" } else { "slot" }) aria-hidden="true" {}
                                        }
                                    }
                                }
                            }
                        }
                    }
                    SectionBody::Languages(rows) => {
                        ul class="rows" {
                            @for row in rows {
                                li {
                                    span { (row.name) }
                                    span class="cefr" { (row.cefr) }
                                }
                            }
                        }
                    }
                    SectionBody::Links(rows) => {
                        ul class="links" {
                            @for row in rows {
                                li {
                                    span class="label" { (row.label) ":" }
                                    " "
                                    span class="url" { (row.url) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Standalone HTML document for printing or PDF export.
pub fn to_html(presentation: &Presentation, page: &PageSetup) -> String {
    let header = &presentation.header;
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (header.full_name) " - Resume" }
                style { (PreEscaped(stylesheet(page))) }
            }
            body {
                main id="resume-preview" class="page" {
                    header class="header" {
                        (photo(&header.photo))
                        div class="identity" {
                            h1 { (header.full_name) }
                            p class="title" { (header.title) }
                            div class="contact" {
                                div {
                                    div { (header.address) }
                                    div { (header.locality) }
                                }
                                div {
                                    div { (header.email) }
                                    div { (header.phone) }
                                }
                            }
                        }
                    }
                    @for block in &presentation.sections {
                        (section(block))
                    }
                }
            }
        }
    };
    markup.into_string()
}
