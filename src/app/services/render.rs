//! Document → presentation tree.
//!
//! [`render`] is pure: it decides what the preview shows (which sections,
//! in which order, with which formatted text) and leaves markup to
//! [`super::print`].

use serde::Serialize;

use super::format::{format_duration, format_range, join_locality, skill_slots, SKILL_SLOTS};
use crate::app::domain::resume::ResumeData;

/// Edge length of the square photo slot, in CSS pixels. The placeholder
/// uses the same size so the header never shifts.
pub const PHOTO_SIZE_PX: u32 = 80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub header: Header,
    /// Visible sections only, in print order.
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub full_name: String,
    pub title: String,
    pub address: String,
    pub locality: String,
    pub email: String,
    pub phone: String,
    pub photo: PhotoSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PhotoSlot {
    Image { src: String },
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PreviewSection {
    Statement,
    Work,
    Education,
    Skills,
    Languages,
    Links,
}

impl PreviewSection {
    pub fn title(&self) -> &'static str {
        match self {
            PreviewSection::Statement => "Personal statement",
            PreviewSection::Work => "Work experience",
            PreviewSection::Education => "Education and training",
            PreviewSection::Skills => "Skills",
            PreviewSection::Languages => "Languages",
            PreviewSection::Links => "Links",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub kind: PreviewSection,
    pub body: SectionBody,
}

impl SectionBlock {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SectionBody {
    Statement(String),
    Timeline(Vec<TimelineItem>),
    Skills(Vec<SkillRow>),
    Languages(Vec<LanguageRow>),
    Links(Vec<LinkRow>),
}

/// One work or education entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineItem {
    pub period: String,
    pub locality: Option<String>,
    /// Role or programme
    pub heading: String,
    /// Employer or institution
    pub subheading: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    pub name: String,
    pub level: i32,
    pub slots: [bool; SKILL_SLOTS],
}

impl SkillRow {
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|filled| **filled).count()
    }

    /// Accessible description of the indicator row.
    pub fn aria_label(&self) -> String {
        format!("Skill level {} out of {}", self.level, SKILL_SLOTS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageRow {
    pub name: String,
    pub cefr: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRow {
    pub label: String,
    pub url: String,
}

impl Presentation {
    pub fn section(&self, kind: PreviewSection) -> Option<&SectionBlock> {
        self.sections.iter().find(|block| block.kind == kind)
    }

    pub fn is_visible(&self, kind: PreviewSection) -> bool {
        self.section(kind).is_some()
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

pub fn render(data: &ResumeData) -> Presentation {
    let personal = &data.personal;

    let header = Header {
        full_name: format!("{} {}", personal.first_name, personal.last_name)
            .trim()
            .to_string(),
        title: personal.title.clone(),
        address: personal.address.clone(),
        locality: join_locality(&personal.city, &personal.country),
        email: personal.email.clone(),
        phone: personal.phone.clone(),
        photo: match personal.photo() {
            Some(src) => PhotoSlot::Image {
                src: src.to_string(),
            },
            None => PhotoSlot::Placeholder,
        },
    };

    let mut sections = Vec::new();

    if !personal.summary.trim().is_empty() {
        sections.push(SectionBlock {
            kind: PreviewSection::Statement,
            body: SectionBody::Statement(personal.summary.clone()),
        });
    }

    if !data.work.is_empty() {
        let items = data
            .work
            .iter()
            .map(|w| TimelineItem {
                period: format_duration(&w.start, &w.end, w.current),
                locality: non_empty(&join_locality(&w.city, &w.country)),
                heading: w.role.clone(),
                subheading: w.employer.clone(),
                description: non_empty(&w.description),
            })
            .collect();
        sections.push(SectionBlock {
            kind: PreviewSection::Work,
            body: SectionBody::Timeline(items),
        });
    }

    if !data.education.is_empty() {
        let items = data
            .education
            .iter()
            .map(|ed| TimelineItem {
                period: format_range(&ed.start, &ed.end),
                locality: non_empty(&join_locality(&ed.city, &ed.country)),
                heading: ed.program.clone(),
                subheading: ed.institution.clone(),
                description: non_empty(&ed.description),
            })
            .collect();
        sections.push(SectionBlock {
            kind: PreviewSection::Education,
            body: SectionBody::Timeline(items),
        });
    }

    if !data.skills.is_empty() {
        let rows = data
            .skills
            .iter()
            .map(|sk| SkillRow {
                name: sk.name.clone(),
                level: sk.level,
                slots: skill_slots(sk.level),
            })
            .collect();
        sections.push(SectionBlock {
            kind: PreviewSection::Skills,
            body: SectionBody::Skills(rows),
        });
    }

    if !data.languages.is_empty() {
        let rows = data
            .languages
            .iter()
            .map(|la| LanguageRow {
                name: la.name.clone(),
                cefr: la.cefr.code(),
            })
            .collect();
        sections.push(SectionBlock {
            kind: PreviewSection::Languages,
            body: SectionBody::Languages(rows),
        });
    }

    if !data.links.is_empty() {
        let rows = data
            .links
            .iter()
            .map(|li| LinkRow {
                label: li.label.clone(),
                url: li.url.clone(),
            })
            .collect();
        sections.push(SectionBlock {
            kind: PreviewSection::Links,
            body: SectionBody::Links(rows),
        });
    }

    Presentation { header, sections }
}
