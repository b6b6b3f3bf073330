//! The résumé document model.
//!
//! A [`ResumeData`] value is one immutable snapshot of the whole document.
//! Edits never mutate a snapshot in place: they build the next one, sharing
//! every untouched branch (`Arc`) with the previous snapshot.

use std::fmt;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::entry::{apply, Entry, EntryId};

/// Lowest and highest skill level the editor accepts.
pub const SKILL_LEVEL_MIN: i32 = 1;
pub const SKILL_LEVEL_MAX: i32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Editable fields of [`Personal`], one per form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FirstName,
    LastName,
    Title,
    Email,
    Phone,
    Address,
    City,
    Country,
    Summary,
    PhotoUrl,
}

impl Personal {
    /// Copy of `self` with one field replaced.
    pub fn with_field(&self, field: PersonalField, value: String) -> Personal {
        let mut next = self.clone();
        match field {
            PersonalField::FirstName => next.first_name = value,
            PersonalField::LastName => next.last_name = value,
            PersonalField::Title => next.title = value,
            PersonalField::Email => next.email = value,
            PersonalField::Phone => next.phone = value,
            PersonalField::Address => next.address = value,
            PersonalField::City => next.city = value,
            PersonalField::Country => next.country = value,
            PersonalField::Summary => next.summary = value,
            PersonalField::PhotoUrl => next.photo_url = Some(value),
        }
        next
    }

    /// The photo reference, if one is set and non-empty.
    pub fn photo(&self) -> Option<&str> {
        self.photo_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    /// "YYYY" or "YYYY-MM"
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPatch {
    pub role: Option<String>,
    pub employer: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl WorkPatch {
    /// Turning `current` on clears the end date in the same edit.
    pub fn normalized(mut self) -> Self {
        if self.current == Some(true) {
            self.end = Some(String::new());
        }
        self
    }
}

impl Entry for WorkEntry {
    type Patch = WorkPatch;

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            role: String::new(),
            employer: String::new(),
            city: String::new(),
            country: String::new(),
            start: String::new(),
            end: String::new(),
            current: false,
            description: String::new(),
        }
    }

    fn merge(mut self, patch: WorkPatch) -> Self {
        apply(&mut self.role, patch.role);
        apply(&mut self.employer, patch.employer);
        apply(&mut self.city, patch.city);
        apply(&mut self.country, patch.country);
        apply(&mut self.start, patch.start);
        apply(&mut self.end, patch.end);
        apply(&mut self.current, patch.current);
        apply(&mut self.description, patch.description);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationPatch {
    pub program: Option<String>,
    pub institution: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
}

impl Entry for EducationEntry {
    type Patch = EducationPatch;

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            program: String::new(),
            institution: String::new(),
            city: String::new(),
            country: String::new(),
            start: String::new(),
            end: String::new(),
            description: String::new(),
        }
    }

    fn merge(mut self, patch: EducationPatch) -> Self {
        apply(&mut self.program, patch.program);
        apply(&mut self.institution, patch.institution);
        apply(&mut self.city, patch.city);
        apply(&mut self.country, patch.country);
        apply(&mut self.start, patch.start);
        apply(&mut self.end, patch.end);
        apply(&mut self.description, patch.description);
        self
    }
}

fn default_skill_level() -> i32 {
    3
}

/// Accepts whole numbers in any JSON number form (`4`, `4.0`); `null` means
/// the default level.
fn deserialize_skill_level<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(default_skill_level()),
        Some(Value::Number(number)) => number,
        Some(other) => {
            return Err(D::Error::custom(format!(
                "skill level must be a number, found {}",
                other
            )));
        }
    };

    if let Some(level) = number.as_i64() {
        return i32::try_from(level).map_err(D::Error::custom);
    }
    match number.as_f64() {
        Some(level)
            if level.fract() == 0.0
                && level >= f64::from(i32::MIN)
                && level <= f64::from(i32::MAX) =>
        {
            Ok(level as i32)
        }
        _ => Err(D::Error::custom(format!(
            "skill level must be a whole number, found {}",
            number
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    /// 1..=5 when entered through the editor; imported documents may carry
    /// anything.
    #[serde(
        default = "default_skill_level",
        deserialize_with = "deserialize_skill_level"
    )]
    pub level: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<i32>,
}

impl SkillPatch {
    /// Clamp the level into the accepted range.
    pub fn normalized(mut self) -> Self {
        self.level = self
            .level
            .map(|level| level.clamp(SKILL_LEVEL_MIN, SKILL_LEVEL_MAX));
        self
    }
}

impl Entry for SkillEntry {
    type Patch = SkillPatch;

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            level: default_skill_level(),
        }
    }

    fn merge(mut self, patch: SkillPatch) -> Self {
        apply(&mut self.name, patch.name);
        apply(&mut self.level, patch.level);
        self
    }
}

/// CEFR proficiency scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum CefrLevel {
    A1,
    A2,
    #[default]
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cefr: CefrLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub cefr: Option<CefrLevel>,
}

impl Entry for LanguageEntry {
    type Patch = LanguagePatch;

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            cefr: CefrLevel::B1,
        }
    }

    fn merge(mut self, patch: LanguagePatch) -> Self {
        apply(&mut self.name, patch.name);
        apply(&mut self.cefr, patch.cefr);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(default = "EntryId::generate")]
    pub id: EntryId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkPatch {
    pub label: Option<String>,
    pub url: Option<String>,
}

impl Entry for LinkEntry {
    type Patch = LinkPatch;

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            label: String::new(),
            url: String::new(),
        }
    }

    fn merge(mut self, patch: LinkPatch) -> Self {
        apply(&mut self.label, patch.label);
        apply(&mut self.url, patch.url);
        self
    }
}

/// Aggregate root. Missing top-level keys on input fall back to the
/// default document; present ones replace the default branch wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub personal: Arc<Personal>,
    pub work: Arc<[WorkEntry]>,
    pub education: Arc<[EducationEntry]>,
    pub skills: Arc<[SkillEntry]>,
    pub languages: Arc<[LanguageEntry]>,
    pub links: Arc<[LinkEntry]>,
}

impl ResumeData {
    pub fn with_personal(&self, personal: Personal) -> ResumeData {
        ResumeData {
            personal: Arc::new(personal),
            ..self.clone()
        }
    }

    pub fn with_work(&self, work: Arc<[WorkEntry]>) -> ResumeData {
        ResumeData {
            work,
            ..self.clone()
        }
    }

    pub fn with_education(&self, education: Arc<[EducationEntry]>) -> ResumeData {
        ResumeData {
            education,
            ..self.clone()
        }
    }

    pub fn with_skills(&self, skills: Arc<[SkillEntry]>) -> ResumeData {
        ResumeData {
            skills,
            ..self.clone()
        }
    }

    pub fn with_languages(&self, languages: Arc<[LanguageEntry]>) -> ResumeData {
        ResumeData {
            languages,
            ..self.clone()
        }
    }

    pub fn with_links(&self, links: Arc<[LinkEntry]>) -> ResumeData {
        ResumeData {
            links,
            ..self.clone()
        }
    }
}

impl Default for ResumeData {
    fn default() -> Self {
        default_resume()
    }
}

/// The sample document shown on first launch.
pub fn default_resume() -> ResumeData {
    let personal = Personal {
        first_name: "Alex".to_string(),
        last_name: "Doe".to_string(),
        title: "Product Designer".to_string(),
        email: "alex.doe@example.com".to_string(),
        phone: "+1 555 123 4567".to_string(),
        address: "123 Main St".to_string(),
        city: "Berlin".to_string(),
        country: "Germany".to_string(),
        summary: "User-centered designer with 6+ years of experience in multi-platform products. \
                  Passionate about accessibility and elegant systems."
            .to_string(),
        photo_url: Some(String::new()),
    };

    let work = vec![
        WorkEntry {
            id: "w1".into(),
            role: "Senior Product Designer".to_string(),
            employer: "Acme Inc.".to_string(),
            city: "Berlin".to_string(),
            country: "Germany".to_string(),
            start: "2022-02".to_string(),
            end: String::new(),
            current: true,
            description: "Lead end-to-end product design for a B2B analytics platform. \
                          Collaborated with PM and Eng, grew adoption by 35%."
                .to_string(),
        },
        WorkEntry {
            id: "w2".into(),
            role: "Product Designer".to_string(),
            employer: "Globex".to_string(),
            city: "Munich".to_string(),
            country: "Germany".to_string(),
            start: "2019-01".to_string(),
            end: "2022-01".to_string(),
            current: false,
            description: "Owned mobile design system, improved task success rate by 20%."
                .to_string(),
        },
    ];

    let education = vec![EducationEntry {
        id: "e1".into(),
        program: "B.Sc. Human-Computer Interaction".to_string(),
        institution: "Technical University".to_string(),
        city: "Munich".to_string(),
        country: "Germany".to_string(),
        start: "2014".to_string(),
        end: "2018".to_string(),
        description: "Graduated with honors. Focus on UX research and interaction design."
            .to_string(),
    }];

    let skills = vec![
        SkillEntry {
            id: "s1".into(),
            name: "Figma".to_string(),
            level: 5,
        },
        SkillEntry {
            id: "s2".into(),
            name: "Prototyping".to_string(),
            level: 4,
        },
        SkillEntry {
            id: "s3".into(),
            name: "Accessibility (WCAG)".to_string(),
            level: 4,
        },
    ];

    let languages = vec![
        LanguageEntry {
            id: "l1".into(),
            name: "English".to_string(),
            cefr: CefrLevel::C1,
        },
        LanguageEntry {
            id: "l2".into(),
            name: "German".to_string(),
            cefr: CefrLevel::B2,
        },
    ];

    let links = vec![
        LinkEntry {
            id: "u1".into(),
            label: "Portfolio".to_string(),
            url: "https://alexdoe.design".to_string(),
        },
        LinkEntry {
            id: "u2".into(),
            label: "LinkedIn".to_string(),
            url: "https://linkedin.com/in/alexdoe".to_string(),
        },
    ];

    ResumeData {
        personal: Arc::new(personal),
        work: work.into(),
        education: education.into(),
        skills: skills.into(),
        languages: languages.into(),
        links: links.into(),
    }
}
