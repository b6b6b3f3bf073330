use serde::{Deserialize, Serialize};

/// The editing sections shown as tabs above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Personal,
    Work,
    Education,
    Skills,
    Languages,
    Links,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Personal,
        Section::Work,
        Section::Education,
        Section::Skills,
        Section::Languages,
        Section::Links,
    ];

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Section::Personal => "Personal",
            Section::Work => "Work",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Languages => "Languages",
            Section::Links => "Links",
        }
    }
}

/// Sections whose content is an ordered list of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListSection {
    Work,
    Education,
    Skills,
    Languages,
    Links,
}

impl ListSection {
    pub fn section(&self) -> Section {
        match self {
            ListSection::Work => Section::Work,
            ListSection::Education => Section::Education,
            ListSection::Skills => Section::Skills,
            ListSection::Languages => Section::Languages,
            ListSection::Links => Section::Links,
        }
    }
}

/// Which section the form currently shows. Any section can be selected from
/// any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionNavigator {
    active: Section,
}

impl SectionNavigator {
    pub fn new(active: Section) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn select(&mut self, section: Section) {
        self.active = section;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_starts_on_personal() {
        let nav = SectionNavigator::default();
        assert_eq!(nav.active(), Section::Personal);
    }

    #[test]
    fn test_every_section_reachable_from_every_other() {
        for from in Section::ALL {
            for to in Section::ALL {
                let mut nav = SectionNavigator::new(from);
                nav.select(to);
                assert_eq!(nav.active(), to);
            }
        }
    }

    #[test]
    fn test_every_list_has_its_own_tab() {
        let lists = [
            ListSection::Work,
            ListSection::Education,
            ListSection::Skills,
            ListSection::Languages,
            ListSection::Links,
        ];
        let tabs: Vec<Section> = lists.iter().map(ListSection::section).collect();
        assert_eq!(tabs, Section::ALL[1..].to_vec());
    }

    #[test]
    fn test_section_serialization() {
        assert_eq!(serde_json::to_string(&Section::Languages).unwrap(), "\"languages\"");
        let parsed: Section = serde_json::from_str("\"work\"").unwrap();
        assert_eq!(parsed, Section::Work);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Section::Education.label(), "Education");
    }
}
