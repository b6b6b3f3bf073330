use super::entry::{Direction, EntryId};
use super::resume::{
    CefrLevel, EducationPatch, LanguagePatch, LinkPatch, PersonalField, SkillPatch, WorkPatch,
};
use super::section::{ListSection, Section};

/// Every user event the form can produce.
/// The front-end sends one of these per input; `AppState::dispatch` handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    SelectSection(Section),

    // Personal
    EditPersonal(PersonalField, String),

    // Lists
    AddEntry(ListSection),
    RemoveEntry(ListSection, EntryId),
    MoveEntry(ListSection, EntryId, Direction),
    UpdateWork(EntryId, WorkPatch),
    SetWorkCurrent(EntryId, bool),
    UpdateEducation(EntryId, EducationPatch),
    UpdateSkill(EntryId, SkillPatch),
    SetSkillLevel(EntryId, i32),
    UpdateLanguage(EntryId, LanguagePatch),
    SetLanguageLevel(EntryId, CefrLevel),
    UpdateLink(EntryId, LinkPatch),

    // File
    ImportJson(Vec<u8>),
    ImportFile,
    ExportJson,
    PrintPreview,
}

impl Message {
    /// Whether handling this message may produce a new document snapshot.
    pub fn edits_document(&self) -> bool {
        !matches!(
            self,
            Message::SelectSection(_) | Message::ExportJson | Message::PrintPreview
        )
    }

    /// Short form for logs. Import payloads are reduced to their size.
    pub fn describe(&self) -> String {
        match self {
            Message::ImportJson(bytes) => format!("ImportJson({} bytes)", bytes.len()),
            other => format!("{:?}", other),
        }
    }
}
