//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The résumé document and its list entries
//! - Section navigation state
//! - Editor settings
//! - Message types for the event system

pub mod entry;
pub mod messages;
pub mod resume;
pub mod section;
pub mod settings;

pub use entry::{Direction, Entry, EntryId};
pub use messages::Message;
pub use resume::{
    default_resume, CefrLevel, EducationEntry, EducationPatch, LanguageEntry, LanguagePatch,
    LinkEntry, LinkPatch, Personal, PersonalField, ResumeData, SkillEntry, SkillPatch, WorkEntry,
    WorkPatch,
};
pub use section::{ListSection, Section, SectionNavigator};
pub use settings::EditorSettings;
