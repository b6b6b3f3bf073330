use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::controllers::import::{ImportController, ImportTicket};
use super::controllers::preview::PreviewController;
use super::domain::entry::{Direction, Entry, EntryId};
use super::domain::messages::Message;
use super::domain::resume::{
    default_resume, LanguagePatch, ResumeData, SkillPatch, WorkPatch,
};
use super::domain::section::{ListSection, Section, SectionNavigator};
use super::domain::settings::EditorSettings;
use super::infrastructure::error::Result;
use super::infrastructure::store::{DocumentStore, LocalStore};
use super::infrastructure::transfer::{DirectoryTransfer, FileTransfer};
use super::services::list_editor;
use super::services::persistence::{deserialize, serialize, EXPORT_FILE_NAME};
use super::services::print::PageSetup;

/// Main application coordinator.
///
/// Owns the current document snapshot and everything derived from it. Every
/// user event goes through [`AppState::dispatch`]; an event that changes the
/// document swaps in a new snapshot, re-renders the preview and auto-saves.
pub struct AppState {
    document: Arc<ResumeData>,
    navigator: SectionNavigator,
    settings: EditorSettings,
    preview: PreviewController,
    imports: ImportController,
    store: Box<dyn DocumentStore>,
    transfer: Box<dyn FileTransfer>,
}

fn appended<T: Entry>(list: &Arc<[T]>) -> (Arc<[T]>, EntryId) {
    let next = list_editor::add_blank(list);
    let id = next[next.len() - 1].id().clone();
    (next, id)
}

impl AppState {
    pub fn new(
        store: Box<dyn DocumentStore>,
        transfer: Box<dyn FileTransfer>,
        settings: EditorSettings,
    ) -> Self {
        let document = match store.load() {
            Some(bytes) => match deserialize(&bytes) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable saved document: {}", e);
                    default_resume()
                }
            },
            None => default_resume(),
        };

        let preview = PreviewController::new(&document, &PageSetup::from(&settings));

        Self {
            document: Arc::new(document),
            navigator: SectionNavigator::new(settings.last_section),
            settings,
            preview,
            imports: ImportController::new(),
            store,
            transfer,
        }
    }

    /// Document in the platform data directory, exports to the last export
    /// directory (or Downloads).
    pub fn with_local_storage(settings: EditorSettings) -> Self {
        let transfer = match &settings.last_export_directory {
            Some(dir) => DirectoryTransfer::new(dir),
            None => DirectoryTransfer::downloads(),
        };
        Self::new(
            Box::new(LocalStore::default_location()),
            Box::new(transfer),
            settings,
        )
    }

    /// The current snapshot. Cloning the `Arc` is how a caller keeps it.
    pub fn document(&self) -> &Arc<ResumeData> {
        &self.document
    }

    pub fn active_section(&self) -> Section {
        self.navigator.active()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Replace the settings; the preview picks up page changes immediately.
    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.settings = settings;
        self.preview
            .refresh(&self.document, &PageSetup::from(&self.settings));
    }

    pub fn preview(&self) -> &PreviewController {
        &self.preview
    }

    pub fn import_pending(&self) -> bool {
        self.imports.is_pending()
    }

    pub fn dispatch(&mut self, message: Message) -> Result<()> {
        tracing::debug!(
            message = %message.describe(),
            edits = message.edits_document(),
            "dispatch"
        );
        let doc = Arc::clone(&self.document);

        match message {
            Message::SelectSection(section) => {
                self.navigator.select(section);
                self.settings.last_section = section;
            }
            Message::EditPersonal(field, value) => {
                self.commit(doc.with_personal(doc.personal.with_field(field, value)));
            }
            Message::AddEntry(list) => {
                self.add_entry(list);
            }
            Message::RemoveEntry(list, id) => {
                let next = match list {
                    ListSection::Work => doc.with_work(list_editor::remove(&doc.work, &id)),
                    ListSection::Education => {
                        doc.with_education(list_editor::remove(&doc.education, &id))
                    }
                    ListSection::Skills => doc.with_skills(list_editor::remove(&doc.skills, &id)),
                    ListSection::Languages => {
                        doc.with_languages(list_editor::remove(&doc.languages, &id))
                    }
                    ListSection::Links => doc.with_links(list_editor::remove(&doc.links, &id)),
                };
                self.commit(next);
            }
            Message::MoveEntry(list, id, direction) => {
                self.commit(Self::moved(&doc, list, &id, direction));
            }
            Message::UpdateWork(id, patch) => {
                self.commit(doc.with_work(list_editor::update(&doc.work, &id, patch.normalized())));
            }
            Message::SetWorkCurrent(id, current) => {
                let patch = WorkPatch {
                    current: Some(current),
                    ..Default::default()
                };
                self.commit(doc.with_work(list_editor::update(&doc.work, &id, patch.normalized())));
            }
            Message::UpdateEducation(id, patch) => {
                self.commit(doc.with_education(list_editor::update(&doc.education, &id, patch)));
            }
            Message::UpdateSkill(id, patch) => {
                self.commit(doc.with_skills(list_editor::update(&doc.skills, &id, patch.normalized())));
            }
            Message::SetSkillLevel(id, level) => {
                let patch = SkillPatch {
                    level: Some(level),
                    ..Default::default()
                };
                self.commit(doc.with_skills(list_editor::update(&doc.skills, &id, patch.normalized())));
            }
            Message::UpdateLanguage(id, patch) => {
                self.commit(doc.with_languages(list_editor::update(&doc.languages, &id, patch)));
            }
            Message::SetLanguageLevel(id, cefr) => {
                let patch = LanguagePatch {
                    cefr: Some(cefr),
                    ..Default::default()
                };
                self.commit(doc.with_languages(list_editor::update(&doc.languages, &id, patch)));
            }
            Message::UpdateLink(id, patch) => {
                self.commit(doc.with_links(list_editor::update(&doc.links, &id, patch)));
            }
            Message::ImportJson(bytes) => {
                let ticket = self.begin_import()?;
                self.complete_import(ticket, &bytes)?;
            }
            Message::ImportFile => {
                let ticket = self.begin_import()?;
                match self.transfer.prompt_file() {
                    Ok(Some(bytes)) => self.complete_import(ticket, &bytes)?,
                    Ok(None) => self.cancel_import(ticket),
                    Err(e) => {
                        self.cancel_import(ticket);
                        return Err(e);
                    }
                }
            }
            Message::ExportJson => self.export_json()?,
            Message::PrintPreview => {
                self.print_preview()?;
            }
        }

        Ok(())
    }

    /// Append a blank entry to `list`, show that list's tab and return the
    /// new id.
    pub fn add_entry(&mut self, list: ListSection) -> EntryId {
        self.navigator.select(list.section());
        self.settings.last_section = list.section();
        let doc = Arc::clone(&self.document);
        let (next, id) = match list {
            ListSection::Work => {
                let (work, id) = appended(&doc.work);
                (doc.with_work(work), id)
            }
            ListSection::Education => {
                let (education, id) = appended(&doc.education);
                (doc.with_education(education), id)
            }
            ListSection::Skills => {
                let (skills, id) = appended(&doc.skills);
                (doc.with_skills(skills), id)
            }
            ListSection::Languages => {
                let (languages, id) = appended(&doc.languages);
                (doc.with_languages(languages), id)
            }
            ListSection::Links => {
                let (links, id) = appended(&doc.links);
                (doc.with_links(links), id)
            }
        };
        self.commit(next);
        id
    }

    fn moved(doc: &ResumeData, list: ListSection, id: &EntryId, direction: Direction) -> ResumeData {
        match list {
            ListSection::Work => doc.with_work(list_editor::move_entry(&doc.work, id, direction)),
            ListSection::Education => {
                doc.with_education(list_editor::move_entry(&doc.education, id, direction))
            }
            ListSection::Skills => {
                doc.with_skills(list_editor::move_entry(&doc.skills, id, direction))
            }
            ListSection::Languages => {
                doc.with_languages(list_editor::move_entry(&doc.languages, id, direction))
            }
            ListSection::Links => {
                doc.with_links(list_editor::move_entry(&doc.links, id, direction))
            }
        }
    }

    /// Reserve the import slot. Fails while another import is in flight.
    pub fn begin_import(&mut self) -> Result<ImportTicket> {
        self.imports.begin()
    }

    /// Finish an import with the bytes of the chosen file. On any error the
    /// current document is left untouched.
    pub fn complete_import(&mut self, ticket: ImportTicket, bytes: &[u8]) -> Result<()> {
        self.imports.finish(ticket)?;
        match deserialize(bytes) {
            Ok(document) => {
                tracing::info!("Imported document ({} bytes)", bytes.len());
                self.commit(document);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Import rejected: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn cancel_import(&mut self, ticket: ImportTicket) {
        if self.imports.finish(ticket).is_err() {
            tracing::debug!("Cancelled an import that was no longer pending");
        }
    }

    /// Hand `resume.json` to the file transfer and remember the directory
    /// it was written to.
    pub fn export_json(&mut self) -> Result<()> {
        let bytes = serialize(&self.document)?;
        let target = self.transfer.trigger_download(&bytes, EXPORT_FILE_NAME)?;
        if let Some(dir) = target.as_deref().and_then(Path::parent) {
            self.settings.last_export_directory = Some(dir.to_string_lossy().into_owned());
        }
        Ok(())
    }

    /// Write the printable page and open it if the settings say so.
    pub fn print_preview(&self) -> Result<PathBuf> {
        self.preview.print(self.settings.open_preview_after_print)
    }

    /// Swap in the next snapshot. Identical snapshots are ignored.
    fn commit(&mut self, next: ResumeData) {
        if next == *self.document {
            return;
        }
        self.document = Arc::new(next);
        self.preview
            .refresh(&self.document, &PageSetup::from(&self.settings));
        if self.settings.auto_save_enabled {
            self.auto_save();
        }
    }

    /// Persist the current snapshot. Failures are logged and otherwise
    /// ignored; the in-memory document stays authoritative.
    fn auto_save(&mut self) {
        let bytes = match serialize(&self.document) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to encode document for auto-save: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&bytes) {
            tracing::warn!("Auto-save failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::resume::{CefrLevel, LinkPatch, PersonalField};
    use crate::app::infrastructure::error::AppError;
    use crate::app::infrastructure::store::MemoryStore;
    use crate::app::services::render::PreviewSection;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct RecordingStore {
        initial: Option<Vec<u8>>,
        saves: Rc<RefCell<Vec<Vec<u8>>>>,
        fail: bool,
    }

    impl DocumentStore for RecordingStore {
        fn load(&self) -> Option<Vec<u8>> {
            self.initial.clone()
        }

        fn save(&mut self, bytes: &[u8]) -> Result<()> {
            if self.fail {
                return Err(std::io::Error::other("quota exceeded").into());
            }
            self.saves.borrow_mut().push(bytes.to_vec());
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct RecordingTransfer {
        next_file: Rc<RefCell<Option<Vec<u8>>>>,
        downloads: Rc<RefCell<Vec<(String, Vec<u8>)>>>,
    }

    impl FileTransfer for RecordingTransfer {
        fn prompt_file(&mut self) -> Result<Option<Vec<u8>>> {
            Ok(self.next_file.borrow_mut().take())
        }

        fn trigger_download(&mut self, bytes: &[u8], filename: &str) -> Result<Option<PathBuf>> {
            self.downloads
                .borrow_mut()
                .push((filename.to_string(), bytes.to_vec()));
            Ok(None)
        }
    }

    fn quiet_settings() -> EditorSettings {
        EditorSettings {
            open_preview_after_print: false,
            ..Default::default()
        }
    }

    fn app_with(store: RecordingStore) -> (AppState, RecordingTransfer) {
        let transfer = RecordingTransfer::default();
        let app = AppState::new(
            Box::new(store),
            Box::new(transfer.clone()),
            quiet_settings(),
        );
        (app, transfer)
    }

    fn app() -> (AppState, RecordingStore, RecordingTransfer) {
        let store = RecordingStore::default();
        let (app, transfer) = app_with(store.clone());
        (app, store, transfer)
    }

    #[test]
    fn test_starts_with_default_document() {
        let (app, store, _) = app();
        assert_eq!(**app.document(), default_resume());
        assert_eq!(app.active_section(), Section::Personal);
        assert!(store.saves.borrow().is_empty());
        assert!(app.preview().presentation().is_visible(PreviewSection::Work));
    }

    #[test]
    fn test_loads_persisted_document() {
        let app = AppState::new(
            Box::new(MemoryStore::with_bytes(br#"{"links": []}"#.to_vec())),
            Box::new(RecordingTransfer::default()),
            quiet_settings(),
        );
        assert!(app.document().links.is_empty());
        assert!(!app.preview().presentation().is_visible(PreviewSection::Links));
    }

    #[test]
    fn test_corrupt_persisted_document_falls_back_to_default() {
        let store = RecordingStore {
            initial: Some(b"not json".to_vec()),
            ..Default::default()
        };
        let (app, _) = app_with(store);
        assert_eq!(**app.document(), default_resume());
    }

    #[test]
    fn test_restores_last_section() {
        let settings = EditorSettings {
            last_section: Section::Languages,
            ..quiet_settings()
        };
        let app = AppState::new(
            Box::new(RecordingStore::default()),
            Box::new(RecordingTransfer::default()),
            settings,
        );
        assert_eq!(app.active_section(), Section::Languages);
    }

    #[test]
    fn test_edit_replaces_snapshot_and_auto_saves() {
        let (mut app, store, _) = app();
        let before = Arc::clone(app.document());

        app.dispatch(Message::EditPersonal(PersonalField::FirstName, "Sam".to_string()))
            .unwrap();

        assert_eq!(before.personal.first_name, "Alex");
        assert_eq!(app.document().personal.first_name, "Sam");
        assert!(Arc::ptr_eq(&before.work, &app.document().work));
        assert_eq!(app.preview().presentation().header.full_name, "Sam Doe");

        let saves = store.saves.borrow();
        assert_eq!(saves.len(), 1);
        assert_eq!(deserialize(&saves[0]).unwrap(), **app.document());
    }

    #[test]
    fn test_add_remove_and_move_entries() {
        let (mut app, store, _) = app();
        let id = app.add_entry(ListSection::Links);
        assert_eq!(app.document().links.len(), 3);
        assert_eq!(app.document().links[2].id, id);

        app.dispatch(Message::MoveEntry(ListSection::Links, id.clone(), Direction::Up))
            .unwrap();
        assert_eq!(app.document().links[1].id, id);

        app.dispatch(Message::UpdateLink(
            id.clone(),
            LinkPatch {
                label: Some("GitHub".to_string()),
                ..Default::default()
            },
        ))
        .unwrap();
        assert_eq!(app.document().links[1].label, "GitHub");

        app.dispatch(Message::RemoveEntry(ListSection::Links, id)).unwrap();
        assert_eq!(app.document().links, default_resume().links);
        assert_eq!(store.saves.borrow().len(), 4);
    }

    #[test]
    fn test_add_entry_message_for_every_list() {
        let (mut app, _, _) = app();
        for list in [
            ListSection::Work,
            ListSection::Education,
            ListSection::Skills,
            ListSection::Languages,
            ListSection::Links,
        ] {
            app.dispatch(Message::AddEntry(list)).unwrap();
        }
        assert_eq!(app.active_section(), Section::Links);
        assert_eq!(app.settings().last_section, Section::Links);
        let doc = app.document();
        assert_eq!(doc.work.len(), 3);
        assert_eq!(doc.education.len(), 2);
        assert_eq!(doc.skills.len(), 4);
        assert_eq!(doc.skills[3].level, 3);
        assert_eq!(doc.languages[2].cefr, CefrLevel::B1);
        assert_eq!(doc.links.len(), 3);
    }

    #[test]
    fn test_noop_edits_do_not_save() {
        let (mut app, store, _) = app();
        let before = Arc::clone(app.document());
        app.dispatch(Message::RemoveEntry(ListSection::Work, EntryId::from("nope")))
            .unwrap();
        app.dispatch(Message::MoveEntry(
            ListSection::Work,
            EntryId::from("w1"),
            Direction::Up,
        ))
        .unwrap();
        assert!(Arc::ptr_eq(&before, app.document()));
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_current_toggle_clears_end() {
        let (mut app, _, _) = app();
        let id = EntryId::from("w2");
        app.dispatch(Message::SetWorkCurrent(id.clone(), true)).unwrap();
        let w2 = &app.document().work[1];
        assert!(w2.current);
        assert_eq!(w2.end, "");

        app.dispatch(Message::SetWorkCurrent(id, false)).unwrap();
        assert!(!app.document().work[1].current);
    }

    #[test]
    fn test_skill_level_clamped_at_entry() {
        let (mut app, _, _) = app();
        app.dispatch(Message::SetSkillLevel(EntryId::from("s1"), 9)).unwrap();
        assert_eq!(app.document().skills[0].level, 5);
        app.dispatch(Message::SetSkillLevel(EntryId::from("s1"), 0)).unwrap();
        assert_eq!(app.document().skills[0].level, 1);
        app.dispatch(Message::UpdateSkill(
            EntryId::from("s2"),
            SkillPatch {
                level: Some(-3),
                name: Some("Sketch".to_string()),
            },
        ))
        .unwrap();
        assert_eq!(app.document().skills[1].level, 1);
        assert_eq!(app.document().skills[1].name, "Sketch");
    }

    #[test]
    fn test_language_level() {
        let (mut app, _, _) = app();
        app.dispatch(Message::SetLanguageLevel(EntryId::from("l2"), CefrLevel::C2))
            .unwrap();
        assert_eq!(app.document().languages[1].cefr, CefrLevel::C2);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let (mut app, _) = app_with(store);
        app.dispatch(Message::EditPersonal(PersonalField::City, "Paris".to_string()))
            .unwrap();
        assert_eq!(app.document().personal.city, "Paris");
    }

    #[test]
    fn test_auto_save_can_be_disabled() {
        let (mut app, store, _) = app();
        app.set_settings(EditorSettings {
            auto_save_enabled: false,
            ..quiet_settings()
        });
        app.dispatch(Message::AddEntry(ListSection::Skills)).unwrap();
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_settings_margin_is_bounded_in_preview() {
        let (mut app, _, _) = app();
        app.set_settings(EditorSettings {
            page_margin_mm: 400,
            ..quiet_settings()
        });
        assert!(app.preview().html().contains("margin: 12mm"));
        assert!(!app.preview().html().contains("400mm"));
    }

    #[test]
    fn test_select_section_does_not_touch_document() {
        let (mut app, store, _) = app();
        let before = Arc::clone(app.document());
        app.dispatch(Message::SelectSection(Section::Links)).unwrap();
        assert_eq!(app.active_section(), Section::Links);
        assert_eq!(app.settings().last_section, Section::Links);
        assert!(Arc::ptr_eq(&before, app.document()));
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_import_json_replaces_document() {
        let (mut app, store, _) = app();
        app.dispatch(Message::ImportJson(
            br#"{"personal": {"firstName": "Kim"}, "skills": []}"#.to_vec(),
        ))
        .unwrap();
        assert_eq!(app.document().personal.first_name, "Kim");
        assert!(app.document().skills.is_empty());
        assert_eq!(app.document().work, default_resume().work);
        assert_eq!(store.saves.borrow().len(), 1);
        assert!(!app.import_pending());
    }

    #[test]
    fn test_malformed_import_leaves_document_unchanged() {
        let (mut app, store, _) = app();
        let before = Arc::clone(app.document());
        let err = app
            .dispatch(Message::ImportJson(b"{ broken".to_vec()))
            .unwrap_err();
        assert!(matches!(err, AppError::Deserialize(_)));
        let err = app.dispatch(Message::ImportJson(b"[]".to_vec())).unwrap_err();
        assert!(matches!(err, AppError::Deserialize(_)));
        assert!(Arc::ptr_eq(&before, app.document()));
        assert!(store.saves.borrow().is_empty());
        assert!(!app.import_pending());
    }

    #[test]
    fn test_import_file_via_transfer() {
        let (mut app, _, transfer) = app();
        *transfer.next_file.borrow_mut() = Some(br#"{"links": []}"#.to_vec());
        app.dispatch(Message::ImportFile).unwrap();
        assert!(app.document().links.is_empty());
    }

    #[test]
    fn test_cancelled_file_prompt_releases_import() {
        let (mut app, store, _) = app();
        app.dispatch(Message::ImportFile).unwrap();
        assert!(!app.import_pending());
        assert_eq!(**app.document(), default_resume());
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_unreadable_import_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut transfer = DirectoryTransfer::new(dir.path());
        transfer.pick(dir.path().join("does-not-exist.json"));
        let store = RecordingStore::default();
        let mut app = AppState::new(
            Box::new(store.clone()),
            Box::new(transfer),
            quiet_settings(),
        );

        let err = app.dispatch(Message::ImportFile).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(**app.document(), default_resume());
        assert!(!app.import_pending());
        assert!(store.saves.borrow().is_empty());
    }

    #[test]
    fn test_concurrent_import_rejected() {
        let (mut app, _, _) = app();
        let ticket = app.begin_import().unwrap();
        let err = app
            .dispatch(Message::ImportJson(br#"{"links": []}"#.to_vec()))
            .unwrap_err();
        assert!(matches!(err, AppError::ImportInProgress));
        assert_eq!(app.document().links.len(), 2);

        app.complete_import(ticket, br#"{"skills": []}"#).unwrap();
        assert!(app.document().skills.is_empty());
        assert_eq!(app.document().links.len(), 2);
    }

    #[test]
    fn test_export_json() {
        let (mut app, _, transfer) = app();
        app.dispatch(Message::ExportJson).unwrap();
        let downloads = transfer.downloads.borrow();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].0, "resume.json");
        assert_eq!(downloads[0].1, serialize(app.document()).unwrap());
        assert_eq!(app.settings().last_export_directory, None);
    }

    #[test]
    fn test_export_remembers_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exports = dir.path().join("exports");
        let mut app = AppState::new(
            Box::new(RecordingStore::default()),
            Box::new(DirectoryTransfer::new(&exports)),
            quiet_settings(),
        );

        app.dispatch(Message::ExportJson).unwrap();

        let written = std::fs::read(exports.join("resume.json")).unwrap();
        assert_eq!(deserialize(&written).unwrap(), **app.document());
        assert_eq!(
            app.settings().last_export_directory.as_deref(),
            Some(exports.to_string_lossy().as_ref())
        );
    }

    #[test]
    fn test_print_preview_writes_page() {
        let (mut app, _, _) = app();
        app.dispatch(Message::PrintPreview).unwrap();
        let path = app.print_preview().unwrap();
        assert!(path.exists());
    }
}
