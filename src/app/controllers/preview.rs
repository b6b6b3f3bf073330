use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::resume::ResumeData;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::print::{to_html, PageSetup};
use crate::app::services::render::{render, Presentation};

const PREVIEW_FILE_NAME: &str = "preview.html";

/// Keeps the live preview in step with the document and hands the printable
/// page to the system browser.
pub struct PreviewController {
    presentation: Presentation,
    html: String,
}

impl PreviewController {
    pub fn new(data: &ResumeData, page: &PageSetup) -> Self {
        let presentation = render(data);
        let html = to_html(&presentation, page);
        Self { presentation, html }
    }

    /// Re-render after a snapshot change.
    pub fn refresh(&mut self, data: &ResumeData, page: &PageSetup) {
        self.presentation = render(data);
        self.html = to_html(&self.presentation, page);
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Write the current page into `dir`. Returns the file path.
    pub fn write_preview_file_in(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(PREVIEW_FILE_NAME);
        fs::write(&path, &self.html)?;
        Ok(path)
    }

    /// Write the current page to the temp preview directory.
    pub fn write_preview_file(&self) -> Result<PathBuf> {
        self.write_preview_file_in(&preview_dir())
    }

    /// Write the page and, if asked, open it in the default browser where
    /// it can be printed or saved as PDF.
    pub fn print(&self, open_browser: bool) -> Result<PathBuf> {
        let path = self.write_preview_file()?;
        if open_browser {
            open::that(&path).map_err(|e| {
                tracing::warn!("Failed to open preview {}: {}", path.display(), e);
                AppError::Preview(format!("could not open {}: {}", path.display(), e))
            })?;
        }
        Ok(path)
    }
}

/// Get the temp directory for preview pages.
pub fn preview_dir() -> PathBuf {
    std::env::temp_dir().join("europass-resume")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::resume::{default_resume, PersonalField};
    use crate::app::services::render::PreviewSection;

    #[test]
    fn test_new_renders_immediately() {
        let preview = PreviewController::new(&default_resume(), &PageSetup::default());
        assert_eq!(preview.presentation().header.full_name, "Alex Doe");
        assert!(preview.html().contains("Alex Doe"));
    }

    #[test]
    fn test_refresh_follows_document() {
        let data = default_resume();
        let page = PageSetup::default();
        let mut preview = PreviewController::new(&data, &page);

        let next = data.with_personal(
            data.personal
                .with_field(PersonalField::Summary, String::new()),
        );
        preview.refresh(&next, &page);
        assert!(!preview.presentation().is_visible(PreviewSection::Statement));
        assert!(!preview.html().contains("Personal statement"));
    }

    #[test]
    fn test_write_preview_file_in() {
        let dir = tempfile::tempdir().unwrap();
        let preview = PreviewController::new(&default_resume(), &PageSetup::default());
        let path = preview.write_preview_file_in(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "preview.html");
        assert_eq!(fs::read_to_string(&path).unwrap(), preview.html());
    }

    #[test]
    fn test_print_without_browser_writes_file() {
        let preview = PreviewController::new(&default_resume(), &PageSetup::default());
        let path = preview.print(false).unwrap();
        assert!(path.starts_with(preview_dir()));
        assert!(path.exists());
    }
}
