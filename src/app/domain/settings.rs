use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::section::Section;
use crate::app::infrastructure::error::AppError;

/// Anything wider leaves no printable area on an A4 sheet.
pub const MAX_PAGE_MARGIN_MM: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_auto_save")]
    pub auto_save_enabled: bool,

    /// Section shown when the editor opens
    #[serde(default)]
    pub last_section: Section,

    /// Print margin on every side of the A4 page
    #[serde(default = "default_page_margin_mm")]
    pub page_margin_mm: u32,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Last directory used for exports
    #[serde(default)]
    pub last_export_directory: Option<String>,

    #[serde(default = "default_open_preview")]
    pub open_preview_after_print: bool,
}

fn default_auto_save() -> bool {
    true
}

pub(crate) fn default_page_margin_mm() -> u32 {
    12
}

fn default_primary_color() -> String {
    "#0A53B5".to_string()
}

fn default_border_color() -> String {
    "#E5E7EB".to_string()
}

fn default_open_preview() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            auto_save_enabled: default_auto_save(),
            last_section: Section::Personal,
            page_margin_mm: default_page_margin_mm(),
            primary_color: default_primary_color(),
            border_color: default_border_color(),
            last_export_directory: None,
            open_preview_after_print: default_open_preview(),
        }
    }
}

impl EditorSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(settings) => settings.with_valid_margin(),
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save_to(config_path);
                default
            }
        }
    }

    /// Whether the page margin fits on the printed page.
    pub fn margin_in_range(&self) -> bool {
        self.page_margin_mm <= MAX_PAGE_MARGIN_MM
    }

    fn with_valid_margin(mut self) -> Self {
        if !self.margin_in_range() {
            tracing::warn!(
                "Page margin of {}mm is out of range. Using {}mm.",
                self.page_margin_mm,
                default_page_margin_mm()
            );
            self.page_margin_mm = default_page_margin_mm();
        }
        self
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if !self.margin_in_range() {
            return Err(AppError::Settings(format!(
                "page margin of {}mm leaves no room on an A4 page",
                self.page_margin_mm
            )));
        }

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("europass-resume");
        path.push("settings.json");
        path
    }
}
