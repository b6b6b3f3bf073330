//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (ResumeData, entries, Section, Settings, Messages)
//! - `controllers/` - Orchestration (ImportController, PreviewController)
//! - `services/` - Business operations (list editing, persistence, rendering, print HTML)
//! - `infrastructure/` - External integrations (document store, file transfer, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::import::{ImportController, ImportTicket};
pub use controllers::preview::PreviewController;
pub use domain::{
    default_resume, CefrLevel, Direction, EditorSettings, Entry, EntryId, ListSection, Message,
    PersonalField, ResumeData, Section,
};
pub use infrastructure::error::{AppError, DeserializeError, Result};
pub use infrastructure::store::{DocumentStore, LocalStore, MemoryStore};
pub use infrastructure::transfer::{DirectoryTransfer, FileTransfer};
pub use services::print::PageSetup;
pub use services::render::{render, Presentation};
pub use state::AppState;
