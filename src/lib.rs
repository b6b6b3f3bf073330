//! Editing core for a Europass-style résumé.
//!
//! The document lives in immutable snapshots ([`ResumeData`]); every edit is a
//! [`Message`] dispatched to [`AppState`], which swaps in the next snapshot,
//! re-renders the print preview and auto-saves.

pub mod app;

pub use app::{
    default_resume, render, AppError, AppState, Message, PageSetup, Presentation, ResumeData,
    Result,
};
