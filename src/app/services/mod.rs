//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Ordered-list editing
//! - Date range and locality formatting
//! - Document persistence (JSON)
//! - Preview rendering and print HTML

pub mod format;
pub mod list_editor;
pub mod persistence;
pub mod print;
pub mod render;
