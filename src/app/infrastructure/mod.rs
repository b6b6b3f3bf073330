//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Local document storage
//! - File import/export hand-off
//! - Error types

pub mod error;
pub mod store;
pub mod transfer;
