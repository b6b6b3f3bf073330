//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the front-end:
//! - Live print preview
//! - Import serialization

pub mod import;
pub mod preview;
