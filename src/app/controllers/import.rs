//! Serializes imports: at most one import can be in flight.

use crate::app::infrastructure::error::{AppError, Result};

/// Proof that the holder started the import currently in flight.
/// Not `Clone`; completing or cancelling consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct ImportTicket(u64);

#[derive(Debug, Default)]
pub struct ImportController {
    pending: Option<u64>,
    next_ticket: u64,
}

impl ImportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn begin(&mut self) -> Result<ImportTicket> {
        if self.pending.is_some() {
            return Err(AppError::ImportInProgress);
        }
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        Ok(ImportTicket(self.next_ticket))
    }

    /// Release the slot held by `ticket`. Fails if the ticket is not the one
    /// in flight.
    pub fn finish(&mut self, ticket: ImportTicket) -> Result<()> {
        if self.pending != Some(ticket.0) {
            return Err(AppError::StaleImport);
        }
        self.pending = None;
        Ok(())
    }
}
