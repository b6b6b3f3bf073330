use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a list entry. Used for lookup and reordering only,
/// never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Fresh random id (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A record that lives in an ordered, user-sorted list section.
///
/// `Patch` is the partial form of the record: every field optional, `None`
/// meaning "keep the current value".
pub trait Entry: Clone {
    type Patch;

    fn id(&self) -> &EntryId;

    /// A default-valued entry carrying the given id.
    fn blank(id: EntryId) -> Self;

    /// Shallow merge: fields set in `patch` replace the current ones.
    fn merge(self, patch: Self::Patch) -> Self;
}

/// Assign `value` to `field` when the patch carries it.
pub(crate) fn apply<T>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}
