//! Ordered-list editing shared by every list section.
//!
//! All operations take the current list and return the next one. They are
//! total: an unknown id or an out-of-range move returns the input list
//! itself (same allocation), never an error.

use std::sync::Arc;

use crate::app::domain::entry::{Direction, Entry, EntryId};

fn position<T: Entry>(list: &[T], id: &EntryId) -> Option<usize> {
    list.iter().position(|entry| entry.id() == id)
}

/// Append a new entry built by `factory` around a freshly generated id.
pub fn add<T: Entry>(list: &Arc<[T]>, factory: impl FnOnce(EntryId) -> T) -> Arc<[T]> {
    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend_from_slice(list);
    next.push(factory(EntryId::generate()));
    next.into()
}

/// Append a default-valued entry.
pub fn add_blank<T: Entry>(list: &Arc<[T]>) -> Arc<[T]> {
    add(list, T::blank)
}

/// Merge `patch` into the entry with the given id.
pub fn update<T: Entry>(list: &Arc<[T]>, id: &EntryId, patch: T::Patch) -> Arc<[T]> {
    let Some(idx) = position(list, id) else {
        return Arc::clone(list);
    };
    let mut next = list.to_vec();
    next[idx] = list[idx].clone().merge(patch);
    next.into()
}

pub fn remove<T: Entry>(list: &Arc<[T]>, id: &EntryId) -> Arc<[T]> {
    if position(list, id).is_none() {
        return Arc::clone(list);
    }
    list.iter().filter(|entry| entry.id() != id).cloned().collect()
}

/// Move an entry one step up or down. The first entry cannot move up and
/// the last cannot move down.
pub fn move_entry<T: Entry>(list: &Arc<[T]>, id: &EntryId, direction: Direction) -> Arc<[T]> {
    let Some(idx) = position(list, id) else {
        return Arc::clone(list);
    };
    let dest = match direction {
        Direction::Up => idx.checked_sub(1),
        Direction::Down => Some(idx + 1).filter(|&d| d < list.len()),
    };
    let Some(dest) = dest else {
        return Arc::clone(list);
    };

    let mut next = list.to_vec();
    let moved = next.remove(idx);
    next.insert(dest, moved);
    next.into()
}
