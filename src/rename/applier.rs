//! Transactional change set application
//!
//! Applying runs in two phases under one exclusive borrow of the store:
//! every entry is checked against current state first, then all entries are
//! committed. A failed check consumes the change set and leaves the store as
//! it was.

use super::store::DeclarationStore;
use crate::domain::{ChangeEntry, ChangeSet};
use crate::error::ApplyError;
use tracing::{debug, warn};

/// Number of declarations updated by an apply
pub type AppliedCount = usize;

/// A change set that passed validation against a store it still borrows
#[derive(Debug)]
pub struct ValidatedChangeSet<'s> {
    store: &'s mut DeclarationStore,
    entries: Vec<ChangeEntry>,
}

impl ValidatedChangeSet<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commit every entry to the store
    pub fn commit(self) -> AppliedCount {
        let mut applied = 0;
        for entry in self.entries {
            let (id, _, proposed) = entry.into_parts();
            if self.store.replace_target(id, proposed) {
                applied += 1;
            }
        }
        debug!(applied, "committed change set");
        applied
    }
}

/// Check every entry of `change_set` against `store` without changing anything
pub fn validate(
    change_set: ChangeSet,
    store: &mut DeclarationStore,
) -> Result<ValidatedChangeSet<'_>, ApplyError> {
    for entry in change_set.entries() {
        let Some(current) = store.target_path(entry.id()) else {
            warn!(id = %entry.id(), "rejecting change set: declaration removed");
            return Err(ApplyError::missing(entry.id()));
        };
        if current != entry.expected() {
            warn!(id = %entry.id(), "rejecting change set: target path changed");
            return Err(ApplyError::path_changed(
                entry.id(),
                entry.expected().to_string(),
                current.to_string(),
            ));
        }
    }

    Ok(ValidatedChangeSet {
        store,
        entries: change_set.into_entries(),
    })
}

/// Validate then commit `change_set`; either every entry is applied or none is
pub fn apply(change_set: ChangeSet, store: &mut DeclarationStore) -> Result<AppliedCount, ApplyError> {
    Ok(validate(change_set, store)?.commit())
}
