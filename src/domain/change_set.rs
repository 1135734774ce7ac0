//! Proposed declaration changes

use super::{DeclarationId, ModulePath, RenameRequest};

/// A single proposed target path replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    id: DeclarationId,
    /// Target path captured when the change was proposed
    expected: ModulePath,
    /// Target path after the rename
    proposed: ModulePath,
}

impl ChangeEntry {
    pub fn id(&self) -> DeclarationId {
        self.id
    }

    pub fn expected(&self) -> &ModulePath {
        &self.expected
    }

    pub fn proposed(&self) -> &ModulePath {
        &self.proposed
    }

    pub(crate) fn into_parts(self) -> (DeclarationId, ModulePath, ModulePath) {
        (self.id, self.expected, self.proposed)
    }
}

/// Batch of unapplied changes that all follow one rename rule.
///
/// A change set only refers to declarations by id. Applying it consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    request: RenameRequest,
    entries: Vec<ChangeEntry>,
}

impl ChangeSet {
    /// Creates an empty change set for `request`
    pub fn new(request: RenameRequest) -> Self {
        Self {
            request,
            entries: Vec::new(),
        }
    }

    /// Records a change for `id` if `current` matches the request's old path.
    /// Returns true when an entry was added. An id holds at most one entry.
    pub(crate) fn propose(&mut self, id: DeclarationId, current: &ModulePath) -> bool {
        if self.entry(id).is_some() {
            return false;
        }
        match self.request.rewrite(current) {
            Some(proposed) => {
                self.entries.push(ChangeEntry {
                    id,
                    expected: current.clone(),
                    proposed,
                });
                true
            }
            None => false,
        }
    }

    pub fn request(&self) -> &RenameRequest {
        &self.request
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    /// Returns the entry for a declaration id
    pub fn entry(&self, id: DeclarationId) -> Option<&ChangeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = DeclarationId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<ChangeEntry> {
        self.entries
    }
}
