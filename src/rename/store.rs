//! Declaration storage
//!
//! [`DeclarationStore`] owns the declarations of a project. Mutation goes
//! through `&mut self`, so a change set is validated and committed while the
//! caller holds exclusive access. [`SharedDeclarationStore`] provides the same
//! guarantee across threads with a single write guard per apply.

use super::applier::{self, AppliedCount};
use super::propagator::propagate;
use crate::domain::{ChangeSet, DeclarationId, DependencyDeclaration, ModulePath, RenameRequest};
use crate::error::ApplyError;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owning collection of declarations keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationStore {
    declarations: BTreeMap<DeclarationId, DependencyDeclaration>,
}

impl DeclarationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from declarations; a repeated id keeps the last value
    pub fn from_declarations(declarations: impl IntoIterator<Item = DependencyDeclaration>) -> Self {
        let mut store = Self::new();
        for declaration in declarations {
            store.insert(declaration);
        }
        store
    }

    /// Insert a declaration, returning the one it replaced
    pub fn insert(&mut self, declaration: DependencyDeclaration) -> Option<DependencyDeclaration> {
        self.declarations.insert(declaration.id(), declaration)
    }

    /// Remove a declaration
    pub fn remove(&mut self, id: DeclarationId) -> Option<DependencyDeclaration> {
        self.declarations.remove(&id)
    }

    pub fn get(&self, id: DeclarationId) -> Option<&DependencyDeclaration> {
        self.declarations.get(&id)
    }

    pub fn contains(&self, id: DeclarationId) -> bool {
        self.declarations.contains_key(&id)
    }

    /// Current target path of a declaration
    pub fn target_path(&self, id: DeclarationId) -> Option<&ModulePath> {
        self.get(id).map(DependencyDeclaration::target_path)
    }

    /// Declarations in id order
    pub fn iter(&self) -> impl Iterator<Item = &DependencyDeclaration> {
        self.declarations.values()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Copy of every declaration, in id order
    pub fn snapshot(&self) -> Vec<DependencyDeclaration> {
        self.declarations.values().cloned().collect()
    }

    /// Propose the changes `request` implies for this store
    pub fn propose(&self, request: &RenameRequest) -> ChangeSet {
        propagate(request, self.iter())
    }

    /// Validate and commit a change set, all or nothing
    pub fn apply(&mut self, change_set: ChangeSet) -> Result<AppliedCount, ApplyError> {
        applier::apply(change_set, self)
    }

    /// Swap in a new target path; false if the declaration is gone
    pub(crate) fn replace_target(&mut self, id: DeclarationId, path: ModulePath) -> bool {
        match self.declarations.get_mut(&id) {
            Some(slot) => {
                *slot = slot.with_target_path(path);
                true
            }
            None => false,
        }
    }
}

/// Thread-safe handle to a [`DeclarationStore`].
///
/// Readers propose against the store under the read lock. `apply` holds the
/// write lock for validation and commit together.
#[derive(Debug, Clone, Default)]
pub struct SharedDeclarationStore {
    inner: Arc<RwLock<DeclarationStore>>,
}

impl SharedDeclarationStore {
    pub fn new(store: DeclarationStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Read access to the store
    pub fn read(&self) -> RwLockReadGuard<'_, DeclarationStore> {
        self.inner.read()
    }

    /// Copy of every declaration
    pub fn snapshot(&self) -> Vec<DependencyDeclaration> {
        self.inner.read().snapshot()
    }

    /// Propose a change set under the read lock
    pub fn propose(&self, request: &RenameRequest) -> ChangeSet {
        self.inner.read().propose(request)
    }

    /// Apply a change set under one write guard
    pub fn apply(&self, change_set: ChangeSet) -> Result<AppliedCount, ApplyError> {
        let mut guard = self.inner.write();
        guard.apply(change_set)
    }

    /// Run `f` with exclusive access to the store
    pub fn with_write<R>(&self, f: impl FnOnce(&mut DeclarationStore) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Unwrap the store, cloning it if other handles still exist
    pub fn into_inner(self) -> DeclarationStore {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .unwrap_or_else(|shared| shared.read().clone())
    }
}
