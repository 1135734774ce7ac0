//! Rename propagation
//!
//! Finds every declaration that targets the renamed module and proposes its
//! new target path. Nothing is mutated here; the result is a [`ChangeSet`]
//! that still has to be applied.

use crate::domain::{ChangeSet, DependencyDeclaration, RenameRequest};
use tracing::debug;

/// Propose the changes a rename implies for `declarations`.
///
/// Only declarations whose target path equals the old path segment by segment
/// are included. A longer path that merely shares a prefix (`:app:featureX`
/// when renaming `:app:feature`) is left alone. No matches yields an empty
/// change set.
pub fn propagate<'a, I>(request: &RenameRequest, declarations: I) -> ChangeSet
where
    I: IntoIterator<Item = &'a DependencyDeclaration>,
{
    let mut change_set = ChangeSet::new(request.clone());

    for declaration in declarations {
        if change_set.propose(declaration.id(), declaration.target_path()) {
            debug!(
                id = %declaration.id(),
                owner = declaration.owning_module(),
                configuration = declaration.configuration(),
                "declaration matches {}",
                request.old_path().canonical()
            );
        }
    }

    debug!(
        matches = change_set.len(),
        "proposed rename {}", request
    );
    change_set
}
