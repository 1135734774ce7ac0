//! Core domain models for modrename
//!
//! This module contains the fundamental types used throughout the application:
//! - Module paths with lossless segment text
//! - Dependency declarations and their stable ids
//! - Validated rename requests
//! - Change sets proposed by a rename

mod change_set;
mod declaration;
mod module_path;
mod rename_request;

pub use change_set::{ChangeEntry, ChangeSet};
pub use declaration::{DeclarationId, DeclarationIds, DependencyDeclaration, SourceSpan};
pub use module_path::{ModulePath, Segment, PATH_SEPARATOR};
pub use rename_request::RenameRequest;
