//! Rename engine
//!
//! This module provides:
//! - Propagation of a rename request to matching declarations
//! - The declaration store and its thread-safe handle
//! - All-or-nothing application of change sets

pub mod applier;
mod propagator;
mod store;

pub use applier::{apply, validate, AppliedCount, ValidatedChangeSet};
pub use propagator::propagate;
pub use store::{DeclarationStore, SharedDeclarationStore};
