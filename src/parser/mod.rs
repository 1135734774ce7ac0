//! Text codecs
//!
//! This module provides:
//! - The module path codec (`:app:feature` <-> `ModulePath`)

pub mod path;

pub use path::{escape, parse, serialize, RESERVED_CHARACTERS};
