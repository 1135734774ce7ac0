//! modrename - Gradle module path rename library
//!
//! This library provides the core functionality for renaming a Gradle module:
//! - Module path parsing and lossless serialization
//! - Rename propagation to dependency declarations
//! - Transactional change set application
//! - Build file scanning and span-preserving edits

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod rename;
