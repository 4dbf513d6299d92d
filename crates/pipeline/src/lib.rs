//! The stages of a bulk import that touch the store.
//!
//! Structural validation is pure and lives in `eyetask-core`. This crate
//! resolves parent keys to tasks ([`resolver`]) and normalizes and writes
//! subtask rows ([`writer`]). [`memory::MemoryImportStore`] is an in-process
//! store used by tests across the workspace.

pub mod memory;
pub mod resolver;
pub mod writer;

pub use memory::MemoryImportStore;
pub use resolver::{resolve_parents, Resolution};
pub use writer::import_batch;
