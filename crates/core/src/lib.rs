//! Domain types and pure logic for the EyeTask bulk task importer.
//!
//! Nothing in this crate touches the database or HTTP. The store is reached
//! through the [`bulk_import::store::ImportStore`] trait, implemented by
//! `eyetask-db` for PostgreSQL and by `eyetask-pipeline` in memory.

pub mod activity;
pub mod bulk_import;
pub mod error;
pub mod roles;
pub mod types;
