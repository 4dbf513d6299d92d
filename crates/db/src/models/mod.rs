//! Row models and insert DTOs, one module per table.

pub mod activity;
pub mod subtask;
pub mod task;
