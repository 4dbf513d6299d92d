//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod subtask_repo;
pub mod task_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use subtask_repo::SubtaskRepo;
pub use task_repo::TaskRepo;
