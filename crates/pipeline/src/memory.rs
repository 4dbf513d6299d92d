//! In-memory [`ImportStore`] with failure injection, for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use eyetask_core::activity::ActivityEntry;
use eyetask_core::bulk_import::store::{ImportStore, NewSubtask, StoreError, TaskRef};
use eyetask_core::types::DbId;
use tokio::sync::RwLock;

/// A subtask as stored by [`MemoryImportStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSubtask {
    pub id: DbId,
    pub subtask: NewSubtask,
}

#[derive(Debug, Clone)]
struct StoredTask {
    id: DbId,
    title: String,
    dataco_number: String,
    amount_needed: f64,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    tasks: Vec<StoredTask>,
    subtasks: Vec<StoredSubtask>,
    activity: Vec<ActivityEntry>,
    rollups: Vec<DbId>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Store keeping everything in process memory.
///
/// Thread-safe via interior `RwLock`; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryImportStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
    activity_log_down: AtomicBool,
}

impl MemoryImportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing task with the given normalized DATACO number.
    pub async fn insert_task(&self, dataco_number: &str, title: &str) -> TaskRef {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        tables.tasks.push(StoredTask {
            id,
            title: title.to_string(),
            dataco_number: dataco_number.to_string(),
            amount_needed: 0.0,
        });
        TaskRef {
            id,
            title: title.to_string(),
        }
    }

    /// Make every operation fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make only [`ImportStore::log_activity`] fail.
    pub fn set_activity_log_down(&self, down: bool) {
        self.activity_log_down.store(down, Ordering::SeqCst);
    }

    pub async fn subtasks(&self) -> Vec<StoredSubtask> {
        self.tables.read().await.subtasks.clone()
    }

    pub async fn activity(&self) -> Vec<ActivityEntry> {
        self.tables.read().await.activity.clone()
    }

    /// Task ids passed to [`ImportStore::update_task_amount`], in call order.
    pub async fn rollups(&self) -> Vec<DbId> {
        self.tables.read().await.rollups.clone()
    }

    /// Current rollup value of a task.
    pub async fn task_amount(&self, task_id: DbId) -> Option<f64> {
        self.tables
            .read()
            .await
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.amount_needed)
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ImportStore for MemoryImportStore {
    async fn find_task_by_dataco(&self, dataco_number: &str) -> Result<Option<TaskRef>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .iter()
            .find(|t| t.dataco_number == dataco_number)
            .map(|t| TaskRef {
                id: t.id,
                title: t.title.clone(),
            }))
    }

    async fn find_subtasks_by_dataco(&self, dataco_number: &str) -> Result<Vec<DbId>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .subtasks
            .iter()
            .filter(|s| s.subtask.dataco_number == dataco_number)
            .map(|s| s.id)
            .collect())
    }

    async fn create_subtask(&self, subtask: &NewSubtask) -> Result<DbId, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if !tables.tasks.iter().any(|t| t.id == subtask.task_id) {
            return Err(StoreError::TaskMissing(subtask.task_id));
        }
        if tables
            .subtasks
            .iter()
            .any(|s| s.subtask.dataco_number == subtask.dataco_number)
        {
            return Err(StoreError::Conflict(subtask.dataco_number.clone()));
        }
        let id = tables.allocate_id();
        tables.subtasks.push(StoredSubtask {
            id,
            subtask: subtask.clone(),
        });
        Ok(id)
    }

    async fn update_task_amount(&self, task_id: DbId) -> Result<f64, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let total: f64 = tables
            .subtasks
            .iter()
            .filter(|s| s.subtask.task_id == task_id)
            .map(|s| s.subtask.amount_needed)
            .sum();
        let task = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StoreError::TaskMissing(task_id))?;
        task.amount_needed = total;
        tables.rollups.push(task_id);
        Ok(total)
    }

    async fn log_activity(&self, entry: &ActivityEntry) -> Result<(), StoreError> {
        self.ensure_online()?;
        if self.activity_log_down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("activity log is down".into()));
        }
        self.tables.write().await.activity.push(entry.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.ensure_online()
    }
}
