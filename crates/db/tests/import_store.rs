//! Integration tests for `PgImportStore`. They need a running PostgreSQL
//! reachable through `DATABASE_URL`, so they are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p eyetask-db -- --ignored
//! ```

use eyetask_core::activity::ActivityEntry;
use eyetask_core::bulk_import::store::{ImportStore, NewSubtask, StoreError};
use eyetask_core::bulk_import::vocabulary::{Scene, SubtaskType, Weather};
use eyetask_core::types::DbId;
use eyetask_db::repositories::{ActivityLogRepo, SubtaskRepo, TaskRepo};
use eyetask_db::PgImportStore;
use sqlx::PgPool;

fn new_subtask(task_id: DbId, dataco_number: &str, amount_needed: f64) -> NewSubtask {
    NewSubtask {
        task_id,
        title: format!("Subtask {dataco_number}"),
        dataco_number: dataco_number.to_string(),
        subtask_type: SubtaskType::Events,
        amount_needed,
        labels: vec!["night".into()],
        target_car: vec!["wl-01".into()],
        weather: Weather::Clear,
        scene: Scene::SubUrban,
        day_time: vec!["day".into(), "night".into()],
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn resolves_tasks_by_dataco_number(pool: PgPool) {
    let task = TaskRepo::create(&pool, "Highway collection", "100").await.unwrap();
    let store = PgImportStore::new(pool);

    let found = store.find_task_by_dataco("100").await.unwrap().unwrap();
    assert_eq!(found.id, task.id);
    assert_eq!(found.title, "Highway collection");
    assert!(store.find_task_by_dataco("999").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn creates_subtasks_and_rolls_up_amounts(pool: PgPool) {
    let task = TaskRepo::create(&pool, "Urban collection", "200").await.unwrap();
    let store = PgImportStore::new(pool.clone());

    store.create_subtask(&new_subtask(task.id, "201", 5.0)).await.unwrap();
    store.create_subtask(&new_subtask(task.id, "202", 2.5)).await.unwrap();

    assert_eq!(store.find_subtasks_by_dataco("201").await.unwrap().len(), 1);
    assert_eq!(store.update_task_amount(task.id).await.unwrap(), 7.5);

    let rows = SubtaskRepo::list_by_task(&pool, task.id).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].scene, "Sub-Urban");
    assert_eq!(rows[0].day_time, vec!["day", "night"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_insert_is_a_conflict(pool: PgPool) {
    let task = TaskRepo::create(&pool, "Rural collection", "300").await.unwrap();
    let store = PgImportStore::new(pool);

    store.create_subtask(&new_subtask(task.id, "301", 1.0)).await.unwrap();
    let err = store
        .create_subtask(&new_subtask(task.id, "301", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(ref n) if n == "301"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rollup_of_missing_task_fails(pool: PgPool) {
    let store = PgImportStore::new(pool);
    let err = store.update_task_amount(4242).await.unwrap_err();
    assert!(matches!(err, StoreError::TaskMissing(4242)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn activity_entries_are_appended(pool: PgPool) {
    let task = TaskRepo::create(&pool, "Calibration", "400").await.unwrap();
    let store = PgImportStore::new(pool.clone());
    let subtask_id = store.create_subtask(&new_subtask(task.id, "401", 0.0)).await.unwrap();

    let entry = ActivityEntry::subtask_created(Some(1), subtask_id, task.id, "DATACO-400", "401");
    store.log_activity(&entry).await.unwrap();

    let logs = ActivityLogRepo::list_for_entity(&pool, "subtask", subtask_id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action_type, "subtask_created");
    assert_eq!(logs[0].details["parent_key"], "DATACO-400");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    PgImportStore::new(pool).health_check().await.unwrap();
}
