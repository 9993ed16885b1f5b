use tasklist_core::db::open_db_in_memory;
use tasklist_core::{RepoError, SqliteTaskRepository, Task, TaskRepository};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("first task");
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[test]
fn list_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let texts = ["one", "two", "three"];
    for text in texts {
        repo.create_task(&Task::new(text)).unwrap();
    }

    let listed: Vec<String> = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.text)
        .collect();
    assert_eq!(listed, texts);
}

#[test]
fn create_rejects_blank_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.create_task(&Task::new("  ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count_tasks().unwrap(), 0);
}

#[test]
fn set_completed_and_set_text_touch_only_their_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("draft");
    repo.create_task(&task).unwrap();

    repo.set_completed(task.id, true).unwrap();
    repo.set_text(task.id, "final").unwrap();

    let loaded = repo.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded.id, task.id);
    assert_eq!(loaded.text, "final");
    assert!(loaded.completed);
}

#[test]
fn updates_on_missing_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let missing = Uuid::new_v4();

    let err = repo.set_completed(missing, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));

    let err = repo.set_text(missing, "text").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_is_idempotent_and_leaves_other_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let keep = Task::new("keep");
    let drop_me = Task::new("drop");
    repo.create_task(&keep).unwrap();
    repo.create_task(&drop_me).unwrap();

    assert!(repo.delete_task(drop_me.id).unwrap());
    assert!(!repo.delete_task(drop_me.id).unwrap());
    assert!(!repo.delete_task(Uuid::new_v4()).unwrap());

    assert_eq!(repo.list_tasks().unwrap(), vec![keep]);
}

#[test]
fn invalid_persisted_row_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (id, text) VALUES ('not-a-uuid', 'corrupt');",
        [],
    )
    .unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.list_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn blank_persisted_text_is_invalid_data_not_validation() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO tasks (id, text) VALUES (?1, '   ');",
        [id.to_string()],
    )
    .unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    assert!(matches!(repo.list_tasks().unwrap_err(), RepoError::InvalidData(_)));
    assert!(matches!(repo.get_task(id).unwrap_err(), RepoError::InvalidData(_)));
}
