use std::sync::Arc;
use ticklist_core::{TicklistError, TicklistResult};
use ticklist_domain::{Task, TaskCollection, TaskId};
use ticklist_engine::{TaskStore, STORAGE_KEY};
use ticklist_persistence::{JsonFileGateway, MemoryGateway, PersistenceGateway};

mockall::mock! {
    pub Gateway {}

    #[async_trait::async_trait]
    impl PersistenceGateway for Gateway {
        async fn read(&self, key: &str) -> TicklistResult<Option<Vec<u8>>>;
        async fn write(&self, key: &str, bytes: &[u8]) -> TicklistResult<()>;
    }
}

fn seeded(ids: &[&str]) -> TaskCollection {
    TaskCollection::from_tasks(ids.iter().map(|id| Task::with_id(*id, *id)).collect())
}

#[tokio::test]
async fn test_each_mutation_writes_exactly_once() {
    let gateway = MemoryGateway::new();
    let mut store = TaskStore::load(Arc::new(gateway.clone()), seeded(&["a", "b"])).await;

    store.toggle_done(&TaskId::from("a"));
    store.rename_subject(&TaskId::from("b"), "second");
    store.insert_front(Task::with_id("c", "third"));
    store.remove(&TaskId::from("a"));
    store.flush().await;

    assert_eq!(gateway.write_count(), 4);

    let stored = gateway.get(STORAGE_KEY).await.unwrap();
    let decoded = TaskCollection::from_json_bytes(&stored).unwrap();
    assert_eq!(&decoded, store.tasks());
}

#[tokio::test]
async fn test_back_to_back_mutations_both_land() {
    let gateway = MemoryGateway::new();
    let mut store = TaskStore::load(Arc::new(gateway.clone()), seeded(&["a", "b"])).await;

    store.toggle_done(&TaskId::from("a"));
    store.rename_subject(&TaskId::from("b"), "x");

    let tasks = store.tasks();
    assert!(tasks.get(&TaskId::from("a")).unwrap().done);
    assert_eq!(tasks.get(&TaskId::from("b")).unwrap().subject, "x");

    store.flush().await;
    let stored = gateway.get(STORAGE_KEY).await.unwrap();
    let decoded = TaskCollection::from_json_bytes(&stored).unwrap();
    assert_eq!(&decoded, store.tasks());
}

#[tokio::test]
async fn test_unknown_id_mutation_still_persists() {
    let gateway = MemoryGateway::new();
    let mut store = TaskStore::load(Arc::new(gateway.clone()), seeded(&["a"])).await;

    store.toggle_done(&TaskId::from("ghost"));
    store.flush().await;

    assert_eq!(gateway.write_count(), 1);
    let stored = gateway.get(STORAGE_KEY).await.unwrap();
    let decoded = TaskCollection::from_json_bytes(&stored).unwrap();
    assert_eq!(decoded, seeded(&["a"]));
}

#[tokio::test]
async fn test_final_write_reflects_final_state_after_burst() {
    let gateway = MemoryGateway::new();
    let mut store = TaskStore::load(Arc::new(gateway.clone()), TaskCollection::new()).await;

    for i in 0..20 {
        store.insert_front(Task::new(format!("task {i}")));
    }
    store.flush().await;

    assert_eq!(gateway.write_count(), 20);
    let stored = gateway.get(STORAGE_KEY).await.unwrap();
    let decoded = TaskCollection::from_json_bytes(&stored).unwrap();
    assert_eq!(decoded.len(), 20);
    assert_eq!(&decoded, store.tasks());
}

#[tokio::test]
async fn test_load_prefers_stored_document_over_defaults() {
    let gateway = MemoryGateway::new();
    gateway
        .put(STORAGE_KEY, seeded(&["x", "y"]).to_json_bytes().unwrap())
        .await;

    let store = TaskStore::load(Arc::new(gateway.clone()), seeded(&["default"])).await;

    assert!(store.tasks().contains(&TaskId::from("x")));
    assert!(store.tasks().contains(&TaskId::from("y")));
    assert!(!store.tasks().contains(&TaskId::from("default")));
}

#[tokio::test]
async fn test_load_falls_back_on_corrupt_document() {
    let gateway = MemoryGateway::new();
    gateway.put(STORAGE_KEY, b"not {json".as_slice()).await;

    let store = TaskStore::load(Arc::new(gateway.clone()), seeded(&["a"])).await;

    assert_eq!(store.tasks(), &seeded(&["a"]));
    // Loading never writes on its own.
    assert_eq!(gateway.write_count(), 0);
}

#[tokio::test]
async fn test_load_repairs_duplicate_ids_in_document() {
    let gateway = MemoryGateway::new();
    let doc = br#"[
        {"id": "a", "subject": "first", "done": false},
        {"id": "a", "subject": "dup", "done": true}
    ]"#;
    gateway.put(STORAGE_KEY, doc.as_slice()).await;

    let store = TaskStore::load(Arc::new(gateway.clone()), TaskCollection::new()).await;

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(
        store.tasks().get(&TaskId::from("a")).unwrap().subject,
        "first"
    );
}

#[tokio::test]
async fn test_load_falls_back_when_storage_unavailable() {
    let mut mock = MockGateway::new();
    mock.expect_read().returning(|_| {
        Err(TicklistError::StorageUnavailable(std::io::Error::other(
            "medium offline",
        )))
    });

    let store = TaskStore::load(Arc::new(mock), seeded(&["a"])).await;

    assert_eq!(store.tasks(), &seeded(&["a"]));
}

#[tokio::test]
async fn test_write_failures_keep_memory_authoritative() {
    let mut mock = MockGateway::new();
    mock.expect_read().returning(|_| Ok(None));
    mock.expect_write().returning(|_, _| {
        Err(TicklistError::StorageUnavailable(std::io::Error::other(
            "disk full",
        )))
    });

    let mut store = TaskStore::load(Arc::new(mock), seeded(&["a"])).await;
    store.rename_subject(&TaskId::from("a"), "still here");
    store.toggle_done(&TaskId::from("a"));
    store.flush().await;

    let task = store.tasks().get(&TaskId::from("a")).unwrap();
    assert_eq!(task.subject, "still here");
    assert!(task.done);
}

#[tokio::test]
async fn test_restart_restores_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Arc::new(JsonFileGateway::new(dir.path()));

    {
        let mut store = TaskStore::load(gateway.clone(), TaskCollection::new()).await;
        store.insert_front(Task::with_id("persisted", "survives restart"));
        store.toggle_done(&TaskId::from("persisted"));
        store.flush().await;
    }

    let store = TaskStore::load(gateway, TaskCollection::new()).await;
    let task = store.tasks().get(&TaskId::from("persisted")).unwrap();
    assert_eq!(task.subject, "survives restart");
    assert!(task.done);
}
