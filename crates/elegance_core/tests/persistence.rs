use elegance_core::db::open_db_in_memory;
use elegance_core::{
    default_seed_tasks, encode_tasks, load_initial_tasks, Category, InitSource, KeyValueStore,
    KvTaskRepository, MemoryKvStore, Priority, ReadError, SqliteKvStore, StoreError, StoreResult,
    Task, TaskId, TaskRepository, TaskStore, DEFAULT_STORAGE_KEY,
};

/// Store that cannot serve reads.
struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("storage access denied".to_string()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
        Ok(())
    }

    fn remove_item(&mut self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::with_id(
            TaskId::from("1718000000000"),
            "Vie roskat",
            Priority::Medium,
            Category::Home,
            "2024-06-10T06:13:20.000Z",
        )
        .unwrap(),
        Task::new("ship release", Priority::High, Category::Work)
            .unwrap()
            .with_completed(true),
    ]
}

fn seeded_texts() -> Vec<String> {
    default_seed_tasks()
        .iter()
        .map(|task| task.text().to_string())
        .collect()
}

#[test]
fn save_then_load_roundtrips_field_for_field() {
    let mut repo = KvTaskRepository::new(MemoryKvStore::new());
    let tasks = sample_tasks();

    repo.save_tasks(&tasks).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), Some(tasks));
}

#[test]
fn empty_collection_roundtrips_and_is_not_reseeded() {
    let mut repo = KvTaskRepository::new(MemoryKvStore::new());
    repo.save_tasks(&[]).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), Some(Vec::new()));

    let store = TaskStore::initialize(repo);
    assert_eq!(store.init_source(), InitSource::Persisted);
    assert!(store.tasks().is_empty());
}

#[test]
fn absent_key_loads_as_none() {
    let repo = KvTaskRepository::new(MemoryKvStore::new());
    assert_eq!(repo.load_tasks().unwrap(), None);
}

#[test]
fn corrupt_content_is_a_decode_error_and_falls_back_to_seed() {
    let mut kv = MemoryKvStore::new();
    kv.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    let repo = KvTaskRepository::new(kv);

    assert!(matches!(repo.load_tasks(), Err(ReadError::Decode(_))));

    let (tasks, source) = load_initial_tasks(&repo);
    assert_eq!(source, InitSource::Recovered);
    let texts = tasks
        .iter()
        .map(|task| task.text().to_string())
        .collect::<Vec<_>>();
    assert_eq!(texts, seeded_texts());
}

#[test]
fn read_failure_is_a_store_error_and_falls_back_to_seed() {
    let repo = KvTaskRepository::new(UnreadableStore);

    assert!(matches!(
        repo.load_tasks(),
        Err(ReadError::Store(StoreError::Unavailable(_)))
    ));

    let store = TaskStore::initialize(repo);
    assert_eq!(store.init_source(), InitSource::Recovered);
    assert_eq!(store.tasks().len(), 4);
    let texts = store
        .tasks()
        .iter()
        .map(|task| task.text().to_string())
        .collect::<Vec<_>>();
    assert_eq!(texts, seeded_texts());
}

#[test]
fn blank_content_loads_as_first_run() {
    for raw in ["", "  \n"] {
        let mut kv = MemoryKvStore::new();
        kv.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();
        let repo = KvTaskRepository::new(kv);

        assert_eq!(repo.load_tasks().unwrap(), None);

        let store = TaskStore::initialize(repo);
        assert_eq!(store.init_source(), InitSource::FirstRun);
        assert_eq!(store.tasks().len(), 4);
    }
}

#[test]
fn unknown_enum_value_in_storage_recovers_like_absent_key() {
    let mut kv = MemoryKvStore::new();
    kv.set_item(
        DEFAULT_STORAGE_KEY,
        r#"[{"id":"1","text":"x","completed":false,"priority":"urgent","category":"työ","createdAt":"t"}]"#,
    )
    .unwrap();

    let store = TaskStore::initialize(KvTaskRepository::new(kv));
    assert_eq!(store.init_source(), InitSource::Recovered);
    assert_eq!(store.tasks().len(), 4);
}

#[test]
fn persisted_tasks_are_returned_verbatim() {
    let mut kv = MemoryKvStore::new();
    let tasks = sample_tasks();
    kv.set_item(DEFAULT_STORAGE_KEY, &encode_tasks(&tasks).unwrap())
        .unwrap();

    let store = TaskStore::initialize(KvTaskRepository::new(kv));
    assert_eq!(store.init_source(), InitSource::Persisted);
    assert_eq!(store.tasks(), tasks.as_slice());
    assert!(store.is_persisted());
}

#[test]
fn custom_key_isolates_collections() {
    let mut repo = KvTaskRepository::with_key(MemoryKvStore::new(), "other-list");
    repo.save_tasks(&sample_tasks()).unwrap();

    assert_eq!(repo.key(), "other-list");
    assert_eq!(repo.store().get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
}

#[test]
fn sqlite_store_roundtrips_and_overwrites() {
    let kv = SqliteKvStore::try_new(open_db_in_memory().unwrap()).unwrap();
    let mut repo = KvTaskRepository::new(kv);

    assert_eq!(repo.load_tasks().unwrap(), None);

    let tasks = sample_tasks();
    repo.save_tasks(&tasks).unwrap();
    repo.save_tasks(&tasks[..1]).unwrap();
    assert_eq!(repo.load_tasks().unwrap(), Some(tasks[..1].to_vec()));

    let rows: i64 = repo
        .store()
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    repo.store_mut().remove_item(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(repo.load_tasks().unwrap(), None);
}
