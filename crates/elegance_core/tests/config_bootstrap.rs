use elegance_core::{
    open_store, BootstrapError, Category, ConfigError, CoreConfig, InitSource, Priority,
};

#[test]
fn in_memory_store_starts_from_seed() {
    let store = open_store(&CoreConfig::default()).unwrap();

    assert_eq!(store.init_source(), InitSource::FirstRun);
    assert_eq!(store.tasks().len(), 4);
}

#[test]
fn default_config_does_not_survive_reopen() {
    let config = CoreConfig::default();
    assert!(config.is_ephemeral());

    {
        let mut store = open_store(&config).unwrap();
        store.clear_completed();
    }

    let store = open_store(&config).unwrap();
    assert_eq!(store.init_source(), InitSource::FirstRun);
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig::persistent(dir.path().join("tasks.db"));

    let added_id = {
        let mut store = open_store(&config).unwrap();
        let task = store
            .add("water plants", Priority::Medium, Category::Home)
            .unwrap();
        store.clear_completed();
        task.id().clone()
    };

    let store = open_store(&config).unwrap();
    assert_eq!(store.init_source(), InitSource::Persisted);
    assert_eq!(store.tasks().len(), 4);
    assert_eq!(store.tasks()[0].id(), &added_id);
    assert_eq!(store.counts().completed, 0);
}

#[test]
fn config_file_is_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("core.json");
    let db_path = dir.path().join("custom.db");
    std::fs::write(
        &path,
        serde_json::json!({
            "storage_key": "work-list",
            "db_path": db_path,
            "log_level": "warn"
        })
        .to_string(),
    )
    .unwrap();

    let config = CoreConfig::load(&path).unwrap();
    assert_eq!(config.storage_key, "work-list");
    assert_eq!(config.db_path.as_deref(), Some(db_path.as_path()));
    assert_eq!(config.log_dir, None);

    let store = open_store(&config).unwrap();
    assert_eq!(store.repository().key(), "work-list");
}

#[test]
fn missing_config_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CoreConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn invalid_config_is_rejected_before_opening_storage() {
    let config = CoreConfig {
        log_dir: Some("relative/logs".into()),
        ..CoreConfig::default()
    };

    let err = open_store(&config).err().unwrap();
    assert!(matches!(err, BootstrapError::Config(ConfigError::Invalid(_))));
}
