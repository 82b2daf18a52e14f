use triage_core::db::{open_db, open_db_in_memory};
use triage_core::{KvStore, MemoryKvStore, SqliteKvStore};

#[test]
fn sqlite_set_overwrites_existing_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    store.set("medical_assistant_current_user", "a").unwrap();
    store.set("medical_assistant_current_user", "b").unwrap();

    assert_eq!(
        store.get("medical_assistant_current_user").unwrap().as_deref(),
        Some("b")
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_remove_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    store.set("k", "v").unwrap();
    assert!(store.remove("k").unwrap());
    assert!(!store.remove("k").unwrap());
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn prefix_scan_treats_underscore_literally() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    store.set("medical_assistant_profile_b", "{}").unwrap();
    store.set("medical_assistant_profile_a", "{}").unwrap();
    store.set("medicalXassistant_profile_c", "{}").unwrap();
    store.set("recent_utterances", "[]").unwrap();

    let keys = store.keys_with_prefix("medical_assistant_profile_").unwrap();
    assert_eq!(
        keys,
        vec![
            "medical_assistant_profile_a".to_string(),
            "medical_assistant_profile_b".to_string(),
        ]
    );
}

#[test]
fn memory_and_sqlite_stores_agree() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteKvStore::new(&conn);
    let memory = MemoryKvStore::new();

    for store in [&sqlite as &dyn KvStore, &memory as &dyn KvStore] {
        store.set("x_2", "two").unwrap();
        store.set("x_1", "one").unwrap();
        store.set("y", "other").unwrap();
        assert_eq!(
            store.keys_with_prefix("x_").unwrap(),
            vec!["x_1".to_string(), "x_2".to_string()]
        );
        assert_eq!(store.get("y").unwrap().as_deref(), Some("other"));
        assert!(store.remove("y").unwrap());
    }
    assert_eq!(memory.len(), 2);
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        SqliteKvStore::new(&conn)
            .set("recent_utterances", "[{\"transcript\":\"hi\",\"timestamp\":1}]")
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let value = SqliteKvStore::new(&conn).get("recent_utterances").unwrap();
    assert_eq!(
        value.as_deref(),
        Some("[{\"transcript\":\"hi\",\"timestamp\":1}]")
    );
}
