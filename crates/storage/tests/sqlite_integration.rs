use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_value() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.get("quiz_progress").await.unwrap().is_none());

    repo.set("quiz_progress", "[\"alpha::0\"]").await.unwrap();
    let fetched = repo.get("quiz_progress").await.expect("fetch");
    assert_eq!(fetched.as_deref(), Some("[\"alpha::0\"]"));
}

#[tokio::test]
async fn sqlite_set_upserts_existing_key() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("k", "first").await.unwrap();
    repo.set("k", "second").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn sqlite_remove_clears_key() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_remove?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("k", "v").await.unwrap();
    repo.remove("k").await.unwrap();
    assert!(repo.get("k").await.unwrap().is_none());
    // removing again is a no-op
    repo.remove("k").await.unwrap();
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.set("k", "kept").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("kept"));
}

#[tokio::test]
async fn storage_sqlite_wires_kv_store() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set("k", "v").await.unwrap();
    assert_eq!(storage.kv.get("k").await.unwrap().as_deref(), Some("v"));
}
