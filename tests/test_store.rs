//! Direct tests of the SQLite scroll store, below the use-case layer.

use grimoire::domain::entities::scroll::Scroll;
use grimoire::domain::error::RetrievalError;
use grimoire::domain::ports::scroll_store::ScrollStore;
use grimoire::infrastructure::sqlite::migrations::run_migrations;
use grimoire::infrastructure::sqlite::scroll_store::SqliteScrollStore;
use rusqlite::Connection;

fn setup() -> SqliteScrollStore {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteScrollStore::new(conn)
}

fn scroll(content: &str) -> Scroll {
    Scroll::new(content.to_string())
}

#[test]
fn test_empty_store_search_returns_empty() {
    let store = setup();
    let hits = store.search(&[1.0, 0.0], 3).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_search_rejects_zero_k() {
    let store = setup();
    let err = store.search(&[1.0, 0.0], 0).unwrap_err();
    assert!(matches!(err, RetrievalError::InvalidInput(_)));
}

#[test]
fn test_search_orders_by_ascending_distance() {
    let store = setup();
    store.insert(&scroll("far"), &[0.0, 1.0]).unwrap();
    store.insert(&scroll("near"), &[1.0, 0.0]).unwrap();
    store.insert(&scroll("middle"), &[0.7, 0.7]).unwrap();

    let hits = store.search(&[1.0, 0.0], 3).unwrap();
    let contents: Vec<&str> = hits.iter().map(|h| h.content.as_str()).collect();
    assert_eq!(contents, vec!["near", "middle", "far"]);
    assert!(hits[0].distance <= hits[1].distance);
    assert!(hits[1].distance <= hits[2].distance);
}

#[test]
fn test_search_truncates_to_k() {
    let store = setup();
    for i in 0..5 {
        store
            .insert(&scroll(&format!("scroll {i}")), &[1.0, i as f32])
            .unwrap();
    }
    let hits = store.search(&[1.0, 0.0], 2).unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_ties_break_by_scroll_id() {
    let store = setup();
    let a = scroll("twin a");
    let b = scroll("twin b");
    store.insert(&a, &[1.0, 0.0]).unwrap();
    store.insert(&b, &[1.0, 0.0]).unwrap();

    let hits = store.search(&[0.0, 1.0], 2).unwrap();
    let expected_first = if a.id < b.id { &a.content } else { &b.content };
    assert_eq!(&hits[0].content, expected_first);
}

#[test]
fn test_stale_wrong_dimension_vector_ranks_last() {
    // A 3-dim vector left over from a model change must not outrank any
    // comparable scroll, even one diametrically opposed to the query.
    let store = setup();
    store
        .insert(&scroll("valid but dissimilar"), &[-1.0, 0.0])
        .unwrap();
    store
        .insert(&scroll("stale wrong-dim"), &[1.0, 0.0, 0.0])
        .unwrap();

    let hits = store.search(&[1.0, 0.0], 2).unwrap();
    assert_eq!(hits[0].content, "valid but dissimilar");
    assert_eq!(hits[1].content, "stale wrong-dim");
    assert!(hits[1].distance > hits[0].distance);
}

#[test]
fn test_malformed_timestamp_surfaces_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("grimoire.db");

    let conn = Connection::open(&db_path).unwrap();
    run_migrations(&conn).unwrap();
    conn.execute(
        "INSERT INTO scrolls (id, content, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params!["scroll-bad", "unreadable", "not-a-timestamp"],
    )
    .unwrap();

    let store = SqliteScrollStore::new(Connection::open(&db_path).unwrap());
    let err = store.scrolls_missing_vectors().unwrap_err();
    assert!(matches!(err, RetrievalError::Store(_)));
}

#[test]
fn test_count_tracks_inserts() {
    let store = setup();
    assert_eq!(store.count().unwrap(), 0);
    store.insert(&scroll("one"), &[1.0]).unwrap();
    store.insert(&scroll("two"), &[2.0]).unwrap();
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_missing_vectors_and_store_vector() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("grimoire.db");

    let conn = Connection::open(&db_path).unwrap();
    run_migrations(&conn).unwrap();
    // A scroll row with no vector, as left behind by a model change.
    conn.execute(
        "INSERT INTO scrolls (id, content, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params!["scroll-1", "orphaned", chrono::Utc::now().to_rfc3339()],
    )
    .unwrap();

    let store = SqliteScrollStore::new(Connection::open(&db_path).unwrap());
    let missing = store.scrolls_missing_vectors().unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].content, "orphaned");

    store.store_vector(&missing[0].id, &[0.0, 1.0]).unwrap();
    assert!(store.scrolls_missing_vectors().unwrap().is_empty());

    let hits = store.search(&[0.0, 1.0], 1).unwrap();
    assert_eq!(hits[0].content, "orphaned");
    assert!(hits[0].distance.abs() < 1e-6);
}
