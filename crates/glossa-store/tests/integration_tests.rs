//! Integration tests for glossa-store
//!
//! These tests verify the full insert/list/delete cycle and the global
//! uniqueness of vocabulary text.

use glossa_domain::traits::VocabularyStore;
use glossa_domain::VocabularyId;
use glossa_store::{SqliteStore, StoreError};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_insert_and_get() {
    let store = SqliteStore::new(":memory:").unwrap();

    let id = store.insert("buenos días", "Spanish").unwrap();
    assert!(id.value() > 0, "IDs are positive");

    let item = store.get(id).unwrap().expect("item should exist");
    assert_eq!(item.id, id);
    assert_eq!(item.text, "buenos días");
    assert_eq!(item.language, "Spanish");
    assert!(item.created_at > 0);
}

#[test]
fn test_get_missing_returns_none() {
    let store = SqliteStore::new(":memory:").unwrap();
    assert!(store.get(VocabularyId::from_value(99)).unwrap().is_none());
    assert!(store.get_by_text("nada").unwrap().is_none());
}

#[test]
fn test_text_is_globally_unique() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert("hola", "Spanish").unwrap();

    // Same text under a different language label still collides
    let result = store.insert("hola", "Portuguese");
    assert!(matches!(result, Err(StoreError::DuplicateText(_))));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_exists_text_is_exact() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert("Hola", "Spanish").unwrap();

    assert!(store.exists_text("Hola").unwrap());
    assert!(!store.exists_text("hola").unwrap(), "match is case-sensitive");
    assert!(!store.exists_text(" Hola ").unwrap(), "match is whitespace-sensitive");
}

#[test]
fn test_get_by_text() {
    let store = SqliteStore::new(":memory:").unwrap();
    let id = store.insert("adiós", "Spanish").unwrap();

    let item = store.get_by_text("adiós").unwrap().unwrap();
    assert_eq!(item.id, id);
}

#[test]
fn test_list_newest_first() {
    let store = SqliteStore::new(":memory:").unwrap();
    let first = store.insert("uno", "Spanish").unwrap();
    let second = store.insert("dos", "Spanish").unwrap();
    let third = store.insert("tres", "Spanish").unwrap();

    let items = store.list().unwrap();
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[test]
fn test_list_by_language() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert("hola", "Spanish").unwrap();
    store.insert("bonjour", "French").unwrap();
    store.insert("gracias", "Spanish").unwrap();

    let spanish = store.list_by_language("Spanish").unwrap();
    assert_eq!(spanish.len(), 2);
    assert!(spanish.iter().all(|i| i.language == "Spanish"));

    assert!(store.list_by_language("German").unwrap().is_empty());
}

#[test]
fn test_delete() {
    let store = SqliteStore::new(":memory:").unwrap();
    let id = store.insert("ciao", "Italian").unwrap();

    store.delete(id).unwrap();
    assert!(store.get(id).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);

    // Deleted text can be stored again
    assert!(store.insert("ciao", "Italian").is_ok());
}

#[test]
fn test_delete_missing_is_not_found() {
    let store = SqliteStore::new(":memory:").unwrap();
    let result = store.delete(VocabularyId::from_value(12));
    assert!(matches!(result, Err(StoreError::NotFound(id)) if id.value() == 12));
}

#[test]
fn test_file_backed_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("glossa.db");

    {
        let store = SqliteStore::new(&path).unwrap();
        store.insert("danke", "German").unwrap();
    }

    let reopened = SqliteStore::new(&path).unwrap();
    assert!(reopened.exists_text("danke").unwrap());
    assert_eq!(reopened.count().unwrap(), 1);
}

#[test]
fn test_concurrent_inserts_store_one_copy() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::new(dir.path().join("race.db")).unwrap());
    let workers = 8;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.insert("obrigado", "Portuguese").is_ok()
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1, "exactly one writer wins");
    assert_eq!(store.count().unwrap(), 1);
}
