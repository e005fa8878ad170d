//! Behaviour of the in-process store that the repository relies on.

use assert_matches::assert_matches;
use inventory_core::entry::EntryKind;
use inventory_core::error::CoreError;
use inventory_db::{DbError, EntryStore, MemoryEntryStore};
use serde_json::json;

#[tokio::test]
async fn ids_are_per_collection() {
    let store = MemoryEntryStore::new();
    let a = store
        .insert(EntryKind::Property, "a", &json!({}))
        .await
        .unwrap();
    let b = store
        .insert(EntryKind::Hauling, "b", &json!({}))
        .await
        .unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 1);
}

#[tokio::test]
async fn duplicate_slug_in_one_collection_is_rejected() {
    let store = MemoryEntryStore::new();
    store
        .insert(EntryKind::Materials, "sand", &json!({}))
        .await
        .unwrap();

    let result = store.insert(EntryKind::Materials, "sand", &json!({})).await;
    assert_matches!(result, Err(DbError::DuplicateSlug { collection: "materials", .. }));
}

#[tokio::test]
async fn insert_with_taken_id_conflicts() {
    let store = MemoryEntryStore::new();
    store
        .insert_with_id(EntryKind::Equipment, 5, "lift", &json!({}))
        .await
        .unwrap();

    let result = store
        .insert_with_id(EntryKind::Equipment, 5, "lift-2", &json!({}))
        .await;
    assert_matches!(result, Err(DbError::Core(CoreError::Conflict(_))));
}

#[tokio::test]
async fn generated_id_past_the_maximum_conflicts() {
    let store = MemoryEntryStore::new();
    store
        .insert_with_id(EntryKind::Equipment, i64::MAX, "max", &json!({}))
        .await
        .unwrap();

    let result = store.insert(EntryKind::Equipment, "next", &json!({})).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Conflict(_))));
    assert!(store
        .find_by_slug(EntryKind::Equipment, "next")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn update_merges_top_level_keys() {
    let store = MemoryEntryStore::new();
    let row = store
        .insert(
            EntryKind::Hauling,
            "run",
            &json!({"name": "Run", "price": "10", "isActive": true}),
        )
        .await
        .unwrap();

    let updated = store
        .update(EntryKind::Hauling, row.id, Some("fast-run"), &json!({"price": "12"}))
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.slug, "fast-run");
    assert_eq!(
        updated.document,
        json!({"name": "Run", "price": "12", "isActive": true})
    );
}

#[tokio::test]
async fn update_of_missing_row_is_none() {
    let store = MemoryEntryStore::new();
    let result = store
        .update(EntryKind::Property, 9, None, &json!({"price": "1"}))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn update_cannot_steal_a_slug() {
    let store = MemoryEntryStore::new();
    store
        .insert(EntryKind::Property, "barn", &json!({}))
        .await
        .unwrap();
    let shed = store
        .insert(EntryKind::Property, "shed", &json!({}))
        .await
        .unwrap();

    let result = store
        .update(EntryKind::Property, shed.id, Some("barn"), &json!({}))
        .await;
    assert_matches!(result, Err(DbError::DuplicateSlug { .. }));
}

#[tokio::test]
async fn delete_reports_whether_a_row_went_away() {
    let store = MemoryEntryStore::new();
    let row = store
        .insert(EntryKind::Materials, "sand", &json!({}))
        .await
        .unwrap();

    assert!(store.delete(EntryKind::Materials, row.id).await.unwrap());
    assert!(!store.delete(EntryKind::Materials, row.id).await.unwrap());
    assert!(!store.delete(EntryKind::Equipment, row.id).await.unwrap());
}
