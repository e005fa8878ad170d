//! Repository behaviour over the in-process store: create, lookup, partial
//! update, upsert, slug renames and delete.

use assert_matches::assert_matches;
use inventory_core::entry::{
    CommonPatch, EntryCommon, EntryUpdate, Equipment, EquipmentPatch, Hauling, HaulingPatch,
    Materials, NewEntry, PriceTier, Property, PropertyPatch,
};
use inventory_core::error::CoreError;
use inventory_db::models::stored_entry::UpsertOutcome;
use inventory_db::repositories::EntryRepo;
use inventory_db::{DbError, MemoryEntryStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn common(name: &str) -> EntryCommon {
    EntryCommon {
        name: name.to_string(),
        is_active: true,
        ..Default::default()
    }
}

fn new_equipment(name: &str, price: &str) -> NewEntry<Equipment> {
    NewEntry {
        slug: None,
        record: Equipment {
            common: common(name),
            price: price.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Create and lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_derives_slug_from_name() {
    let store = MemoryEntryStore::new();

    let created = EntryRepo::create(&store, &new_equipment("Skid Steer 250", "120"))
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.slug, "skid-steer-250");
    assert_eq!(created.record.price, "120");

    let found = EntryRepo::find_by_slug::<Equipment>(&store, "skid-steer-250")
        .await
        .unwrap()
        .expect("entry should be found by slug");
    assert_eq!(found, created);
}

#[tokio::test]
async fn create_normalises_requested_slug() {
    let store = MemoryEntryStore::new();
    let mut input = new_equipment("Excavator", "300");
    input.slug = Some("  Big Digger!! ".into());

    let created = EntryRepo::create(&store, &input).await.unwrap();
    assert_eq!(created.slug, "big-digger");
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let store = MemoryEntryStore::new();

    let result = EntryRepo::create(&store, &new_equipment("   ", "10")).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert!(EntryRepo::list::<Equipment>(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_slug_without_usable_characters() {
    let store = MemoryEntryStore::new();
    let mut input = new_equipment("Trailer", "50");
    input.slug = Some("!!!".into());

    let result = EntryRepo::create(&store, &input).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn create_treats_blank_slug_as_absent() {
    let store = MemoryEntryStore::new();
    let mut input = new_equipment("Trailer", "50");
    input.slug = Some("  ".into());

    let created = EntryRepo::create(&store, &input).await.unwrap();
    assert_eq!(created.slug, "trailer");
}

#[tokio::test]
async fn list_returns_newest_first() {
    let store = MemoryEntryStore::new();
    for name in ["First", "Second", "Third"] {
        EntryRepo::create(&store, &new_equipment(name, "1")).await.unwrap();
    }

    let names: Vec<String> = EntryRepo::list::<Equipment>(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.record.common.name)
        .collect();
    assert_eq!(names, ["Third", "Second", "First"]);
}

#[tokio::test]
async fn missing_entry_is_none() {
    let store = MemoryEntryStore::new();
    assert!(EntryRepo::find_by_id::<Hauling>(&store, 42)
        .await
        .unwrap()
        .is_none());
    assert!(EntryRepo::find_by_slug::<Hauling>(&store, "nope")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Update and upsert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_changes_only_given_fields() {
    let store = MemoryEntryStore::new();
    let created = EntryRepo::create(
        &store,
        &NewEntry {
            slug: None,
            record: Property {
                common: common("Corner Lot"),
                address: "12 Main St".into(),
                price: "1800".into(),
                is_rental: true,
                ..Default::default()
            },
        },
    )
    .await
    .unwrap();

    let update = EntryUpdate {
        slug: None,
        patch: PropertyPatch {
            price: Some("1950".into()),
            ..Default::default()
        },
    };
    let (updated, outcome) = EntryRepo::update::<Property>(&store, created.id, &update)
        .await
        .unwrap();

    assert_eq!(outcome, UpsertOutcome::Updated);
    assert_eq!(updated.slug, "corner-lot");
    assert_eq!(updated.record.price, "1950");
    assert_eq!(updated.record.address, "12 Main St");
    assert!(updated.record.is_rental);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_rejects_blanking_the_name() {
    let store = MemoryEntryStore::new();
    let created = EntryRepo::create(&store, &new_equipment("Loader", "80"))
        .await
        .unwrap();

    let update = EntryUpdate {
        slug: None,
        patch: EquipmentPatch {
            common: CommonPatch {
                name: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        },
    };
    let result = EntryRepo::update::<Equipment>(&store, created.id, &update).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));

    let stored = EntryRepo::find_by_id::<Equipment>(&store, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.record.common.name, "Loader");
}

#[tokio::test]
async fn update_of_absent_id_inserts_under_that_id() {
    let store = MemoryEntryStore::new();
    let update = EntryUpdate {
        slug: None,
        patch: HaulingPatch {
            common: CommonPatch {
                name: Some("Gravel Run".into()),
                ..Default::default()
            },
            price: Some("90".into()),
        },
    };

    let (entry, outcome) = EntryRepo::update::<Hauling>(&store, 7, &update).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);
    assert_eq!(entry.id, 7);
    assert_eq!(entry.slug, "gravel-run");
    assert_eq!(entry.record.price, "90");
    assert!(!entry.record.common.is_active);

    // Generated ids continue past the explicit one.
    let next = EntryRepo::create(
        &store,
        &NewEntry {
            slug: None,
            record: Hauling {
                common: common("Dirt Run"),
                ..Default::default()
            },
        },
    )
    .await
    .unwrap();
    assert_eq!(next.id, 8);
}

#[tokio::test]
async fn upsert_of_absent_id_still_requires_a_name() {
    let store = MemoryEntryStore::new();
    let update = EntryUpdate {
        slug: None,
        patch: HaulingPatch {
            price: Some("90".into()),
            ..Default::default()
        },
    };

    let result = EntryRepo::update::<Hauling>(&store, 3, &update).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn non_positive_id_is_rejected() {
    let store = MemoryEntryStore::new();
    let result = EntryRepo::update::<Hauling>(&store, 0, &EntryUpdate::default()).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
}

#[tokio::test]
async fn renaming_slug_reallocates_it() {
    let store = MemoryEntryStore::new();
    EntryRepo::create(&store, &new_equipment("Bulldozer", "500"))
        .await
        .unwrap();
    let other = EntryRepo::create(&store, &new_equipment("Grader", "400"))
        .await
        .unwrap();

    let update = EntryUpdate {
        slug: Some("Bulldozer".into()),
        patch: EquipmentPatch::default(),
    };
    let (renamed, _) = EntryRepo::update::<Equipment>(&store, other.id, &update)
        .await
        .unwrap();
    assert_eq!(renamed.slug, "bulldozer-1");
}

#[tokio::test]
async fn keeping_own_slug_is_not_a_collision() {
    let store = MemoryEntryStore::new();
    let created = EntryRepo::create(&store, &new_equipment("Bulldozer", "500"))
        .await
        .unwrap();

    let update = EntryUpdate {
        slug: Some("bulldozer".into()),
        patch: EquipmentPatch {
            price: Some("550".into()),
            ..Default::default()
        },
    };
    let (updated, _) = EntryRepo::update::<Equipment>(&store, created.id, &update)
        .await
        .unwrap();
    assert_eq!(updated.slug, "bulldozer");
    assert_eq!(updated.record.price, "550");
}

#[tokio::test]
async fn blank_slug_on_update_keeps_current_slug() {
    let store = MemoryEntryStore::new();
    let created = EntryRepo::create(&store, &new_equipment("Bulldozer", "500"))
        .await
        .unwrap();

    let update = EntryUpdate {
        slug: Some(String::new()),
        patch: EquipmentPatch::default(),
    };
    let (updated, outcome) = EntryRepo::update::<Equipment>(&store, created.id, &update)
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);
    assert_eq!(updated.slug, "bulldozer");
}

#[tokio::test]
async fn blank_slug_on_upsert_derives_from_name() {
    let store = MemoryEntryStore::new();
    let update = EntryUpdate {
        slug: Some(" ".into()),
        patch: EquipmentPatch {
            common: CommonPatch {
                name: Some("Trencher".into()),
                ..Default::default()
            },
            ..Default::default()
        },
    };
    let (created, outcome) = EntryRepo::update::<Equipment>(&store, 12, &update)
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);
    assert_eq!(created.slug, "trencher");
}

#[tokio::test]
async fn replace_overwrites_tiers() {
    let store = MemoryEntryStore::new();
    let tier = |name: &str| PriceTier {
        tier_type: name.to_string(),
        delivery_price: "40".into(),
        pickup_price: "30".into(),
    };
    let created = EntryRepo::create(
        &store,
        &NewEntry {
            slug: None,
            record: Materials {
                common: common("Gravel"),
                types_and_prices: vec![tier("3/4 inch"), tier("Pea")],
            },
        },
    )
    .await
    .unwrap();

    let replacement = NewEntry {
        slug: None,
        record: Materials {
            common: common("Gravel"),
            types_and_prices: vec![tier("Crushed")],
        },
    };
    let (replaced, outcome) = EntryRepo::replace::<Materials>(&store, created.id, &replacement)
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);
    assert_eq!(replaced.slug, "gravel");
    assert_eq!(replaced.record.types_and_prices, vec![tier("Crushed")]);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_entry_once() {
    let store = MemoryEntryStore::new();
    let created = EntryRepo::create(&store, &new_equipment("Compactor", "60"))
        .await
        .unwrap();

    assert!(EntryRepo::delete::<Equipment>(&store, created.id).await.unwrap());
    assert!(EntryRepo::find_by_id::<Equipment>(&store, created.id)
        .await
        .unwrap()
        .is_none());
    assert!(!EntryRepo::delete::<Equipment>(&store, created.id).await.unwrap());
}

#[tokio::test]
async fn deleted_slug_can_be_reused() {
    let store = MemoryEntryStore::new();
    let created = EntryRepo::create(&store, &new_equipment("Compactor", "60"))
        .await
        .unwrap();
    EntryRepo::delete::<Equipment>(&store, created.id).await.unwrap();

    let again = EntryRepo::create(&store, &new_equipment("Compactor", "65"))
        .await
        .unwrap();
    assert_eq!(again.slug, "compactor");
}
