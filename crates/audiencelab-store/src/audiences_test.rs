use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::TimeZone;

use super::*;
use crate::blob::MemoryBlobStore;

/// Clock that advances one minute per call, starting 2025-01-01T00:00:00Z.
fn ticking_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
    let minutes = Arc::new(AtomicI64::new(0));
    move || {
        let n = minutes.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(n)
    }
}

fn test_store() -> AudienceStore<MemoryBlobStore> {
    AudienceStore::with_clock(MemoryBlobStore::new(), ticking_clock())
}

fn fields(name: &str, demographics: &str) -> AudienceFields {
    AudienceFields {
        name: name.to_string(),
        demographics: demographics.to_string(),
        ..AudienceFields::default()
    }
}

#[test]
fn list_is_empty_for_fresh_storage() {
    let store = test_store();
    assert!(store.list().is_empty());
}

#[test]
fn create_returns_record_retrievable_by_get() {
    let store = test_store();
    let created = store.create(fields("Fitness Fans", "18-25")).unwrap();

    assert_eq!(created.owner, "Me");
    assert_eq!(created.created_at, created.updated_at);
    assert!(!created.id.is_empty());

    let fetched = store.get(&created.id).expect("audience should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.demographics, "18-25");
    assert!(fetched.interests.is_empty());
    assert!(fetched.behaviors.is_empty());
}

#[test]
fn create_assigns_unique_ids() {
    let store = test_store();
    let a = store.create(fields("A", "x")).unwrap();
    let b = store.create(fields("B", "y")).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn create_rejects_undescribed_audience_before_touching_storage() {
    let store = test_store();
    let err = store
        .create(AudienceFields {
            name: "Empty".to_string(),
            ..AudienceFields::default()
        })
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(audiencelab_core::CoreError::NoDescriptiveFields)
    ));
    assert_eq!(store.blob().calls(), 0);
}

#[test]
fn create_surfaces_rejected_write() {
    let store = test_store();
    store.create(fields("Existing", "30-40")).unwrap();
    store.blob().set_reject_writes(true);

    let err = store.create(fields("New", "18-25")).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }), "got: {err:?}");

    store.blob().set_reject_writes(false);
    let names: Vec<String> = store.list().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Existing"]);
}

#[test]
fn list_is_newest_first() {
    let store = test_store();
    store.create(fields("First", "a")).unwrap();
    store.create(fields("Second", "b")).unwrap();
    store.create(fields("Third", "c")).unwrap();

    let names: Vec<String> = store.list().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[test]
fn list_stays_sorted_across_interleaved_deletes() {
    let store = test_store();
    let first = store.create(fields("First", "a")).unwrap();
    store.create(fields("Second", "b")).unwrap();
    store.delete(&first.id).unwrap();
    let third = store.create(fields("Third", "c")).unwrap();
    store.create(fields("Fourth", "d")).unwrap();
    store.delete(&third.id).unwrap();
    store.create(fields("Fifth", "e")).unwrap();

    let listed = store.list();
    let names: Vec<&str> = listed.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Fifth", "Fourth", "Second"]);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[test]
fn list_sorts_unordered_persisted_collection() {
    let raw = r#"[
        {"id":"old","name":"Old","demographics":"a","interests":"","behaviors":"",
         "createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z","owner":"Me"},
        {"id":"new","name":"New","demographics":"b","interests":"","behaviors":"",
         "createdAt":"2024-06-01T00:00:00Z","updatedAt":"2024-06-01T00:00:00Z","owner":"Me"}
    ]"#;
    let store = AudienceStore::new(MemoryBlobStore::new().with_blob(STORAGE_KEY, raw));
    let ids: Vec<String> = store.list().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["new", "old"]);
}

#[test]
fn corrupted_storage_is_treated_as_empty_and_cleared() {
    let blob = MemoryBlobStore::new().with_blob(STORAGE_KEY, "[{\"id\": \"broken\",");
    let store = AudienceStore::new(blob);

    assert!(store.list().is_empty());
    assert!(store.blob().raw(STORAGE_KEY).is_none());
}

#[test]
fn update_replaces_fields_and_preserves_identity() {
    let store = test_store();
    let created = store.create(fields("Fitness Fans", "18-25")).unwrap();

    let updated = store
        .update(
            &created.id,
            AudienceFields {
                name: "Gym Regulars".to_string(),
                demographics: "22-30".to_string(),
                interests: "strength training".to_string(),
                behaviors: "buys protein in bulk".to_string(),
            },
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.owner, created.owner);
    assert!(updated.updated_at > created.updated_at);

    let fetched = store.get(&created.id).unwrap();
    assert_eq!(fetched.name, "Gym Regulars");
    assert_eq!(fetched.demographics, "22-30");
    assert_eq!(fetched.interests, "strength training");
    assert_eq!(fetched.behaviors, "buys protein in bulk");
}

#[test]
fn update_unknown_id_is_not_found() {
    let store = test_store();
    store.create(fields("Fitness Fans", "18-25")).unwrap();
    let err = store.update("missing", fields("X", "y")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref id) if id == "missing"));
}

#[test]
fn update_rejects_blank_name() {
    let store = test_store();
    let created = store.create(fields("Fitness Fans", "18-25")).unwrap();
    let err = store.update(&created.id, fields(" ", "18-25")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(audiencelab_core::CoreError::EmptyName)
    ));
    assert_eq!(store.get(&created.id).unwrap().name, "Fitness Fans");
}

#[test]
fn delete_then_get_is_none() {
    let store = test_store();
    let created = store.create(fields("Fitness Fans", "18-25")).unwrap();
    store.delete(&created.id).unwrap();
    assert!(store.get(&created.id).is_none());
}

#[test]
fn delete_unknown_id_leaves_collection_unchanged() {
    let store = test_store();
    store.create(fields("A", "a")).unwrap();
    store.create(fields("B", "b")).unwrap();
    let before = store.list();

    store.delete("does-not-exist").unwrap();
    assert_eq!(store.list(), before);
}

#[test]
fn delete_unknown_id_does_not_write() {
    let store = test_store();
    store.create(fields("A", "a")).unwrap();
    store.blob().set_reject_writes(true);

    store.delete("does-not-exist").unwrap();

    store.blob().set_reject_writes(false);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn search_matches_name_case_insensitively() {
    let store = test_store();
    store.create(fields("Fitness Fans", "18-25")).unwrap();
    store.create(fields("Home Cooks", "30-45")).unwrap();
    store.create(fields("Indoor Fitness Beginners", "25-35")).unwrap();

    let names: Vec<String> = store.search("FITNESS").into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Indoor Fitness Beginners", "Fitness Fans"]);
    assert_eq!(store.search("").len(), 3);
}

#[test]
fn promote_seeds_demographics_from_description() {
    let store = test_store();
    let discovered = DiscoveredAudience {
        audience_name: "Eco Commuters".to_string(),
        description: "Office workers choosing e-bikes.".to_string(),
    };
    let saved = store.promote(&discovered).unwrap();
    assert_eq!(saved.name, "Eco Commuters");
    assert_eq!(saved.demographics, "Office workers choosing e-bikes.");
    assert!(saved.interests.is_empty());
    assert!(saved.behaviors.is_empty());
}

#[test]
fn seed_skips_existing_names() {
    let store = test_store();
    store.create(fields("Fitness Fans", "18-25")).unwrap();

    let created = store
        .seed(&[fields("fitness fans", "other"), fields("Home Cooks", "30-45")])
        .unwrap();

    assert_eq!(created, 1);
    assert_eq!(store.list().len(), 2);
    assert_eq!(store.seed(&[fields("Home Cooks", "30-45")]).unwrap(), 0);
}
