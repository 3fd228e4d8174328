//! Behavior shared by every `ToDoItemStore` backend.
//!
//! Each check is written once against `&dyn ToDoItemStore` and run for the
//! in-memory store, an in-memory SQLite database and a SQLite file.

use std::collections::BTreeSet;

use todo_core::{
    BulkToDoItem, ItemId, MemoryStore, SqliteStore, StoreError, ToDoItem, ToDoItemFields,
    ToDoItemStore, ROOT_PARENT,
};

fn with_each_store(check: fn(&dyn ToDoItemStore)) {
    check(&MemoryStore::new());
    check(&SqliteStore::in_memory().unwrap());

    let dir = tempfile::tempdir().unwrap();
    check(&SqliteStore::open(dir.path().join("items.db")).unwrap());
}

fn ids(items: &[ToDoItem]) -> BTreeSet<ItemId> {
    items.iter().map(|item| item.id).collect()
}

// ---------------------------------------------------------------------------
// Create / get
// ---------------------------------------------------------------------------

#[test]
fn create_then_get_returns_same_fields() {
    with_each_store(|store| {
        let cases = [
            ToDoItemFields::new("root", ROOT_PARENT),
            ToDoItemFields::new("", "42").with_priority(-1),
            ToDoItemFields::default(),
        ];
        for fields in cases {
            let created = store.create(fields.clone()).unwrap();
            let fetched = store.get_by_id(created.id).unwrap();
            assert_eq!(fetched.id, created.id);
            assert_eq!(fetched.title, fields.title);
            assert_eq!(fetched.parent, fields.parent);
            assert_eq!(fetched.priority, fields.priority);
            assert_eq!(fetched.created_at, fetched.updated_at);
            assert_eq!(
                fetched.created_at.timestamp_millis(),
                created.created_at.timestamp_millis()
            );
            assert_eq!(
                fetched.updated_at.timestamp_millis(),
                created.updated_at.timestamp_millis()
            );
        }
    });
}

#[test]
fn create_accepts_dangling_parent() {
    with_each_store(|store| {
        let item = store.create(ToDoItemFields::new("orphan", "999")).unwrap();
        assert_eq!(item.parent.as_deref(), Some("999"));
        assert!(store.get_parent(&item).unwrap().is_none());
    });
}

#[test]
fn get_by_id_missing_is_not_found() {
    with_each_store(|store| {
        let err = store.get_by_id(12345).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(12345)));
        assert!(store.find(12345).unwrap().is_none());
    });
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn list_all_returns_every_record() {
    with_each_store(|store| {
        assert!(store.list_all().unwrap().is_empty());
        let a = store.create(ToDoItemFields::new("a", ROOT_PARENT)).unwrap();
        let b = store.create(ToDoItemFields::new("b", "1")).unwrap();
        assert_eq!(ids(&store.list_all().unwrap()), ids(&[a, b]));
    });
}

#[test]
fn list_children_matches_parent_exactly() {
    with_each_store(|store| {
        let root = store.create(ToDoItemFields::new("root", ROOT_PARENT)).unwrap();
        let key = root.child_key();
        let c1 = store.create(ToDoItemFields::new("c1", key.clone())).unwrap();
        let c2 = store.create(ToDoItemFields::new("c2", key.clone())).unwrap();
        store.create(ToDoItemFields::new("other", "77")).unwrap();
        store.create(ToDoItemFields::default()).unwrap();

        let children = store.list_children(&key).unwrap();
        assert_eq!(ids(&children), ids(&[c1, c2]));
        assert!(children.iter().all(|c| c.parent.as_deref() == Some(key.as_str())));

        let roots = store.list_children(ROOT_PARENT).unwrap();
        assert_eq!(ids(&roots), ids(&[root]));
    });
}

#[test]
fn list_children_without_matches_is_empty() {
    with_each_store(|store| {
        store.create(ToDoItemFields::new("a", ROOT_PARENT)).unwrap();
        assert!(store.list_children("555").unwrap().is_empty());
    });
}

// ---------------------------------------------------------------------------
// Parent resolution
// ---------------------------------------------------------------------------

#[test]
fn get_parent_is_absent_for_root_malformed_and_null() {
    with_each_store(|store| {
        let root = store.create(ToDoItemFields::new("root", ROOT_PARENT)).unwrap();
        let malformed = store.create(ToDoItemFields::new("bad", "not-an-id")).unwrap();
        let null_parent = store.create(ToDoItemFields::default()).unwrap();

        assert!(store.get_parent(&root).unwrap().is_none());
        assert!(store.get_parent(&malformed).unwrap().is_none());
        assert!(store.get_parent(&null_parent).unwrap().is_none());
    });
}

#[test]
fn root_and_child_scenario() {
    with_each_store(|store| {
        let a = store.create(ToDoItemFields::new("root", "0")).unwrap();
        assert_eq!(a.id, 1);
        let b = store.create(ToDoItemFields::new("child", "1")).unwrap();
        assert_eq!(b.id, 2);

        assert_eq!(ids(&store.list_children("1").unwrap()), ids(&[b.clone()]));
        assert_eq!(store.get_parent(&b).unwrap().map(|p| p.id), Some(a.id));
        assert_eq!(store.get_parent(&a).unwrap(), None);

        store.delete(1).unwrap();
        assert!(matches!(store.get_by_id(1), Err(StoreError::NotFound(1))));
        assert_eq!(store.get_parent(&b).unwrap(), None);
    });
}

#[test]
fn cycles_are_stored_as_is() {
    with_each_store(|store| {
        let a = store.create(ToDoItemFields::new("a", "2")).unwrap();
        let b = store.create(ToDoItemFields::new("b", a.child_key())).unwrap();
        assert_eq!(b.id, 2);
        assert_eq!(store.get_parent(&a).unwrap().map(|p| p.id), Some(b.id));
        assert_eq!(store.get_parent(&b).unwrap().map(|p| p.id), Some(a.id));
    });
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_replaces_mutable_fields() {
    with_each_store(|store| {
        let created = store
            .create(ToDoItemFields::new("before", ROOT_PARENT).with_priority(5))
            .unwrap();
        let updated = store
            .update(created.id, ToDoItemFields::new("after", "8"))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title.as_deref(), Some("after"));
        assert_eq!(updated.parent.as_deref(), Some("8"));
        assert_eq!(updated.priority, None);
        assert_eq!(
            updated.created_at.timestamp_millis(),
            created.created_at.timestamp_millis()
        );
        assert!(updated.updated_at >= created.updated_at);

        let fetched = store.get_by_id(created.id).unwrap();
        assert_eq!(fetched.title, updated.title);
        assert_eq!(fetched.parent, updated.parent);
        assert_eq!(fetched.priority, None);
    });
}

#[test]
fn update_missing_is_not_found() {
    with_each_store(|store| {
        let err = store.update(3, ToDoItemFields::new("x", "0")).unwrap_err();
        assert!(err.is_not_found());
    });
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_does_not_cascade() {
    with_each_store(|store| {
        let parent = store.create(ToDoItemFields::new("parent", ROOT_PARENT)).unwrap();
        let child = store
            .create(ToDoItemFields::new("child", parent.child_key()).with_priority(1))
            .unwrap();

        store.delete(parent.id).unwrap();

        assert!(store.get_by_id(parent.id).unwrap_err().is_not_found());
        let still_there = store.get_by_id(child.id).unwrap();
        assert_eq!(still_there.parent, child.parent);
        assert_eq!(still_there.title, child.title);
        assert_eq!(still_there.priority, child.priority);
        assert_eq!(store.list_children(&parent.child_key()).unwrap().len(), 1);
        assert!(store.get_parent(&still_there).unwrap().is_none());
    });
}

#[test]
fn delete_missing_is_not_found() {
    with_each_store(|store| {
        let item = store.create(ToDoItemFields::new("once", ROOT_PARENT)).unwrap();
        store.delete(item.id).unwrap();
        assert!(matches!(store.delete(item.id), Err(StoreError::NotFound(_))));
    });
}

// ---------------------------------------------------------------------------
// Bulk insert
// ---------------------------------------------------------------------------

#[test]
fn create_many_inserts_title_only_records() {
    with_each_store(|store| {
        let created = store
            .create_many(vec![BulkToDoItem::new("x"), BulkToDoItem::new("y")])
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
        let titles: BTreeSet<_> = all.iter().filter_map(|i| i.title.clone()).collect();
        assert_eq!(titles, BTreeSet::from(["x".to_string(), "y".to_string()]));
        for item in &all {
            assert!(item.parent.is_none());
            assert!(item.priority.is_none());
            assert_eq!(item.created_at, item.updated_at);
        }
    });
}

#[test]
fn create_many_empty_batch_is_noop() {
    with_each_store(|store| {
        assert!(store.create_many(Vec::new()).unwrap().is_empty());
        assert!(store.list_all().unwrap().is_empty());
    });
}
