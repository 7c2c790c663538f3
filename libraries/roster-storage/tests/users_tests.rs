use roster_core::{NewUser, RosterError, UserPatch, UserStore};
use roster_storage::SqliteUserStore;

use test_helpers::TestDb;

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser::new(name, email).unwrap()
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let alice = roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();
    let bob = roster_storage::users::create(pool, &new_user("bob", "b@x.com"))
        .await
        .unwrap();

    assert_eq!(alice.id, 1);
    assert_eq!(bob.id, 2);
}

#[tokio::test]
async fn test_get_after_create_returns_equal_record() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let created = roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    let fetched = roster_storage::users::get_by_id(pool, created.id)
        .await
        .unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn test_duplicate_name_conflicts_and_leaves_table_unchanged() {
    let db = TestDb::new().await;
    let pool = db.pool();

    roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();
    let before = roster_storage::users::get_all(pool).await.unwrap();

    let err = roster_storage::users::create(pool, &new_user("alice", "b@x.com"))
        .await
        .unwrap_err();
    match err {
        RosterError::Conflict { field, value } => {
            assert_eq!(field, "name");
            assert_eq!(value, "alice");
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    let after = roster_storage::users::get_all(pool).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let db = TestDb::new().await;
    let pool = db.pool();

    roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    let err = roster_storage::users::create(pool, &new_user("bob", "a@x.com"))
        .await
        .unwrap_err();
    match err {
        RosterError::Conflict { field, value } => {
            assert_eq!(field, "email");
            assert_eq!(value, "a@x.com");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_all_preserves_insertion_order() {
    let db = TestDb::new().await;
    let pool = db.pool();

    // Deliberately out of alphabetical order
    roster_storage::users::create(pool, &new_user("zoe", "z@x.com"))
        .await
        .unwrap();
    roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();
    roster_storage::users::create(pool, &new_user("mallory", "m@x.com"))
        .await
        .unwrap();

    let all = roster_storage::users::get_all(pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["zoe", "alice", "mallory"]);
}

#[tokio::test]
async fn test_replace_updates_both_fields() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let created = roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    let updated =
        roster_storage::users::replace(pool, created.id, &new_user("alicia", "alicia@x.com"))
            .await
            .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "alicia");
    assert_eq!(updated.email, "alicia@x.com");
}

#[tokio::test]
async fn test_replace_missing_id_is_not_found() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let err = roster_storage::users::replace(pool, 42, &new_user("alice", "a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::UserNotFound(42)));
}

#[tokio::test]
async fn test_replace_to_taken_name_conflicts() {
    let db = TestDb::new().await;
    let pool = db.pool();

    roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();
    let bob = roster_storage::users::create(pool, &new_user("bob", "b@x.com"))
        .await
        .unwrap();

    let err = roster_storage::users::replace(pool, bob.id, &new_user("alice", "b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::Conflict { .. }));
}

#[tokio::test]
async fn test_patch_updates_only_present_fields() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let created = roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    let patch = UserPatch::new(None, Some("new@x.com".to_string())).unwrap();
    let updated = roster_storage::users::apply_patch(pool, created.id, &patch)
        .await
        .unwrap();

    assert_eq!(updated.name, "alice");
    assert_eq!(updated.email, "new@x.com");
}

#[tokio::test]
async fn test_empty_patch_is_a_no_op_and_idempotent() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let created = roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    let patch = UserPatch::default();
    let first = roster_storage::users::apply_patch(pool, created.id, &patch)
        .await
        .unwrap();
    let second = roster_storage::users::apply_patch(pool, created.id, &patch)
        .await
        .unwrap();

    assert_eq!(first, created);
    assert_eq!(second, created);
}

#[tokio::test]
async fn test_patch_missing_id_is_not_found() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let patch = UserPatch::new(Some("alice".to_string()), None).unwrap();
    let err = roster_storage::users::apply_patch(pool, 7, &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::UserNotFound(7)));
}

#[tokio::test]
async fn test_remove_then_get_is_absent() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let created = roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();

    roster_storage::users::remove(pool, created.id).await.unwrap();

    let fetched = roster_storage::users::get_by_id(pool, created.id)
        .await
        .unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn test_remove_missing_id_is_not_found() {
    let db = TestDb::new().await;
    let pool = db.pool();

    let err = roster_storage::users::remove(pool, 1).await.unwrap_err();
    assert!(matches!(err, RosterError::UserNotFound(1)));
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let db = TestDb::new().await;
    let pool = db.pool();

    roster_storage::users::create(pool, &new_user("alice", "a@x.com"))
        .await
        .unwrap();
    let bob = roster_storage::users::create(pool, &new_user("bob", "b@x.com"))
        .await
        .unwrap();

    roster_storage::users::remove(pool, bob.id).await.unwrap();

    let carol = roster_storage::users::create(pool, &new_user("carol", "c@x.com"))
        .await
        .unwrap();
    assert!(carol.id > bob.id);
}

#[tokio::test]
async fn test_store_trait_round_trip() {
    let db = TestDb::new().await;
    let store = SqliteUserStore::new(db.pool().clone());

    let created = store.create(new_user("alice", "a@x.com")).await.unwrap();
    assert_eq!(store.get(created.id).await.unwrap(), Some(created.clone()));

    let replaced = store
        .replace(created.id, new_user("alicia", "alicia@x.com"))
        .await
        .unwrap();
    assert_eq!(replaced.name, "alicia");

    store.remove(created.id).await.unwrap();
    assert_eq!(store.get(created.id).await.unwrap(), None);
    assert!(store.list().await.unwrap().is_empty());
}
