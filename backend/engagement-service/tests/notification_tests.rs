mod common;

use engagement_service::error::AppError;
use engagement_service::models::NotificationKind;
use uuid::Uuid;

#[tokio::test]
async fn listing_marks_notifications_viewed_but_not_read() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();

    let first = state.notifications.list(bob, 50, 0).await.unwrap();
    assert_eq!(first.len(), 1);
    assert!(first[0].viewed);
    assert!(!first[0].read);

    // The viewed flip is durable and the read axis is untouched
    let second = state.notifications.list(bob, 50, 0).await.unwrap();
    assert!(second[0].viewed);
    assert!(!second[0].read);
    assert_eq!(state.notifications.unread_count(bob).await.unwrap(), 1);
}

#[tokio::test]
async fn unread_listing_does_not_mark_viewed() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();

    let unread = state.notifications.list_unread(bob).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert!(!unread[0].viewed);
}

#[tokio::test]
async fn mark_read_is_recipient_only() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    let id = state.notifications.list(bob, 50, 0).await.unwrap()[0].id;

    let err = state.notifications.mark_read(id, alice).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let marked = state.notifications.mark_read(id, bob).await.unwrap();
    assert!(marked.read);
    assert_eq!(state.notifications.unread_count(bob).await.unwrap(), 0);
}

#[tokio::test]
async fn mark_read_unknown_id_is_not_found() {
    let (state, repo) = common::test_state();
    let bob = repo.add_user("bob");

    let err = state
        .notifications
        .mark_read(Uuid::new_v4(), bob)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn mark_all_read_reports_flip_count() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let carol = repo.add_user("carol");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    state.relationships.follow(carol, bob).await.unwrap();

    assert_eq!(state.notifications.mark_all_read(bob).await.unwrap(), 2);
    assert_eq!(state.notifications.mark_all_read(bob).await.unwrap(), 0);
    assert_eq!(state.notifications.unread_count(bob).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_is_recipient_only() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    let id = state.notifications.list(bob, 50, 0).await.unwrap()[0].id;

    let err = state.notifications.delete(id, alice).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    state.notifications.delete(id, bob).await.unwrap();
    assert!(state.notifications.list(bob, 50, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn notifications_list_newest_first() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state.relationships.follow(alice, bob).await.unwrap();
    state.engagement.toggle_like(post, alice).await.unwrap();

    let notifications = state.notifications.list(bob, 50, 0).await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].kind, NotificationKind::Like);
    assert_eq!(notifications[1].kind, NotificationKind::Follow);
}

#[tokio::test]
async fn direct_emit_round_trips_through_store() {
    let (state, repo) = common::test_state();
    let bob = repo.add_user("bob");

    state
        .notifications
        .emit(
            bob,
            NotificationKind::System,
            "welcome to the platform".to_string(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let unread = state.notifications.list_unread(bob).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].kind, NotificationKind::System);
    assert_eq!(unread[0].message, "welcome to the platform");
}
