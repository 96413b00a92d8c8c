mod common;

use engagement_service::error::AppError;
use engagement_service::models::NotificationKind;
use uuid::Uuid;

#[tokio::test]
async fn toggle_like_flips_state_each_call() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    let status = state.engagement.toggle_like(post, alice).await.unwrap();
    assert!(status.liked);
    assert_eq!(status.like_count, 1);

    let status = state.engagement.toggle_like(post, alice).await.unwrap();
    assert!(!status.liked);
    assert_eq!(status.like_count, 0);

    let status = state.engagement.toggle_like(post, alice).await.unwrap();
    assert!(status.liked);
    assert_eq!(status.like_count, 1);
}

#[tokio::test]
async fn like_unknown_post_is_not_found() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");

    let err = state
        .engagement
        .toggle_like(Uuid::new_v4(), alice)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn like_notifies_post_author() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state.engagement.toggle_like(post, alice).await.unwrap();

    let notifications = state.notifications.list(bob, 50, 0).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Like);
    assert_eq!(notifications[0].message, "alice liked your post");
    assert_eq!(notifications[0].related_item_id, Some(post));
}

#[tokio::test]
async fn liking_own_post_does_not_notify() {
    let (state, repo) = common::test_state();
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state.engagement.toggle_like(post, bob).await.unwrap();

    assert_eq!(state.notifications.unread_count(bob).await.unwrap(), 0);
}

#[tokio::test]
async fn unlike_does_not_notify() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state.engagement.toggle_like(post, alice).await.unwrap();
    state.engagement.toggle_like(post, alice).await.unwrap();

    // Only the like transition produced a notification
    let notifications = state.notifications.list(bob, 50, 0).await.unwrap();
    assert_eq!(notifications.len(), 1);
}

#[tokio::test]
async fn list_likers_returns_profiles() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let carol = repo.add_user("carol");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state.engagement.toggle_like(post, alice).await.unwrap();
    state.engagement.toggle_like(post, carol).await.unwrap();

    let likers = state.engagement.list_likers(post, 50, 0).await.unwrap();
    let names: Vec<&str> = likers.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "alice"]);
}

#[tokio::test]
async fn add_comment_returns_view_and_notifies_author() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    let view = state
        .engagement
        .add_comment(post, alice, "great shot!")
        .await
        .unwrap();
    assert_eq!(view.comment.body, "great shot!");
    assert!(!view.comment.edited);
    assert_eq!(view.author.as_ref().unwrap().username, "alice");

    let notifications = state.notifications.list(bob, 50, 0).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Comment);
    assert_eq!(
        notifications[0].message,
        "alice commented on your post: \"great shot!\""
    );
}

#[tokio::test]
async fn comment_notification_preview_is_truncated() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    let long_body = "x".repeat(120);
    state
        .engagement
        .add_comment(post, alice, &long_body)
        .await
        .unwrap();

    let notifications = state.notifications.list(bob, 50, 0).await.unwrap();
    assert!(notifications[0].message.ends_with("...\""));
    assert!(notifications[0].message.len() < long_body.len());
}

#[tokio::test]
async fn commenting_on_own_post_does_not_notify() {
    let (state, repo) = common::test_state();
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state
        .engagement
        .add_comment(post, bob, "first!")
        .await
        .unwrap();

    assert_eq!(state.notifications.unread_count(bob).await.unwrap(), 0);
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    let err = state
        .engagement
        .add_comment(post, alice, "   \n ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn only_the_author_can_edit_a_comment() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    let view = state
        .engagement
        .add_comment(post, alice, "original")
        .await
        .unwrap();
    let comment_id = view.comment.id;

    let err = state
        .engagement
        .edit_comment(comment_id, bob, "hijacked")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let edited = state
        .engagement
        .edit_comment(comment_id, alice, "revised")
        .await
        .unwrap();
    assert_eq!(edited.body, "revised");
    assert!(edited.edited);
}

#[tokio::test]
async fn comment_author_and_post_author_can_delete() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let carol = repo.add_user("carol");
    let post = repo.add_post(bob);

    let first = state
        .engagement
        .add_comment(post, alice, "one")
        .await
        .unwrap();
    let second = state
        .engagement
        .add_comment(post, alice, "two")
        .await
        .unwrap();

    // Unrelated user may not delete
    let err = state
        .engagement
        .delete_comment(first.comment.id, carol)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Comment author deletes own comment
    let remaining = state
        .engagement
        .delete_comment(first.comment.id, alice)
        .await
        .unwrap();
    assert_eq!(remaining, 1);

    // Post author moderates the other comment away
    let remaining = state
        .engagement
        .delete_comment(second.comment.id, bob)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn delete_missing_comment_is_not_found() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");

    let err = state
        .engagement
        .delete_comment(Uuid::new_v4(), alice)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn comments_list_oldest_first_with_authors() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let carol = repo.add_user("carol");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state
        .engagement
        .add_comment(post, alice, "first")
        .await
        .unwrap();
    state
        .engagement
        .add_comment(post, carol, "second")
        .await
        .unwrap();

    let comments = state.engagement.list_comments(post, 50, 0).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment.body, "first");
    assert_eq!(comments[0].author.as_ref().unwrap().username, "alice");
    assert_eq!(comments[1].comment.body, "second");
}

#[tokio::test]
async fn comment_author_profile_gone_yields_none() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let post = repo.add_post(bob);

    state
        .engagement
        .add_comment(post, alice, "hello")
        .await
        .unwrap();
    repo.remove_user(alice);

    let comments = state.engagement.list_comments(post, 50, 0).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].author.is_none());
}
