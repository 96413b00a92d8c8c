mod common;

use engagement_service::error::AppError;
use engagement_service::models::NotificationKind;
use uuid::Uuid;

#[tokio::test]
async fn follow_creates_edge_and_reports_fresh_counts() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    let outcome = state.relationships.follow(alice, bob).await.unwrap();
    assert_eq!(outcome.follower_count, 1);
    assert_eq!(outcome.following_count, 1);

    assert!(state.relationships.is_following(alice, bob).await.unwrap());
    assert!(!state.relationships.is_following(bob, alice).await.unwrap());
}

#[tokio::test]
async fn repeat_follow_is_idempotent() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    let outcome = state.relationships.follow(alice, bob).await.unwrap();

    assert_eq!(outcome.follower_count, 1);
    assert_eq!(outcome.following_count, 1);
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");

    let err = state.relationships.follow(alice, alice).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn follow_unknown_user_is_not_found() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");

    let err = state
        .relationships
        .follow(alice, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn unfollow_removes_edge_and_tolerates_absence() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    let outcome = state.relationships.unfollow(alice, bob).await.unwrap();
    assert_eq!(outcome.follower_count, 0);
    assert_eq!(outcome.following_count, 0);
    assert!(!state.relationships.is_following(alice, bob).await.unwrap());

    // No edge to remove: still succeeds with unchanged counts
    let outcome = state.relationships.unfollow(alice, bob).await.unwrap();
    assert_eq!(outcome.follower_count, 0);
}

#[tokio::test]
async fn follower_and_following_lists_resolve_profiles() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let carol = repo.add_user("carol");

    state.relationships.follow(alice, bob).await.unwrap();
    state.relationships.follow(carol, bob).await.unwrap();

    let followers = state.relationships.list_followers(bob, 50, 0).await.unwrap();
    let names: Vec<&str> = followers.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "alice"]);

    let following = state.relationships.list_following(alice, 50, 0).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].username, "bob");
}

#[tokio::test]
async fn follower_list_pagination() {
    let (state, repo) = common::test_state();
    let bob = repo.add_user("bob");
    for i in 0..5 {
        let user = repo.add_user(&format!("user{}", i));
        state.relationships.follow(user, bob).await.unwrap();
    }

    let page = state.relationships.list_followers(bob, 2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].username, "user4");

    let page = state.relationships.list_followers(bob, 2, 4).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].username, "user0");
}

#[tokio::test]
async fn followers_whose_profile_is_gone_are_skipped() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let carol = repo.add_user("carol");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    state.relationships.follow(carol, bob).await.unwrap();
    repo.remove_user(carol);

    let followers = state.relationships.list_followers(bob, 50, 0).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "alice");
}

#[tokio::test]
async fn new_follow_notifies_target_exactly_once() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");

    state.relationships.follow(alice, bob).await.unwrap();
    state.relationships.follow(alice, bob).await.unwrap();

    let notifications = state.notifications.list(bob, 50, 0).await.unwrap();
    assert_eq!(notifications.len(), 1);
    let n = &notifications[0];
    assert_eq!(n.kind, NotificationKind::Follow);
    assert_eq!(n.recipient_id, bob);
    assert_eq!(n.message, "alice started following you");
    assert_eq!(n.triggered_by, Some(alice));
    assert_eq!(n.triggered_by_username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn counts_track_both_directions() {
    let (state, repo) = common::test_state();
    let alice = repo.add_user("alice");
    let bob = repo.add_user("bob");
    let carol = repo.add_user("carol");

    state.relationships.follow(alice, bob).await.unwrap();
    state.relationships.follow(carol, bob).await.unwrap();
    state.relationships.follow(bob, alice).await.unwrap();

    let counts = state.relationships.counts(bob).await.unwrap();
    assert_eq!(counts.follower_count, 2);
    assert_eq!(counts.following_count, 1);
}
