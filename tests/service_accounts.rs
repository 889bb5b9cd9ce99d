mod common;

use askboard::prelude::*;
use sqlx::SqlitePool;

#[sqlx::test]
async fn test_register_creates_zeroed_profile(pool: SqlitePool) {
    let state = common::state(&pool);

    let (user, author) = common::register_account(&state, "alice").await;

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(author.user_id, user.id);
    assert_eq!(author.count, 0);
    assert_eq!(author.avatar, "static/img/user.png");
}

#[sqlx::test]
async fn test_author_lookup_by_user(pool: SqlitePool) {
    let state = common::state(&pool);

    let (user, author) = common::register_account(&state, "alice").await;

    let found = state.accounts.author_of(user.id).await.unwrap().unwrap();
    assert_eq!(found.id, author.id);

    assert!(state.accounts.author_of(user.id + 99).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_one_author_per_user(pool: SqlitePool) {
    let state = common::state(&pool);

    let author = common::register(&state, "alice").await;

    let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors WHERE user_id = ?")
        .bind(author.user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(authors, 1);
}

#[sqlx::test]
async fn test_duplicate_username_is_conflict(pool: SqlitePool) {
    let state = common::state(&pool);

    common::register(&state, "alice").await;

    let result = state
        .accounts
        .register(RegisterCommand {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            name: "Other Alice".to_string(),
            avatar: None,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));

    // the failed registration must not leave a dangling user row
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

#[sqlx::test]
async fn test_update_profile_partial(pool: SqlitePool) {
    let state = common::state(&pool);

    let author = common::register(&state, "alice").await;

    let updated = state
        .accounts
        .update_profile(
            author.user_id,
            UpdateProfileCommand {
                name: Some("Alice Cooper".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Alice Cooper");

    // untouched fields stay as registered
    let username: String = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
        .bind(author.user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(username, "alice");
}

#[sqlx::test]
async fn test_update_profile_unknown_user(pool: SqlitePool) {
    let state = common::state(&pool);

    let result = state
        .accounts
        .update_profile(
            999,
            UpdateProfileCommand {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[sqlx::test]
async fn test_update_username_to_taken_is_conflict(pool: SqlitePool) {
    let state = common::state(&pool);

    common::register(&state, "alice").await;
    let bob = common::register(&state, "bob").await;

    let result = state
        .accounts
        .update_profile(
            bob.user_id,
            UpdateProfileCommand {
                username: Some("alice".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}
