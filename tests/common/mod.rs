#![allow(dead_code)]

use askboard::prelude::*;
use sqlx::SqlitePool;

pub fn state(pool: &SqlitePool) -> AppState {
    AppState::new(pool.clone())
}

pub async fn register(state: &AppState, username: &str) -> Author {
    register_account(state, username).await.1
}

pub async fn register_account(state: &AppState, username: &str) -> (User, Author) {
    state
        .accounts
        .register(RegisterCommand {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            name: username.to_string(),
            avatar: None,
        })
        .await
        .unwrap()
}

pub fn question_cmd(title: &str, body: &str, tags: &str) -> PostQuestionCommand {
    PostQuestionCommand {
        title: title.to_string(),
        body: body.to_string(),
        tags: tags.to_string(),
    }
}

pub fn answer_cmd(question_id: i64, body: &str) -> PostAnswerCommand {
    PostAnswerCommand {
        question_id,
        body: body.to_string(),
    }
}

pub async fn post_question(state: &AppState, author_id: i64, title: &str, tags: &str) -> Question {
    state
        .posts
        .post_question(author_id, question_cmd(title, "Body text.", tags))
        .await
        .unwrap()
}

pub async fn post_answer(state: &AppState, author_id: i64, question_id: i64) -> Answer {
    state
        .posts
        .post_answer(author_id, answer_cmd(question_id, "An answer."))
        .await
        .unwrap()
}

pub async fn author_count(pool: &SqlitePool, author_id: i64) -> i64 {
    sqlx::query_scalar("SELECT count FROM authors WHERE id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn tag_count(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT count FROM tags WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn question_rating(pool: &SqlitePool, question_id: i64) -> i64 {
    sqlx::query_scalar("SELECT rating FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn answer_rating(pool: &SqlitePool, answer_id: i64) -> i64 {
    sqlx::query_scalar("SELECT rating FROM answers WHERE id = ?")
        .bind(answer_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
