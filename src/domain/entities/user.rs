//! User entity: account identity data.
//!
//! Credential and session handling live outside this crate; a user row only
//! carries the identity fields the board itself needs.

use serde::Serialize;

/// A registered account.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}
