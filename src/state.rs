//! Composition root wiring SQLite repositories into services.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::services::{AccountService, FeedService, PostService, ReactionService};
use crate::infrastructure::persistence::{
    SqliteAnswerRepository, SqliteAuthorRepository, SqliteQuestionRepository,
    SqliteReactionRepository, SqliteTagRepository,
};

pub type SqliteAccountService = AccountService<SqliteAuthorRepository>;
pub type SqlitePostService =
    PostService<SqliteQuestionRepository, SqliteAnswerRepository, SqliteAuthorRepository>;
pub type SqliteReactionService =
    ReactionService<SqliteReactionRepository, SqliteAuthorRepository>;
pub type SqliteFeedService = FeedService<
    SqliteQuestionRepository,
    SqliteAnswerRepository,
    SqliteTagRepository,
    SqliteAuthorRepository,
>;

/// All services wired against one database pool.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<SqliteAccountService>,
    pub posts: Arc<SqlitePostService>,
    pub reactions: Arc<SqliteReactionService>,
    pub feed: Arc<SqliteFeedService>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);

        let authors = Arc::new(SqliteAuthorRepository::new(pool.clone()));
        let tags = Arc::new(SqliteTagRepository::new(pool.clone()));
        let questions = Arc::new(SqliteQuestionRepository::new(pool.clone()));
        let answers = Arc::new(SqliteAnswerRepository::new(pool.clone()));
        let reactions = Arc::new(SqliteReactionRepository::new(pool.clone()));

        Self {
            accounts: Arc::new(AccountService::new(authors.clone())),
            posts: Arc::new(PostService::new(
                questions.clone(),
                answers.clone(),
                authors.clone(),
            )),
            reactions: Arc::new(ReactionService::new(reactions, authors.clone())),
            feed: Arc::new(FeedService::new(questions, answers, tags, authors)),
        }
    }
}
