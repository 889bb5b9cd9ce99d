//! Business logic services for the application layer.
//!
//! The write path ([`PostService`], [`ReactionService`], [`AccountService`])
//! validates commands and delegates to single-transaction repository
//! operations; the read path ([`FeedService`]) serves ranked, paginated
//! views and never mutates.

pub mod account_service;
pub mod feed_service;
pub mod post_service;
pub mod reaction_service;

pub use account_service::AccountService;
pub use feed_service::{FeedService, QuestionThread};
pub use post_service::PostService;
pub use reaction_service::ReactionService;
