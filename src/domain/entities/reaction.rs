//! Reaction entities: up/down votes on questions and answers.
//!
//! Reactions are append-only. Casting a reaction always inserts a new row
//! and shifts the target rating by that row's delta; a prior reaction from
//! the same author is neither looked up nor replaced, so repeated votes
//! accumulate independent deltas.

use serde::{Deserialize, Serialize};

/// The state recorded by a single reaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionState {
    Up,
    Down,
    Retracted,
}

impl ReactionState {
    /// Rating delta contributed by a reaction in this state.
    pub fn delta(self) -> i64 {
        match self {
            ReactionState::Up => 1,
            ReactionState::Down => -1,
            ReactionState::Retracted => 0,
        }
    }

    /// Storage encoding: up is `true`, down is `false`, retracted is NULL.
    pub fn to_db(self) -> Option<bool> {
        match self {
            ReactionState::Up => Some(true),
            ReactionState::Down => Some(false),
            ReactionState::Retracted => None,
        }
    }

    pub fn from_db(state: Option<bool>) -> Self {
        match state {
            Some(true) => ReactionState::Up,
            Some(false) => ReactionState::Down,
            None => ReactionState::Retracted,
        }
    }
}

/// What a reaction is being cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTarget {
    Question(i64),
    Answer(i64),
}

/// A recorded reaction on a question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionReaction {
    pub id: i64,
    pub author_id: i64,
    pub question_id: i64,
    pub state: ReactionState,
}

/// A recorded reaction on an answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReaction {
    pub id: i64,
    pub author_id: i64,
    pub answer_id: i64,
    pub state: ReactionState,
}
