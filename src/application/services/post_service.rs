//! Question and answer posting service.

use std::sync::Arc;

use crate::application::commands::{PostAnswerCommand, PostQuestionCommand};
use crate::domain::entities::{Answer, NewAnswer, NewQuestion, Question};
use crate::domain::repositories::{AnswerRepository, AuthorRepository, QuestionRepository};
use crate::error::AppError;
use crate::utils::tag_tokens::parse_tag_list;
use serde_json::json;
use validator::Validate;

/// Service for the content write path.
///
/// Validates commands, parses tag lists, resolves the acting author, and
/// hands the prepared input to the repositories, whose single-transaction
/// operations keep the denormalized counters in step with the inserted
/// rows.
pub struct PostService<Q: QuestionRepository, A: AnswerRepository, U: AuthorRepository> {
    questions: Arc<Q>,
    answers: Arc<A>,
    authors: Arc<U>,
}

impl<Q: QuestionRepository, A: AnswerRepository, U: AuthorRepository> PostService<Q, A, U> {
    pub fn new(questions: Arc<Q>, answers: Arc<A>, authors: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            authors,
        }
    }

    /// Posts a question on behalf of `author_id`.
    ///
    /// Duplicate tag tokens in one submission collapse to a single
    /// association, so each distinct tag's counter moves by exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty/oversized title, empty
    /// body, or malformed tag token; [`AppError::NotFound`] if the author
    /// does not exist.
    pub async fn post_question(
        &self,
        author_id: i64,
        cmd: PostQuestionCommand,
    ) -> Result<Question, AppError> {
        cmd.validate()?;
        let tags = parse_tag_list(&cmd.tags)?;

        self.ensure_author(author_id).await?;

        let question = self
            .questions
            .create(NewQuestion {
                author_id,
                title: cmd.title,
                body: cmd.body,
                tags,
            })
            .await?;

        tracing::info!(question_id = question.id, author_id, "question posted");
        Ok(question)
    }

    /// Posts an answer on behalf of `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty body;
    /// [`AppError::NotFound`] if the author or the question does not exist.
    /// When the question is gone, no counter is touched.
    pub async fn post_answer(
        &self,
        author_id: i64,
        cmd: PostAnswerCommand,
    ) -> Result<Answer, AppError> {
        cmd.validate()?;

        self.ensure_author(author_id).await?;

        let answer = self
            .answers
            .create(NewAnswer {
                question_id: cmd.question_id,
                author_id,
                body: cmd.body,
            })
            .await?;

        tracing::info!(
            answer_id = answer.id,
            question_id = answer.question_id,
            author_id,
            "answer posted"
        );
        Ok(answer)
    }

    async fn ensure_author(&self, author_id: i64) -> Result<(), AppError> {
        self.authors
            .find_by_id(author_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                AppError::not_found("Author not found", json!({ "author_id": author_id }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Author;
    use crate::domain::repositories::{
        MockAnswerRepository, MockAuthorRepository, MockQuestionRepository,
    };
    use chrono::Utc;

    fn test_author(id: i64) -> Author {
        Author {
            id,
            user_id: id,
            name: "Alice".to_string(),
            avatar: "static/img/user.png".to_string(),
            count: 0,
        }
    }

    fn test_question(id: i64, author_id: i64) -> Question {
        Question {
            id,
            title: "Title".to_string(),
            body: "Body".to_string(),
            author_id,
            created_at: Utc::now(),
            rating: 0,
        }
    }

    fn question_cmd(title: &str, body: &str, tags: &str) -> PostQuestionCommand {
        PostQuestionCommand {
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.to_string(),
        }
    }

    fn service(
        questions: MockQuestionRepository,
        answers: MockAnswerRepository,
        authors: MockAuthorRepository,
    ) -> PostService<MockQuestionRepository, MockAnswerRepository, MockAuthorRepository> {
        PostService::new(Arc::new(questions), Arc::new(answers), Arc::new(authors))
    }

    #[tokio::test]
    async fn test_post_question_passes_parsed_tags() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        authors
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_author(id))));

        questions
            .expect_create()
            .withf(|new_question| new_question.tags == ["python", "django"])
            .times(1)
            .returning(|nq| Ok(test_question(1, nq.author_id)));

        let result = service(questions, answers, authors)
            .post_question(1, question_cmd("Title", "Body", "python django"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_post_question_collapses_duplicate_tokens() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        authors
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_author(id))));

        questions
            .expect_create()
            .withf(|new_question| new_question.tags == ["python"])
            .times(1)
            .returning(|nq| Ok(test_question(1, nq.author_id)));

        let result = service(questions, answers, authors)
            .post_question(1, question_cmd("Title", "Body", "python python"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_post_question_empty_title_short_circuits() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        questions.expect_create().times(0);
        authors.expect_find_by_id().times(0);

        let result = service(questions, answers, authors)
            .post_question(1, question_cmd("", "Body", ""))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_post_question_bad_tag_short_circuits() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        questions.expect_create().times(0);
        authors.expect_find_by_id().times(0);

        let result = service(questions, answers, authors)
            .post_question(1, question_cmd("Title", "Body", "ok,bad"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_post_question_unknown_author() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        authors.expect_find_by_id().times(1).returning(|_| Ok(None));
        questions.expect_create().times(0);

        let result = service(questions, answers, authors)
            .post_question(99, question_cmd("Title", "Body", ""))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_post_answer_success() {
        let questions = MockQuestionRepository::new();
        let mut answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        authors
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_author(id))));

        answers
            .expect_create()
            .withf(|na| na.question_id == 7 && na.author_id == 2)
            .times(1)
            .returning(|na| {
                Ok(Answer {
                    id: 1,
                    question_id: na.question_id,
                    author_id: na.author_id,
                    body: na.body.clone(),
                    created_at: Utc::now(),
                    rating: 0,
                    is_correct: false,
                })
            });

        let result = service(questions, answers, authors)
            .post_answer(
                2,
                PostAnswerCommand {
                    question_id: 7,
                    body: "Use a scope.".to_string(),
                },
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().question_id, 7);
    }

    #[tokio::test]
    async fn test_post_answer_missing_question_propagates_not_found() {
        let questions = MockQuestionRepository::new();
        let mut answers = MockAnswerRepository::new();
        let mut authors = MockAuthorRepository::new();

        authors
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_author(id))));

        answers.expect_create().times(1).returning(|_| {
            Err(AppError::not_found(
                "Question not found",
                serde_json::json!({ "question_id": 404 }),
            ))
        });

        let result = service(questions, answers, authors)
            .post_answer(
                2,
                PostAnswerCommand {
                    question_id: 404,
                    body: "Too late.".to_string(),
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
