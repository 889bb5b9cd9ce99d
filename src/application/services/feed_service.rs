//! Ranked, paginated read views.

use std::sync::Arc;

use crate::application::pagination::{ANSWERS_PER_PAGE, Page, PageParams, QUESTIONS_PER_PAGE};
use crate::domain::entities::{Answer, Author, Question, Tag};
use crate::domain::repositories::{
    AnswerRepository, AuthorRepository, QuestionRepository, TagRepository,
};
use crate::error::AppError;
use serde_json::json;

/// Number of tags on the popular-tags panel.
pub const POPULAR_TAGS_LIMIT: i64 = 10;

/// Number of authors on the popular-authors panel.
pub const POPULAR_AUTHORS_LIMIT: i64 = 5;

/// A question with its tags and one page of answers.
#[derive(Debug, Clone)]
pub struct QuestionThread {
    pub question: Question,
    pub tags: Vec<Tag>,
    pub answers: Page<Answer>,
}

/// Read-only query service over the board.
///
/// Every listing resolves the requested page against the current total, so
/// out-of-range page numbers clamp instead of erroring, and serves one
/// LIMIT/OFFSET window. Nothing here mutates.
pub struct FeedService<Q, A, T, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    T: TagRepository,
    U: AuthorRepository,
{
    questions: Arc<Q>,
    answers: Arc<A>,
    tags: Arc<T>,
    authors: Arc<U>,
}

impl<Q, A, T, U> FeedService<Q, A, T, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    T: TagRepository,
    U: AuthorRepository,
{
    pub fn new(questions: Arc<Q>, answers: Arc<A>, tags: Arc<T>, authors: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            tags,
            authors,
        }
    }

    /// Questions ordered newest first.
    pub async fn newest_questions(&self, params: &PageParams) -> Result<Page<Question>, AppError> {
        let total = self.questions.count_all().await? as u64;
        let window = params.resolve(total, QUESTIONS_PER_PAGE);
        let items = self
            .questions
            .list_newest(window.limit(), window.offset())
            .await?;
        Ok(Page::new(items, &window))
    }

    /// Questions ordered by rating descending (ties broken by id
    /// ascending).
    pub async fn hottest_questions(&self, params: &PageParams) -> Result<Page<Question>, AppError> {
        let total = self.questions.count_all().await? as u64;
        let window = params.resolve(total, QUESTIONS_PER_PAGE);
        let items = self
            .questions
            .list_hottest(window.limit(), window.offset())
            .await?;
        Ok(Page::new(items, &window))
    }

    /// Questions carrying a tag. An unknown tag yields an empty first page,
    /// never an error.
    pub async fn questions_by_tag(
        &self,
        tag: &str,
        params: &PageParams,
    ) -> Result<Page<Question>, AppError> {
        let total = self.questions.count_by_tag(tag).await? as u64;
        let window = params.resolve(total, QUESTIONS_PER_PAGE);
        let items = self
            .questions
            .list_by_tag(tag, window.limit(), window.offset())
            .await?;
        Ok(Page::new(items, &window))
    }

    /// Questions by one author, best-rated first.
    pub async fn questions_by_author(
        &self,
        author_id: i64,
        params: &PageParams,
    ) -> Result<Page<Question>, AppError> {
        let total = self.questions.count_by_author(author_id).await? as u64;
        let window = params.resolve(total, QUESTIONS_PER_PAGE);
        let items = self
            .questions
            .list_by_author(author_id, window.limit(), window.offset())
            .await?;
        Ok(Page::new(items, &window))
    }

    /// One question with its tags and a page of answers (best-rated first,
    /// 3 per page by default).
    ///
    /// A requested id beyond the newest question falls back to the newest
    /// one; an interior gap (a deleted question between existing ids) is a
    /// real [`AppError::NotFound`].
    pub async fn question_thread(
        &self,
        question_id: i64,
        params: &PageParams,
    ) -> Result<QuestionThread, AppError> {
        let not_found =
            || AppError::not_found("Question not found", json!({ "question_id": question_id }));

        let question = match self.questions.find_by_id(question_id).await? {
            Some(question) => question,
            None => {
                let latest = self.questions.latest_id().await?.ok_or_else(not_found)?;
                if question_id <= latest {
                    return Err(not_found());
                }
                self.questions
                    .find_by_id(latest)
                    .await?
                    .ok_or_else(not_found)?
            }
        };

        let tags = self.questions.tags_of(question.id).await?;

        let total = self.answers.count_for_question(question.id).await? as u64;
        let window = params.resolve(total, ANSWERS_PER_PAGE);
        let answers = self
            .answers
            .list_for_question(question.id, window.limit(), window.offset())
            .await?;

        Ok(QuestionThread {
            question,
            tags,
            answers: Page::new(answers, &window),
        })
    }

    /// Answer total for a question, for listing badges.
    pub async fn answer_count(&self, question_id: i64) -> Result<i64, AppError> {
        self.answers.count_for_question(question_id).await
    }

    /// The ten most used tags.
    pub async fn popular_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tags.popular(POPULAR_TAGS_LIMIT).await
    }

    /// The five most active authors.
    pub async fn popular_authors(&self) -> Result<Vec<Author>, AppError> {
        self.authors.popular(POPULAR_AUTHORS_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockAnswerRepository, MockAuthorRepository, MockQuestionRepository, MockTagRepository,
    };
    use chrono::Utc;

    fn test_question(id: i64) -> Question {
        Question {
            id,
            title: format!("Question {id}"),
            body: "Body".to_string(),
            author_id: 1,
            created_at: Utc::now(),
            rating: 0,
        }
    }

    fn service(
        questions: MockQuestionRepository,
        answers: MockAnswerRepository,
        tags: MockTagRepository,
        authors: MockAuthorRepository,
    ) -> FeedService<
        MockQuestionRepository,
        MockAnswerRepository,
        MockTagRepository,
        MockAuthorRepository,
    > {
        FeedService::new(
            Arc::new(questions),
            Arc::new(answers),
            Arc::new(tags),
            Arc::new(authors),
        )
    }

    #[tokio::test]
    async fn test_newest_resolves_window_against_total() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let tags = MockTagRepository::new();
        let authors = MockAuthorRepository::new();

        questions.expect_count_all().times(1).returning(|| Ok(25));

        // 25 items at 10 per page: page 9999 clamps to page 3, offset 20
        questions
            .expect_list_newest()
            .withf(|limit, offset| *limit == 10 && *offset == 20)
            .times(1)
            .returning(|_, _| Ok(vec![test_question(1)]));

        let page = service(questions, answers, tags, authors)
            .newest_questions(&PageParams::page(9999))
            .await
            .unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.num_pages, 3);
    }

    #[tokio::test]
    async fn test_non_numeric_page_reads_first_window() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let tags = MockTagRepository::new();
        let authors = MockAuthorRepository::new();

        questions.expect_count_all().returning(|| Ok(25));
        questions
            .expect_list_hottest()
            .withf(|limit, offset| *limit == 10 && *offset == 0)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let page = service(questions, answers, tags, authors)
            .hottest_questions(&PageParams::raw("abc"))
            .await
            .unwrap();

        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn test_unknown_tag_yields_empty_page() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let tags = MockTagRepository::new();
        let authors = MockAuthorRepository::new();

        questions
            .expect_count_by_tag()
            .withf(|tag| tag == "nope")
            .returning(|_| Ok(0));
        questions
            .expect_list_by_tag()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let page = service(questions, answers, tags, authors)
            .questions_by_tag("nope", &PageParams::first())
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.num_pages, 1);
    }

    #[tokio::test]
    async fn test_thread_id_past_newest_falls_back_to_newest() {
        let mut questions = MockQuestionRepository::new();
        let mut answers = MockAnswerRepository::new();
        let tags = MockTagRepository::new();
        let authors = MockAuthorRepository::new();

        questions
            .expect_find_by_id()
            .withf(|id| *id == 100)
            .times(1)
            .returning(|_| Ok(None));
        questions.expect_latest_id().times(1).returning(|| Ok(Some(7)));
        questions
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|id| Ok(Some(test_question(id))));
        questions.expect_tags_of().returning(|_| Ok(vec![]));

        answers.expect_count_for_question().returning(|_| Ok(0));
        answers
            .expect_list_for_question()
            .returning(|_, _, _| Ok(vec![]));

        let thread = service(questions, answers, tags, authors)
            .question_thread(100, &PageParams::first())
            .await
            .unwrap();

        assert_eq!(thread.question.id, 7);
    }

    #[tokio::test]
    async fn test_thread_interior_gap_is_not_found() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let tags = MockTagRepository::new();
        let authors = MockAuthorRepository::new();

        questions
            .expect_find_by_id()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(None));
        questions.expect_latest_id().times(1).returning(|| Ok(Some(7)));

        let result = service(questions, answers, tags, authors)
            .question_thread(3, &PageParams::first())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_thread_with_no_questions_is_not_found() {
        let mut questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let tags = MockTagRepository::new();
        let authors = MockAuthorRepository::new();

        questions.expect_find_by_id().returning(|_| Ok(None));
        questions.expect_latest_id().returning(|| Ok(None));

        let result = service(questions, answers, tags, authors)
            .question_thread(1, &PageParams::first())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_popular_panels_use_fixed_limits() {
        let questions = MockQuestionRepository::new();
        let answers = MockAnswerRepository::new();
        let mut tags = MockTagRepository::new();
        let mut authors = MockAuthorRepository::new();

        tags.expect_popular()
            .withf(|limit| *limit == POPULAR_TAGS_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![]));
        authors
            .expect_popular()
            .withf(|limit| *limit == POPULAR_AUTHORS_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![]));

        let feed = service(questions, answers, tags, authors);
        feed.popular_tags().await.unwrap();
        feed.popular_authors().await.unwrap();
    }
}
