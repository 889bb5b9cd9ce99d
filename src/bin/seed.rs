//! Bulk data seeder for askboard.
//!
//! Fills the database with synthetic users, tags, questions, answers and
//! reactions at configurable volume, for exercising the ranked listings
//! against realistic data sizes.
//!
//! # Usage
//!
//! ```bash
//! # Preset volumes
//! cargo run --bin seed -- --db-size small
//! cargo run --bin seed -- --db-size large -y
//!
//! # Explicit per-entity counts
//! cargo run --bin seed -- --users 50 --tags 30 --questions 200 \
//!     --answers 500 --question-likes 1000 --answer-likes 1000
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default `sqlite://askboard.db`)
//!
//! Rows are inserted in bulk batches, so the per-request counter
//! maintenance is bypassed; afterwards every denormalized aggregate
//! (author counts, tag counts, ratings) is recomputed from the inserted
//! rows in one pass, which leaves the database consistent with what the
//! incremental write path would have produced.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, ValueEnum};
use colored::*;
use dialoguer::Confirm;
use rand::Rng;
use rand::seq::IndexedRandom;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing_subscriber::EnvFilter;

use askboard::config;
use askboard::infrastructure::db;

/// Rows per bulk INSERT statement.
const BATCH_SIZE: usize = 500;

/// Word pool for synthetic names, tags and text.
const WORDS: &[&str] = &[
    "anchor", "basil", "cobalt", "drift", "ember", "fjord", "gable", "harbor", "iris", "juniper",
    "kelp", "lantern", "meadow", "nectar", "onyx", "pebble", "quartz", "raven", "saffron",
    "thistle", "umber", "velvet", "willow", "yarrow", "zephyr", "birch", "cedar", "dune", "elm",
    "fern", "grove", "heath", "inlet", "jade", "knoll", "larch", "moss", "north", "orchid",
    "pine", "quill", "reed", "slate", "tarn", "vale", "wren", "ash", "brook", "cliff", "delta",
];

#[derive(Parser)]
#[command(name = "seed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Preset data volume
    #[arg(long, value_enum, conflicts_with_all = ["users", "tags", "questions", "answers", "question_likes", "answer_likes"])]
    db_size: Option<DbSize>,

    /// Number of users (each gets an author profile)
    #[arg(long)]
    users: Option<u32>,

    /// Number of tags
    #[arg(long)]
    tags: Option<u32>,

    /// Number of questions
    #[arg(long)]
    questions: Option<u32>,

    /// Number of answers
    #[arg(long)]
    answers: Option<u32>,

    /// Number of reactions on questions
    #[arg(long)]
    question_likes: Option<u32>,

    /// Number of reactions on answers
    #[arg(long)]
    answer_likes: Option<u32>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DbSize {
    Small,
    Medium,
    Large,
}

/// Per-entity row counts: users, tags, questions, answers, question
/// reactions, answer reactions.
#[derive(Debug, Clone, Copy)]
struct Volumes {
    users: usize,
    tags: usize,
    questions: usize,
    answers: usize,
    question_likes: usize,
    answer_likes: usize,
}

impl Volumes {
    fn preset(size: DbSize) -> Self {
        match size {
            DbSize::Small => Self {
                users: 100,
                tags: 100,
                questions: 1_000,
                answers: 10_000,
                question_likes: 10_000,
                answer_likes: 10_000,
            },
            DbSize::Medium => Self {
                users: 1_000,
                tags: 1_000,
                questions: 10_000,
                answers: 100_000,
                question_likes: 100_000,
                answer_likes: 1_000_000,
            },
            DbSize::Large => Self {
                users: 10_000,
                tags: 10_000,
                questions: 100_000,
                answers: 1_000_000,
                question_likes: 1_000_000,
                answer_likes: 10_000_000,
            },
        }
    }

    fn total(&self) -> usize {
        self.users + self.tags + self.questions + self.answers + self.question_likes
            + self.answer_likes
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    let volumes = match cli.db_size {
        Some(size) => Volumes::preset(size),
        None => Volumes {
            users: cli.users.unwrap_or(0) as usize,
            tags: cli.tags.unwrap_or(0) as usize,
            questions: cli.questions.unwrap_or(0) as usize,
            answers: cli.answers.unwrap_or(0) as usize,
            question_likes: cli.question_likes.unwrap_or(0) as usize,
            answer_likes: cli.answer_likes.unwrap_or(0) as usize,
        },
    };

    if volumes.total() == 0 {
        anyhow::bail!("nothing to seed; pass --db-size or explicit counts (see --help)");
    }

    println!(
        "Seeding {} into {}",
        format!("{} rows", volumes.total()).cyan(),
        config.database_url.cyan()
    );

    if !cli.yes
        && volumes.total() > 50_000
        && !Confirm::new()
            .with_prompt("This volume can take a while. Continue?")
            .default(false)
            .interact()
            .context("confirmation prompt failed")?
    {
        println!("{}", "Aborted".yellow());
        return Ok(());
    }

    let pool = db::connect(&config).await?;

    seed_users(&pool, volumes.users).await?;
    seed_tags(&pool, volumes.tags).await?;
    seed_questions(&pool, volumes.questions).await?;
    seed_answers(&pool, volumes.answers).await?;
    seed_question_reactions(&pool, volumes.question_likes).await?;
    seed_answer_reactions(&pool, volumes.answer_likes).await?;

    println!("{}", "Recomputing aggregates...".cyan());
    recompute_aggregates(&pool).await?;

    println!("{}", "Done".green().bold());
    Ok(())
}

fn word(rng: &mut impl Rng) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("fern")
}

fn sentence(rng: &mut impl Rng, min_words: usize, max_words: usize) -> String {
    let count = rng.random_range(min_words..=max_words);
    let mut words: Vec<&str> = Vec::with_capacity(count);
    for _ in 0..count {
        words.push(word(rng));
    }
    let mut text = words.join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

fn paragraph(rng: &mut impl Rng, min_sentences: usize, max_sentences: usize) -> String {
    let count = rng.random_range(min_sentences..=max_sentences);
    let mut sentences = Vec::with_capacity(count);
    for _ in 0..count {
        sentences.push(sentence(rng, 4, 12));
    }
    sentences.join(" ")
}

fn recent_timestamp(rng: &mut impl Rng) -> DateTime<Utc> {
    // spread over the last 30 days
    Utc::now() - Duration::minutes(rng.random_range(0..43_200))
}

async fn seed_users(pool: &SqlitePool, cnt: usize) -> Result<()> {
    if cnt == 0 {
        return Ok(());
    }
    let mut rng = rand::rng();

    // offset keeps generated usernames unique across repeated runs
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await? as usize;

    let users: Vec<(String, String)> = (0..cnt)
        .map(|i| {
            let username = format!("{}_{:05}", word(&mut rng), existing + i);
            let email = format!("{username}@example.com");
            (username, email)
        })
        .collect();

    for chunk in users.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO users (username, email) ");
        qb.push_values(chunk, |mut b, (username, email)| {
            b.push_bind(username).push_bind(email);
        });
        qb.build().execute(pool).await?;
    }

    let user_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    let authors: Vec<(i64, String)> = user_ids
        .iter()
        .map(|&user_id| {
            let mut name = format!("{} {}", word(&mut rng), word(&mut rng));
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            (user_id, name)
        })
        .collect();

    for chunk in authors.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Sqlite>::new("INSERT OR IGNORE INTO authors (user_id, name) ");
        qb.push_values(chunk, |mut b, (user_id, name)| {
            b.push_bind(user_id).push_bind(name);
        });
        qb.build().execute(pool).await?;
    }

    println!("{} {} users with author profiles", "Created".green(), cnt);
    Ok(())
}

async fn seed_tags(pool: &SqlitePool, cnt: usize) -> Result<()> {
    if cnt == 0 {
        return Ok(());
    }
    let mut rng = rand::rng();

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tags")
        .fetch_one(pool)
        .await? as usize;

    let tags: Vec<String> = (0..cnt)
        .map(|i| format!("{}-{}", word(&mut rng), existing + i))
        .collect();

    for chunk in tags.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO tags (name) ");
        qb.push_values(chunk, |mut b, name| {
            b.push_bind(name);
        });
        qb.build().execute(pool).await?;
    }

    println!("{} {} tags", "Created".green(), cnt);
    Ok(())
}

async fn seed_questions(pool: &SqlitePool, cnt: usize) -> Result<()> {
    if cnt == 0 {
        return Ok(());
    }
    let mut rng = rand::rng();

    let author_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM authors")
        .fetch_all(pool)
        .await?;
    if author_ids.is_empty() {
        anyhow::bail!("cannot seed questions without authors; seed users first");
    }

    let questions: Vec<(i64, String, String, DateTime<Utc>)> = (0..cnt)
        .map(|_| {
            let author_id = *author_ids.choose(&mut rng).expect("non-empty");
            let mut title = sentence(&mut rng, 5, 14);
            title.truncate(128);
            let body = paragraph(&mut rng, 3, 20);
            (author_id, title, body, recent_timestamp(&mut rng))
        })
        .collect();

    for chunk in questions.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "INSERT INTO questions (author_id, title, body, created_at) ",
        );
        qb.push_values(chunk, |mut b, (author_id, title, body, created_at)| {
            b.push_bind(author_id)
                .push_bind(title)
                .push_bind(body)
                .push_bind(created_at);
        });
        qb.build().execute(pool).await?;
    }

    // tag each question with a random set of up to 10 tags
    let tag_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM tags")
        .fetch_all(pool)
        .await?;
    if !tag_ids.is_empty() {
        let question_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM questions")
            .fetch_all(pool)
            .await?;

        let mut pairs: Vec<(i64, i64)> = Vec::new();
        for &question_id in &question_ids {
            let picks = rng.random_range(0..=10usize.min(tag_ids.len()));
            for &tag_id in tag_ids.choose_multiple(&mut rng, picks) {
                pairs.push((question_id, tag_id));
            }
        }

        for chunk in pairs.chunks(BATCH_SIZE) {
            let mut qb = QueryBuilder::<Sqlite>::new(
                "INSERT OR IGNORE INTO question_tags (question_id, tag_id) ",
            );
            qb.push_values(chunk, |mut b, (question_id, tag_id)| {
                b.push_bind(question_id).push_bind(tag_id);
            });
            qb.build().execute(pool).await?;
        }
    }

    println!("{} {} questions", "Created".green(), cnt);
    Ok(())
}

async fn seed_answers(pool: &SqlitePool, cnt: usize) -> Result<()> {
    if cnt == 0 {
        return Ok(());
    }
    let mut rng = rand::rng();

    let author_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM authors")
        .fetch_all(pool)
        .await?;
    let question_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM questions")
        .fetch_all(pool)
        .await?;
    if author_ids.is_empty() || question_ids.is_empty() {
        anyhow::bail!("cannot seed answers without authors and questions");
    }

    let answers: Vec<(i64, i64, String, DateTime<Utc>)> = (0..cnt)
        .map(|_| {
            (
                *question_ids.choose(&mut rng).expect("non-empty"),
                *author_ids.choose(&mut rng).expect("non-empty"),
                paragraph(&mut rng, 2, 5),
                recent_timestamp(&mut rng),
            )
        })
        .collect();

    for chunk in answers.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "INSERT INTO answers (question_id, author_id, body, created_at) ",
        );
        qb.push_values(chunk, |mut b, (question_id, author_id, body, created_at)| {
            b.push_bind(question_id)
                .push_bind(author_id)
                .push_bind(body)
                .push_bind(created_at);
        });
        qb.build().execute(pool).await?;
    }

    println!("{} {} answers", "Created".green(), cnt);
    Ok(())
}

async fn seed_question_reactions(pool: &SqlitePool, cnt: usize) -> Result<()> {
    seed_reactions(pool, cnt, "question_reactions", "question_id", "questions", 0.7).await
}

async fn seed_answer_reactions(pool: &SqlitePool, cnt: usize) -> Result<()> {
    seed_reactions(pool, cnt, "answer_reactions", "answer_id", "answers", 0.6).await
}

async fn seed_reactions(
    pool: &SqlitePool,
    cnt: usize,
    table: &str,
    target_column: &str,
    target_table: &str,
    up_ratio: f64,
) -> Result<()> {
    if cnt == 0 {
        return Ok(());
    }
    let mut rng = rand::rng();

    let author_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM authors")
        .fetch_all(pool)
        .await?;
    let target_ids = sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {target_table}"))
        .fetch_all(pool)
        .await?;
    if author_ids.is_empty() || target_ids.is_empty() {
        anyhow::bail!("cannot seed {table} without authors and {target_table}");
    }

    let reactions: Vec<(i64, i64, bool)> = (0..cnt)
        .map(|_| {
            (
                *author_ids.choose(&mut rng).expect("non-empty"),
                *target_ids.choose(&mut rng).expect("non-empty"),
                rng.random_bool(up_ratio),
            )
        })
        .collect();

    for chunk in reactions.chunks(BATCH_SIZE) {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "INSERT INTO {table} (author_id, {target_column}, state) "
        ));
        qb.push_values(chunk, |mut b, (author_id, target_id, state)| {
            b.push_bind(author_id).push_bind(target_id).push_bind(state);
        });
        qb.build().execute(pool).await?;
    }

    println!("{} {} rows in {}", "Created".green(), cnt, table);
    Ok(())
}

/// Recomputes every denormalized aggregate from the underlying rows.
async fn recompute_aggregates(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "UPDATE authors SET count = \
             (SELECT COUNT(*) FROM questions WHERE questions.author_id = authors.id) + \
             (SELECT COUNT(*) FROM answers WHERE answers.author_id = authors.id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "UPDATE tags SET count = \
             (SELECT COUNT(*) FROM question_tags WHERE question_tags.tag_id = tags.id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "UPDATE questions SET rating = COALESCE( \
             (SELECT SUM(CASE state WHEN 1 THEN 1 WHEN 0 THEN -1 ELSE 0 END) \
              FROM question_reactions WHERE question_reactions.question_id = questions.id), 0)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "UPDATE answers SET rating = COALESCE( \
             (SELECT SUM(CASE state WHEN 1 THEN 1 WHEN 0 THEN -1 ELSE 0 END) \
              FROM answer_reactions WHERE answer_reactions.answer_id = answers.id), 0)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
