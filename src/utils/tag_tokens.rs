//! Tag list parsing.
//!
//! Questions are submitted with a free-text tag field. Parsing splits it on
//! whitespace, drops empty tokens, collapses duplicates (the association is
//! a set, so a repeated token must not move any counter twice), and
//! validates each token. Matching is exact and case-sensitive: `Python` and
//! `python` are different tags.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Maximum length of a single tag token.
pub const MAX_TAG_LENGTH: usize = 25;

/// Allowed tag characters: ASCII alphanumerics plus `+ # . _ -` to cover
/// spellings like `c++`, `c#` and `.net`.
static TAG_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+#._-]+$").unwrap());

/// Parses a raw tag field into distinct, validated tag names.
///
/// Order of first occurrence is preserved. An empty or whitespace-only
/// input yields an empty list; untagged questions are allowed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any token is longer than
/// [`MAX_TAG_LENGTH`] or contains a character outside the allowed set.
pub fn parse_tag_list(raw: &str) -> Result<Vec<String>, AppError> {
    let mut tags: Vec<String> = Vec::new();

    for token in raw.split_whitespace() {
        if token.chars().count() > MAX_TAG_LENGTH {
            return Err(AppError::bad_request(
                "Tag is too long",
                json!({ "tag": token, "max_length": MAX_TAG_LENGTH }),
            ));
        }

        if !TAG_TOKEN_REGEX.is_match(token) {
            return Err(AppError::bad_request(
                "Tag contains invalid characters",
                json!({ "tag": token }),
            ));
        }

        if !tags.iter().any(|t| t == token) {
            tags.push(token.to_string());
        }
    }

    Ok(tags)
}
