//! SQLx error classification helpers.

/// Returns true when the error is a unique-constraint violation.
///
/// Used by the write path to distinguish "somebody got there first" (a tag
/// or username race) from genuine storage failures.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
}
