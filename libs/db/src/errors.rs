//! Shared database error helpers.

use sea_orm::{DbErr, SqlErr};

/// Returns true if the error is a unique constraint violation
/// (e.g. inserting a second user with the same username).
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
