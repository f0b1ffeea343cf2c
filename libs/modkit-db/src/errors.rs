//! Driver error classification.

use sea_orm::{DbErr, SqlErr};

/// SQLSTATE / extended result codes for unique violations across backends
/// (Postgres 23505, SQLite 2067 and 1555 for primary keys, MySQL 1062).
pub fn is_unique_violation_code(code: &str) -> bool {
    matches!(code, "23505" | "2067" | "1555" | "1062")
}

/// True if `err` is a write rejected by a unique index or primary key.
///
/// Foreign-key and not-null violations are not unique violations.
pub fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    // Fallback for drivers whose error does not surface through `sql_err`.
    let msg = err.to_string();
    if embedded_code(&msg).is_some_and(is_unique_violation_code) {
        return true;
    }
    msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key value violates unique constraint")
}

/// sqlx renders SQLite errors as "... (code: 2067) ...".
fn embedded_code(msg: &str) -> Option<&str> {
    let start = msg.find("(code: ")? + "(code: ".len();
    let rest = &msg[start..];
    let end = rest.find(')')?;
    Some(rest[..end].trim())
}
