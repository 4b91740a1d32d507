//! Database error types.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Failed to execute a query.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// Failed to provision the counter table.
    #[error("schema provisioning failed: {0}")]
    Schema(#[source] sqlx::Error),

    /// The configured schema name is not a plain SQL identifier.
    #[error("invalid schema name '{0}': expected [A-Za-z_][A-Za-z0-9_]* of at most 63 characters")]
    InvalidSchemaName(String),

    /// A counter row holds NULL instead of an index.
    #[error("counter {key} has no index value")]
    CorruptCounter { key: String },
}

/// Postgres SQLSTATEs meaning "the thing we tried to create is already there".
pub(crate) fn is_already_exists(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return matches!(db_err.code().as_deref(), Some("23505") | Some("42P07"));
    }
    false
}
