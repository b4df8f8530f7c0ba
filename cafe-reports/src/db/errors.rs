use thiserror::Error;

/// Unified error type for database operations that application code can handle.
///
/// Report queries are read-only, so the constraint taxonomy a writable store
/// needs (unique, foreign key, check violations) does not apply here. Every
/// underlying failure is treated the same way: the report is unavailable. The
/// wrapped [`sqlx::Error`] carries the detail for logging; it is never shown
/// to callers.
#[derive(Error, Debug)]
pub enum DbError {
    /// Any failure surfaced by the store while executing a report query
    #[error("report query failed: {0}")]
    Execution(#[from] sqlx::Error),
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
