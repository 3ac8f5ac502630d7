//! Error types for the persistence gateway.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors and adds the gateway-level conditions (a missing row on
//! update/delete, a rejected write in the in-memory store).

/// Errors that can occur in the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The row targeted by an update or delete does not exist.
    #[error("Row not found: {0}")]
    NotFound(String),

    /// A write violated a column constraint (e.g. a `NOT NULL` field).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
