use thiserror::Error;

/// Errors that can occur when interacting with the store.
///
/// Everything here is a persistence failure from the caller's point of
/// view: business not-found conditions are expressed as `Ok(None)` from
/// the lookup methods, not as error variants.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A money column held a value that does not fit the fixed-point
    /// representation.
    #[error("Invalid money value in column {column}")]
    InvalidMoney { column: &'static str },

    /// The store could not complete the operation (connectivity loss,
    /// injected test failure).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
