use petchip_core::error::CoreError;

/// Error type for repository operations that enforce domain rules inside
/// a transaction (registration, chip assignment).
///
/// Simple single-statement repositories return `sqlx::Error` directly;
/// this wrapper exists so transactional flows can abort with a domain
/// error (conflict, validation) and roll back cleanly.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
