use super::domain::ReceiptId;

/// Storage abstraction for scored receipts, keyed by the minted identifier.
///
/// Implementations must not let concurrent inserts under distinct ids
/// interfere, and a fetch must observe any insert already completed for
/// the same id.
pub trait PointsRepository: Send + Sync {
    fn insert(&self, id: ReceiptId, points: i64) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<i64>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
