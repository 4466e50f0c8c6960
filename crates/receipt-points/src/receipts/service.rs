use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Receipt, ReceiptId};
use super::repository::{PointsRepository, RepositoryError};
use super::scoring::{ScoreOutcome, ScoringEngine, ScoringError};
use super::validation::{ReceiptValidator, ValidationErrors};

/// Service composing validation, scoring, and the points repository.
pub struct ReceiptService<R> {
    validator: ReceiptValidator,
    engine: ScoringEngine,
    repository: Arc<R>,
}

/// Result of a successfully processed receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedReceipt {
    pub id: ReceiptId,
    pub outcome: ScoreOutcome,
}

impl<R> ReceiptService<R>
where
    R: PointsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_validator(ReceiptValidator::default(), repository)
    }

    pub fn with_validator(validator: ReceiptValidator, repository: Arc<R>) -> Self {
        Self {
            validator,
            engine: ScoringEngine::new(),
            repository,
        }
    }

    /// Validate, score, and store a receipt under a freshly minted id.
    pub fn process(&self, receipt: Receipt) -> Result<ProcessedReceipt, ReceiptServiceError> {
        let errors = self.validator.validate(&receipt);
        if !errors.is_empty() {
            warn!(issues = errors.len(), "receipt rejected: {errors}");
            return Err(ReceiptServiceError::Invalid(errors));
        }

        let outcome = self.engine.score(&receipt)?;
        let id = ReceiptId::generate();
        self.repository.insert(id.clone(), outcome.total_points)?;

        info!(receipt_id = %id, points = outcome.total_points, "receipt processed");

        Ok(ProcessedReceipt { id, outcome })
    }

    /// Points previously stored for `id`.
    pub fn points(&self, id: &ReceiptId) -> Result<i64, ReceiptServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ReceiptServiceError::NotFound(id.clone()))
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error("receipt failed validation: {0}")]
    Invalid(ValidationErrors),
    #[error("no receipt found for ID {0}")]
    NotFound(ReceiptId),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
