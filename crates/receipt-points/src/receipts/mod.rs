//! Receipt intake, validation, and loyalty points scoring.
//!
//! Raw receipts flow one way: the field parsers turn text into typed values,
//! validation decides whether a receipt can be scored, and the scoring engine
//! folds the seven point rules into a total plus an auditable breakdown. The
//! service facade persists results through an injected `PointsRepository`.

pub mod domain;
pub mod parsers;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Item, Receipt, ReceiptId};
pub use parsers::{FieldError, Money};
pub use repository::{PointsRepository, RepositoryError};
pub use router::receipt_router;
pub use scoring::{
    ScoreBreakdown, ScoreComponent, ScoreOutcome, ScoringEngine, ScoringError, ScoringRule,
};
pub use service::{ProcessedReceipt, ReceiptService, ReceiptServiceError};
pub use validation::{validate, ReceiptValidator, ValidationErrors, ValidationIssue};
