use std::fmt;

use serde::{Serialize, Serializer};

use super::domain::Receipt;
use super::parsers::{parse_money, parse_purchase_date, parse_purchase_time, FieldError};
use crate::config::ValidationConfig;

/// Single reason a receipt cannot be scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("field '{0}' is required")]
    FieldMissing(&'static str),
    #[error("'{field}' format is invalid, expected '{expected}'")]
    FieldMalformed {
        field: &'static str,
        expected: &'static str,
    },
    #[error("at least one item is required")]
    NoItems,
    #[error("field '{0}' is required for items")]
    ItemFieldMissing(&'static str),
    #[error("'price' for item '{description}' is not a valid amount")]
    UnparseableItemPrice { description: String },
    #[error("'price' for item '{description}' is outside the supported amount range")]
    ItemPriceOutOfRange { description: String },
    #[error("'total' is not a valid amount")]
    UnparseableTotal,
    #[error("'total' is outside the supported amount range")]
    TotalOutOfRange,
}

/// Ordered, fully accumulated validation result. Empty means scoreable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Guard run before any receipt reaches the scoring engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptValidator {
    config: ValidationConfig,
}

impl ReceiptValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, receipt: &Receipt) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if receipt.retailer.is_empty() {
            errors.push(ValidationIssue::FieldMissing("retailer"));
        }

        if receipt.purchase_date.is_empty() {
            errors.push(ValidationIssue::FieldMissing("purchaseDate"));
        } else if self.config.strict_formats && parse_purchase_date(&receipt.purchase_date).is_err()
        {
            errors.push(ValidationIssue::FieldMalformed {
                field: "purchaseDate",
                expected: "YYYY-MM-DD",
            });
        }

        if receipt.purchase_time.is_empty() {
            errors.push(ValidationIssue::FieldMissing("purchaseTime"));
        } else if self.config.strict_formats && parse_purchase_time(&receipt.purchase_time).is_err()
        {
            errors.push(ValidationIssue::FieldMalformed {
                field: "purchaseTime",
                expected: "HH:MM",
            });
        }

        if receipt.items.is_empty() {
            errors.push(ValidationIssue::NoItems);
        } else {
            for item in &receipt.items {
                if item.short_description.is_empty() {
                    errors.push(ValidationIssue::ItemFieldMissing("shortDescription"));
                }
                if item.price.is_empty() {
                    errors.push(ValidationIssue::ItemFieldMissing("price"));
                } else {
                    match parse_money(&item.price) {
                        Ok(_) => {}
                        Err(FieldError::AmountOutOfRange { .. }) => {
                            errors.push(ValidationIssue::ItemPriceOutOfRange {
                                description: item.short_description.clone(),
                            })
                        }
                        Err(_) => errors.push(ValidationIssue::UnparseableItemPrice {
                            description: item.short_description.clone(),
                        }),
                    }
                }
            }
        }

        if receipt.total.is_empty() {
            errors.push(ValidationIssue::FieldMissing("total"));
        } else {
            match parse_money(&receipt.total) {
                Ok(_) => {}
                Err(FieldError::AmountOutOfRange { .. }) => {
                    errors.push(ValidationIssue::TotalOutOfRange)
                }
                Err(_) => errors.push(ValidationIssue::UnparseableTotal),
            }
        }

        errors
    }
}

/// Validates with strict date and time formats.
pub fn validate(receipt: &Receipt) -> ValidationErrors {
    ReceiptValidator::default().validate(receipt)
}
