mod rules;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::domain::Receipt;

/// Stateless evaluator applying the seven point rules to a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scores a receipt. Only item prices that cannot be parsed make this fail;
    /// validation rejects those before a receipt gets here.
    pub fn score(&self, receipt: &Receipt) -> Result<ScoreOutcome, ScoringError> {
        let (components, total_points) = rules::score_receipt(receipt)?;
        let outcome = ScoreOutcome {
            total_points,
            breakdown: ScoreBreakdown(components),
        };

        debug!(
            retailer = %receipt.retailer,
            points = outcome.total_points,
            "receipt scored\n{}",
            outcome.report()
        );

        Ok(outcome)
    }
}

/// Rule that produced a breakdown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    RetailerName,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    ItemDescription,
    OddPurchaseDay,
    AfternoonPurchase,
}

impl ScoringRule {
    pub fn label(self) -> &'static str {
        match self {
            ScoringRule::RetailerName => "retailer name",
            ScoringRule::RoundDollarTotal => "round dollar total",
            ScoringRule::QuarterMultipleTotal => "quarter multiple total",
            ScoringRule::ItemPairs => "item pairs",
            ScoringRule::ItemDescription => "item description",
            ScoringRule::OddPurchaseDay => "odd purchase day",
            ScoringRule::AfternoonPurchase => "afternoon purchase",
        }
    }
}

/// Discrete contribution to a score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub points: i64,
    pub notes: String,
}

/// Ordered breakdown entries, one per awarded rule application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(Vec<ScoreComponent>);

impl ScoreBreakdown {
    pub fn components(&self) -> &[ScoreComponent] {
        &self.0
    }

    pub fn points_for(&self, rule: ScoringRule) -> i64 {
        self.0
            .iter()
            .filter(|component| component.rule == rule)
            .map(|component| component.points)
            .sum()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.0 {
            writeln!(f, "{} points - {}", component.points, component.notes)?;
        }
        Ok(())
    }
}

/// Total points plus the breakdown that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub total_points: i64,
    pub breakdown: ScoreBreakdown,
}

impl ScoreOutcome {
    /// Human-readable report of the score composition.
    pub fn report(&self) -> String {
        format!(
            "Total Points: {total}\nBreakdown:\n{breakdown}+ ---------\n= {total} points\n",
            total = self.total_points,
            breakdown = self.breakdown,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("item '{description}' has an unparseable price '{price}'")]
    UnparseableAmount { description: String, price: String },
}
