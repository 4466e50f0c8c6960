use rust_decimal::Decimal;

use super::super::domain::Receipt;
use super::super::parsers::{
    count_alphanumeric, is_afternoon_window, is_description_length_multiple_of_three,
    is_odd_day, is_quarter_multiple, is_round_dollar, parse_money,
};
use super::{ScoreComponent, ScoringError, ScoringRule};

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const POINTS_PER_ITEM_PAIR: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;

/// 0.2, the share of an item price awarded for qualifying descriptions.
fn item_price_factor() -> Decimal {
    Decimal::new(2, 1)
}

pub(crate) fn score_receipt(
    receipt: &Receipt,
) -> Result<(Vec<ScoreComponent>, i64), ScoringError> {
    let mut components = Vec::new();
    let mut total_points: i64 = 0;

    let name_points = count_alphanumeric(&receipt.retailer) as i64;
    components.push(ScoreComponent {
        rule: ScoringRule::RetailerName,
        points: name_points,
        notes: format!(
            "retailer name ({}) has {} alphanumeric characters",
            receipt.retailer, name_points
        ),
    });
    total_points += name_points;

    if is_round_dollar(&receipt.total) {
        components.push(ScoreComponent {
            rule: ScoringRule::RoundDollarTotal,
            points: ROUND_DOLLAR_POINTS,
            notes: "total is a round dollar amount".to_string(),
        });
        total_points += ROUND_DOLLAR_POINTS;
    }

    if is_quarter_multiple(&receipt.total) {
        components.push(ScoreComponent {
            rule: ScoringRule::QuarterMultipleTotal,
            points: QUARTER_MULTIPLE_POINTS,
            notes: "total is a multiple of 0.25".to_string(),
        });
        total_points += QUARTER_MULTIPLE_POINTS;
    }

    let item_count = receipt.items.len();
    let pairs = item_count / 2;
    let pair_points = pairs as i64 * POINTS_PER_ITEM_PAIR;
    components.push(ScoreComponent {
        rule: ScoringRule::ItemPairs,
        points: pair_points,
        notes: format!("{item_count} items ({pairs} pairs @ {POINTS_PER_ITEM_PAIR} points each)"),
    });
    total_points += pair_points;

    for item in &receipt.items {
        if !is_description_length_multiple_of_three(&item.short_description) {
            continue;
        }

        let unparseable = || ScoringError::UnparseableAmount {
            description: item.short_description.clone(),
            price: item.price.clone(),
        };
        let price = parse_money(&item.price).map_err(|_| unparseable())?;
        let item_points = price
            .scaled_ceil(item_price_factor())
            .ok_or_else(unparseable)?;

        components.push(ScoreComponent {
            rule: ScoringRule::ItemDescription,
            points: item_points,
            notes: format!(
                "item description ({}) is a multiple of 3, price: {}",
                item.short_description, price
            ),
        });
        total_points = total_points.saturating_add(item_points);
    }

    if is_odd_day(&receipt.purchase_date) {
        components.push(ScoreComponent {
            rule: ScoringRule::OddPurchaseDay,
            points: ODD_DAY_POINTS,
            notes: "purchase date day is odd".to_string(),
        });
        total_points += ODD_DAY_POINTS;
    }

    if is_afternoon_window(&receipt.purchase_time) {
        components.push(ScoreComponent {
            rule: ScoringRule::AfternoonPurchase,
            points: AFTERNOON_POINTS,
            notes: "purchase time is between 2:00pm and 4:00pm".to_string(),
        });
        total_points += AFTERNOON_POINTS;
    }

    Ok((components, total_points))
}
