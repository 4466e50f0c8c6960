//! Field parsers turning raw receipt text into typed values.
//!
//! Money strings lose every `,` before decimal conversion and nothing else is
//! cleansed: no currency symbols, no whitespace trimming, no locale handling.
//! Amounts are exact decimals, so fractional-part checks never depend on
//! binary floating point.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_general_category::{get_general_category, GeneralCategory};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

// `9` marks an ASCII digit, every other byte must match literally.
const DATE_LAYOUT: &str = "9999-99-99";
const TIME_LAYOUTS: [&str; 2] = ["99:99", "9:99"];

const AFTERNOON_START_MINUTES: u32 = 14 * 60;
const AFTERNOON_END_MINUTES: u32 = 16 * 60;

/// Reasons a receipt field could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("'{raw}' is not a valid amount")]
    UnparseableAmount { raw: String },
    #[error("'{raw}' is outside the supported amount range")]
    AmountOutOfRange { raw: String },
    #[error("'{raw}' is not a valid date, expected 'YYYY-MM-DD'")]
    MalformedDate { raw: String },
    #[error("'{raw}' is not a valid time, expected 'HH:MM'")]
    MalformedTime { raw: String },
}

/// Parsed monetary amount. Negative and zero values are legitimate amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    /// Parses a money-like string after stripping thousands separators.
    ///
    /// Amounts whose cent value does not fit an `i64` are rejected with
    /// [`FieldError::AmountOutOfRange`] so every `Money` has a cent count.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let unparseable = || FieldError::UnparseableAmount {
            raw: raw.to_string(),
        };

        let cleaned = raw.replace(',', "");
        if cleaned.contains('_') {
            return Err(unparseable());
        }

        let value = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|_| {
                if is_numeric_literal(&cleaned) {
                    out_of_range(raw)
                } else {
                    unparseable()
                }
            })?;

        let money = Money(value);
        money.cents().ok_or_else(|| out_of_range(raw))?;
        Ok(money)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Amount in whole cents, rounded half away from zero.
    pub fn cents(self) -> Option<i64> {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::from(100))?
            .to_i64()
    }

    pub fn is_whole(self) -> bool {
        self.0.fract().is_zero()
    }

    /// `ceil(self * factor)` as integer points.
    pub fn scaled_ceil(self, factor: Decimal) -> Option<i64> {
        self.0.checked_mul(factor)?.ceil().to_i64()
    }
}

fn out_of_range(raw: &str) -> FieldError {
    FieldError::AmountOutOfRange {
        raw: raw.to_string(),
    }
}

/// Signed decimal with an optional exponent, e.g. `-12.5` or `3E+40`.
fn is_numeric_literal(cleaned: &str) -> bool {
    let (mantissa, exponent) = match cleaned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (cleaned, None),
    };

    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let mantissa_ok = !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());

    let exponent_ok = exponent.map_or(true, |exponent| {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    });

    mantissa_ok && exponent_ok
}

impl FromStr for Money {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

pub fn parse_money(raw: &str) -> Result<Money, FieldError> {
    Money::parse(raw)
}

pub fn is_round_dollar(raw: &str) -> bool {
    parse_money(raw).map(Money::is_whole).unwrap_or(false)
}

pub fn is_quarter_multiple(raw: &str) -> bool {
    parse_money(raw)
        .ok()
        .and_then(Money::cents)
        .map(|cents| cents % 25 == 0)
        .unwrap_or(false)
}

/// Character count of the description once every space is removed.
pub fn description_length(raw: &str) -> usize {
    raw.chars().filter(|c| *c != ' ').count()
}

pub fn is_description_length_multiple_of_three(raw: &str) -> bool {
    match description_length(raw) {
        0 => false,
        length => length % 3 == 0,
    }
}

/// Letters (any `L*` category) and decimal digits (`Nd`). Letter-like
/// numbers such as `Ⅻ`, `²` or `½` are not counted.
pub fn count_alphanumeric(raw: &str) -> u64 {
    raw.chars().filter(|c| is_letter_or_digit(*c)).count() as u64
}

fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

fn matches_layout(raw: &str, layout: &str) -> bool {
    raw.len() == layout.len()
        && raw.bytes().zip(layout.bytes()).all(|(byte, expected)| match expected {
            b'9' => byte.is_ascii_digit(),
            literal => byte == literal,
        })
}

/// `YYYY-MM-DD` with exactly four year digits and two-digit month and day.
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let malformed = || FieldError::MalformedDate {
        raw: raw.to_string(),
    };
    if !matches_layout(raw, DATE_LAYOUT) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| malformed())
}

/// 24-hour `HH:MM`. The hour may drop its leading zero, the minute may not.
pub fn parse_purchase_time(raw: &str) -> Result<NaiveTime, FieldError> {
    let malformed = || FieldError::MalformedTime {
        raw: raw.to_string(),
    };
    if !TIME_LAYOUTS.iter().any(|layout| matches_layout(raw, layout)) {
        return Err(malformed());
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| malformed())
}

pub fn is_odd_day(raw: &str) -> bool {
    parse_purchase_date(raw)
        .map(|date| date.day() % 2 == 1)
        .unwrap_or(false)
}

/// Strictly after 14:00 and strictly before 16:00.
pub fn is_afternoon_window(raw: &str) -> bool {
    parse_purchase_time(raw)
        .map(|time| {
            let minutes = time.hour() * 60 + time.minute();
            minutes > AFTERNOON_START_MINUTES && minutes < AFTERNOON_END_MINUTES
        })
        .unwrap_or(false)
}
