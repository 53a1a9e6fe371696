//! Decimal rounding and minute-to-hour conversion.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Rounds half away from zero to `places` decimal places.
///
/// The result always carries exactly `places` digits of scale, so `8.5`
/// serializes as `"8.50"`.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::round_to;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to(Decimal::from_str("8.333").unwrap(), 2), Decimal::from_str("8.33").unwrap());
/// assert_eq!(round_to(Decimal::from_str("0.125").unwrap(), 2), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_to(value: Decimal, places: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded
}

/// Converts whole minutes to hours, rounded to `places`.
pub fn minutes_to_hours(minutes: i64, places: u32) -> EngineResult<Decimal> {
    Decimal::from(minutes)
        .checked_div(MINUTES_PER_HOUR)
        .map(|hours| round_to(hours, places))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("cannot convert {} minutes to hours", minutes),
        })
}
