use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// How an organizer expressed a set of metric weights.
///
/// Both modes are input conventions only. What gets stored is always the
/// normalized fraction, summing to 1 across a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    /// Arbitrary positive multipliers, e.g. 1.5x and 1.0x.
    #[default]
    Multiplier,
    /// Percentages that must add up to exactly 100.
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("at least one weight is required")]
    Empty,

    #[error("weights must be positive, got {0}")]
    NonPositive(Decimal),

    #[error("percentages must sum to 100, got {0}")]
    PercentageSum(Decimal),

    #[error("weights are too large to combine")]
    OutOfRange,

    #[error("weight {0} is too small next to the others")]
    Negligible(Decimal),
}

/// Convert weights given in `mode` into fractions summing to 1.
///
/// Keys are carried through untouched, so the caller can use metric ids or
/// input positions.
pub fn normalize<K>(mode: WeightMode, entries: Vec<(K, Decimal)>) -> Result<Vec<(K, Decimal)>, WeightError> {
    if entries.is_empty() {
        return Err(WeightError::Empty);
    }

    if let Some((_, w)) = entries.iter().find(|(_, w)| *w <= Decimal::ZERO) {
        return Err(WeightError::NonPositive(*w));
    }

    let total = entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, w)| acc.checked_add(*w))
        .ok_or(WeightError::OutOfRange)?;

    let divisor = match mode {
        WeightMode::Multiplier => total,
        WeightMode::Percentage => {
            if total != Decimal::ONE_HUNDRED {
                return Err(WeightError::PercentageSum(total));
            }
            Decimal::ONE_HUNDRED
        }
    };

    entries
        .into_iter()
        .map(|(key, w)| {
            let fraction = w.checked_div(divisor).ok_or(WeightError::OutOfRange)?.normalize();
            if fraction <= Decimal::ZERO {
                return Err(WeightError::Negligible(w));
            }
            Ok((key, fraction))
        })
        .collect()
}

/// Display form of a stored fraction.
pub fn as_percentage(fraction: Decimal) -> Decimal {
    (fraction * Decimal::ONE_HUNDRED).round_dp(2)
}
