use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Banded sub-score for one weighted factor, kept whole for audit breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedScore<K> {
    pub factor: K,
    pub score: u8,
    pub weight: Decimal,
    pub weighted_score: Decimal,
    pub reason: String,
}

impl<K> WeightedScore<K> {
    pub fn new(factor: K, score: u8, weight: Decimal, reason: impl Into<String>) -> Self {
        Self {
            factor,
            score,
            weight,
            weighted_score: Decimal::from(score) * weight,
            reason: reason.into(),
        }
    }
}

/// Fixed score delta contributed by a triggered additive rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment<C> {
    pub delta: i32,
    pub reason: C,
    pub explanation: String,
}

/// Pattern hit with no numeric contribution of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding<C> {
    pub reason: C,
    pub explanation: String,
}
