//! Shared rule evaluation pipeline: features -> rules -> aggregation -> bands -> reasons.
//!
//! Each workflow registers its own rule set, aggregation strategy, and classification
//! bands at construction time. Construction is the only place configuration errors can
//! surface; scoring itself is infallible and side-effect free.

mod aggregate;
mod bands;
mod effect;
mod explain;
mod features;
mod rule;

pub use aggregate::{BaselineDelta, PointTable, ScoreAggregator, WeightedSum};
pub use bands::ThresholdBands;
pub use effect::{Adjustment, Finding, WeightedScore};
pub use explain::{join_explanations, sorted_reason_codes, ReasonCode};
pub use features::ratio;
pub use rule::{Rule, RuleSet};

use rust_decimal::Decimal;

/// Configuration invariant violations detected while building rule tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("factor weights must sum to exactly 1.0 (found {total})")]
    WeightSum { total: Decimal },
    #[error("classification bands must list strictly descending thresholds")]
    UnorderedBands,
    #[error(
        "approve threshold {approve} must be at least refer threshold {refer} and both must lie within 0..=100"
    )]
    InvalidThresholds { approve: i32, refer: i32 },
}
