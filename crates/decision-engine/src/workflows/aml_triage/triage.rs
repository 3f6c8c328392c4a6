use super::domain::{AmlReasonCode, Priority};
use crate::engine::{EngineError, PointTable, ThresholdBands};

pub(crate) fn reason_points() -> PointTable<AmlReasonCode> {
    PointTable::new([
        (AmlReasonCode::HighVelocity, 50),
        (AmlReasonCode::RoundAmount, 20),
        (AmlReasonCode::HighAmount, 30),
        (AmlReasonCode::RapidReversal, 40),
        (AmlReasonCode::NewBeneficiary, 25),
    ])
}

pub(crate) fn priority_bands() -> Result<ThresholdBands<f64, Priority>, EngineError> {
    ThresholdBands::new(vec![(70.0, Priority::P1), (40.0, Priority::P2)], Priority::P3)
}
