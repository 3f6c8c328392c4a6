use crate::engine::{EngineError, ThresholdBands};
use crate::workflows::credit_decisioning::domain::CreditOutcome;

pub const DEFAULT_APPROVE_THRESHOLD: i32 = 70;
pub const DEFAULT_REFER_THRESHOLD: i32 = 50;

/// Score cut-offs mapped to outcomes when a decision is classified.
///
/// Equal thresholds collapse the REFER band.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionThresholds {
    approve: i32,
    refer: i32,
    bands: ThresholdBands<i32, CreditOutcome>,
}

impl DecisionThresholds {
    pub fn new(approve: i32, refer: i32) -> Result<Self, EngineError> {
        let in_range = |value: i32| (0..=100).contains(&value);
        if !in_range(approve) || !in_range(refer) || approve < refer {
            return Err(EngineError::InvalidThresholds { approve, refer });
        }

        let mut bands = vec![(approve, CreditOutcome::Approve)];
        if refer < approve {
            bands.push((refer, CreditOutcome::Refer));
        }

        Ok(Self {
            approve,
            refer,
            bands: ThresholdBands::new(bands, CreditOutcome::Decline)?,
        })
    }

    pub fn standard() -> Result<Self, EngineError> {
        Self::new(DEFAULT_APPROVE_THRESHOLD, DEFAULT_REFER_THRESHOLD)
    }

    pub fn approve(&self) -> i32 {
        self.approve
    }

    pub fn refer(&self) -> i32 {
        self.refer
    }

    pub fn classify(&self, score: i32) -> CreditOutcome {
        self.bands.classify(score)
    }
}
