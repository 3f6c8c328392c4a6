use crate::engine::{Adjustment, Rule};
use crate::workflows::credit_decisioning::domain::CreditReasonCode;
use crate::workflows::credit_decisioning::features::CreditFeatures;

type CreditAdjustment = Adjustment<CreditReasonCode>;

fn adjustment(delta: i32, reason: CreditReasonCode, explanation: String) -> CreditAdjustment {
    Adjustment {
        delta,
        reason,
        explanation,
    }
}

pub(crate) struct DebtToIncomeRule;

impl DebtToIncomeRule {
    const LOW: f64 = 0.36;
    const HIGH: f64 = 0.43;
}

impl Rule<CreditFeatures> for DebtToIncomeRule {
    type Effect = CreditAdjustment;

    fn name(&self) -> &'static str {
        "debt_to_income"
    }

    fn evaluate(&self, features: &CreditFeatures) -> Option<CreditAdjustment> {
        let dti = features.dti;
        if dti < Self::LOW {
            Some(adjustment(
                10,
                CreditReasonCode::LowDti,
                format!("dti {dti:.2} below {:.2}", Self::LOW),
            ))
        } else if dti >= Self::HIGH {
            Some(adjustment(
                -15,
                CreditReasonCode::HighDti,
                format!("dti {dti:.2} at or above {:.2}", Self::HIGH),
            ))
        } else {
            None
        }
    }
}

pub(crate) struct PaymentHistoryRule;

impl Rule<CreditFeatures> for PaymentHistoryRule {
    type Effect = CreditAdjustment;

    fn name(&self) -> &'static str {
        "payment_history"
    }

    fn evaluate(&self, features: &CreditFeatures) -> Option<CreditAdjustment> {
        let missed = features.missed_payments_12m;
        let effect = match missed {
            0 => adjustment(
                10,
                CreditReasonCode::CleanPaymentHistory,
                "no missed payments in 12 months".to_string(),
            ),
            1 | 2 => adjustment(
                -5,
                CreditReasonCode::SomeMissedPayments,
                format!("{missed} missed payments in 12 months"),
            ),
            _ => adjustment(
                -20,
                CreditReasonCode::PoorPaymentHistory,
                format!("{missed} missed payments in 12 months"),
            ),
        };
        Some(effect)
    }
}

pub(crate) struct EmploymentTenureRule;

impl Rule<CreditFeatures> for EmploymentTenureRule {
    type Effect = CreditAdjustment;

    fn name(&self) -> &'static str {
        "employment_tenure"
    }

    fn evaluate(&self, features: &CreditFeatures) -> Option<CreditAdjustment> {
        let years = features.employment_years;
        match years {
            6.. => Some(adjustment(
                10,
                CreditReasonCode::StableEmployment,
                format!("{years} years employed"),
            )),
            2..=5 => Some(adjustment(
                5,
                CreditReasonCode::ModerateEmployment,
                format!("{years} years employed"),
            )),
            _ => None,
        }
    }
}

pub(crate) struct CreditExposureRule;

impl CreditExposureRule {
    const LOW: f64 = 0.30;
    const HIGH: f64 = 0.50;
}

impl Rule<CreditFeatures> for CreditExposureRule {
    type Effect = CreditAdjustment;

    fn name(&self) -> &'static str {
        "credit_exposure"
    }

    fn evaluate(&self, features: &CreditFeatures) -> Option<CreditAdjustment> {
        let exposure = features.affordability_ratio;
        if exposure < Self::LOW {
            Some(adjustment(
                5,
                CreditReasonCode::LowCreditExposure,
                format!("requested amount {exposure:.2}x income below {:.2}", Self::LOW),
            ))
        } else if exposure >= Self::HIGH {
            Some(adjustment(
                -10,
                CreditReasonCode::HighCreditExposure,
                format!("requested amount {exposure:.2}x income at or above {:.2}", Self::HIGH),
            ))
        } else {
            None
        }
    }
}
