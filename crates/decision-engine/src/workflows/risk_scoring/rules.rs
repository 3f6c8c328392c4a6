use rust_decimal::Decimal;

use super::domain::{EmploymentStatus, RiskFactor};
use super::features::RiskFeatures;
use crate::engine::{EngineError, Rule, WeightedScore};

/// Relative importance of each factor. Always sums to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorWeights {
    credit_score: Decimal,
    income: Decimal,
    debt_to_income: Decimal,
    employment: Decimal,
}

impl FactorWeights {
    pub fn new(
        credit_score: Decimal,
        income: Decimal,
        debt_to_income: Decimal,
        employment: Decimal,
    ) -> Result<Self, EngineError> {
        let total = credit_score + income + debt_to_income + employment;
        if total != Decimal::ONE {
            return Err(EngineError::WeightSum { total });
        }

        Ok(Self {
            credit_score,
            income,
            debt_to_income,
            employment,
        })
    }

    pub fn credit_score(&self) -> Decimal {
        self.credit_score
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn debt_to_income(&self) -> Decimal {
        self.debt_to_income
    }

    pub fn employment(&self) -> Decimal {
        self.employment
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            credit_score: Decimal::new(35, 2),
            income: Decimal::new(25, 2),
            debt_to_income: Decimal::new(30, 2),
            employment: Decimal::new(10, 2),
        }
    }
}

pub(crate) struct CreditScoreFactor {
    pub(crate) weight: Decimal,
}

impl Rule<RiskFeatures> for CreditScoreFactor {
    type Effect = WeightedScore<RiskFactor>;

    fn name(&self) -> &'static str {
        "credit_score"
    }

    fn evaluate(&self, features: &RiskFeatures) -> Option<Self::Effect> {
        let (score, reason) = match features.credit_score {
            750.. => (100, "Excellent credit score"),
            700..=749 => (80, "Good credit score"),
            650..=699 => (60, "Fair credit score"),
            600..=649 => (40, "Poor credit score"),
            _ => (20, "Very poor credit score"),
        };

        Some(WeightedScore::new(
            RiskFactor::CreditScore,
            score,
            self.weight,
            reason,
        ))
    }
}

pub(crate) struct IncomeFactor {
    pub(crate) weight: Decimal,
}

impl Rule<RiskFeatures> for IncomeFactor {
    type Effect = WeightedScore<RiskFactor>;

    fn name(&self) -> &'static str {
        "income"
    }

    fn evaluate(&self, features: &RiskFeatures) -> Option<Self::Effect> {
        let income = features.annual_income;
        let (score, reason) = if income >= Decimal::from(100_000) {
            (100, "High income")
        } else if income >= Decimal::from(75_000) {
            (80, "Good income")
        } else if income >= Decimal::from(50_000) {
            (60, "Moderate income")
        } else if income >= Decimal::from(30_000) {
            (40, "Low income")
        } else {
            (20, "Very low income")
        };

        Some(WeightedScore::new(RiskFactor::Income, score, self.weight, reason))
    }
}

pub(crate) struct DebtToIncomeFactor {
    pub(crate) weight: Decimal,
}

impl Rule<RiskFeatures> for DebtToIncomeFactor {
    type Effect = WeightedScore<RiskFactor>;

    fn name(&self) -> &'static str {
        "debt_to_income"
    }

    fn evaluate(&self, features: &RiskFeatures) -> Option<Self::Effect> {
        let dti = features.dti_percent;
        let (score, label) = if dti < 20.0 {
            (100, "Excellent")
        } else if dti < 36.0 {
            (80, "Good")
        } else if dti < 44.0 {
            (60, "Acceptable")
        } else if dti < 51.0 {
            (40, "Risky")
        } else {
            (20, "Very risky")
        };

        Some(WeightedScore::new(
            RiskFactor::DebtToIncome,
            score,
            self.weight,
            format!("{label} DTI ({dti:.1}%)"),
        ))
    }
}

pub(crate) struct EmploymentFactor {
    pub(crate) weight: Decimal,
}

impl Rule<RiskFeatures> for EmploymentFactor {
    type Effect = WeightedScore<RiskFactor>;

    fn name(&self) -> &'static str {
        "employment"
    }

    fn evaluate(&self, features: &RiskFeatures) -> Option<Self::Effect> {
        let years = features.years_employed;
        let established = years >= Decimal::from(3);
        let (score, reason) = match features.employment_status {
            EmploymentStatus::FullTime if established => (100, "Stable full-time employment"),
            EmploymentStatus::FullTime if years >= Decimal::ONE => (80, "Full-time employment"),
            EmploymentStatus::FullTime => (60, "New full-time employment"),
            EmploymentStatus::SelfEmployed if established => (70, "Established self-employment"),
            EmploymentStatus::SelfEmployed => (50, "New self-employment"),
            EmploymentStatus::PartTime => (40, "Part-time employment"),
            EmploymentStatus::Retired => (50, "Retired (fixed income)"),
            EmploymentStatus::Unemployed => (0, "No employment"),
        };

        Some(WeightedScore::new(
            RiskFactor::Employment,
            score,
            self.weight,
            reason,
        ))
    }
}
