use rust_decimal::Decimal;

use super::*;
use crate::engine::Rule;

fn engine() -> RiskScoringEngine {
    RiskScoringEngine::standard().expect("standard weights are valid")
}

fn application() -> CreditApplication {
    CreditApplication {
        application_id: "APP-001".to_string(),
        credit_score: 800,
        annual_income: Decimal::from(150_000),
        monthly_debt_payments: Decimal::from(1_000),
        employment_status: EmploymentStatus::FullTime,
        years_employed: Decimal::from(5),
        requested_amount: Decimal::from(20_000),
    }
}

fn factor(assessment: &RiskAssessment, factor: RiskFactor) -> &WeightedScore<RiskFactor> {
    assessment
        .risk_factors
        .iter()
        .find(|score| score.factor == factor)
        .expect("factor present")
}

#[test]
fn strong_applicant_scores_full_marks() {
    let assessment = engine().assess(&application()).expect("valid application");

    assert_eq!(assessment.total_score, 100);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
    assert_eq!(assessment.decision, LendingDecision::Approved);
    assert_eq!(assessment.risk_factors.len(), 4);
    assert_eq!(
        factor(&assessment, RiskFactor::DebtToIncome).reason,
        "Excellent DTI (8.0%)"
    );
}

#[test]
fn factors_are_reported_in_registration_order() {
    let engine = engine();
    assert_eq!(
        engine.factor_names(),
        vec!["credit_score", "income", "debt_to_income", "employment"]
    );

    let assessment = engine.assess(&application()).expect("valid application");
    let order: Vec<RiskFactor> = assessment.risk_factors.iter().map(|f| f.factor).collect();
    assert_eq!(
        order,
        vec![
            RiskFactor::CreditScore,
            RiskFactor::Income,
            RiskFactor::DebtToIncome,
            RiskFactor::Employment,
        ]
    );
}

#[test]
fn score_of_seventy_is_low_risk() {
    // 100 x 0.35 + 60 x 0.25 + 40 x 0.30 + 80 x 0.10 = 70
    let app = CreditApplication {
        credit_score: 760,
        annual_income: Decimal::from(60_000),
        monthly_debt_payments: Decimal::from(2_300),
        years_employed: Decimal::from(2),
        ..application()
    };

    let assessment = engine().assess(&app).expect("valid application");
    assert_eq!(assessment.total_score, 70);
    assert_eq!(assessment.risk_level, RiskLevel::Low);
    assert_eq!(assessment.decision, LendingDecision::Approved);
}

#[test]
fn medium_risk_depends_on_loan_to_income() {
    // 100 x 0.35 + 60 x 0.25 + 40 x 0.30 + 60 x 0.10 = 68
    let base = CreditApplication {
        credit_score: 760,
        annual_income: Decimal::from(60_000),
        monthly_debt_payments: Decimal::from(2_300),
        years_employed: Decimal::new(5, 1),
        requested_amount: Decimal::from(20_000),
        ..application()
    };

    let small = engine().assess(&base).expect("valid application");
    assert_eq!(small.total_score, 68);
    assert_eq!(small.risk_level, RiskLevel::Medium);
    assert_eq!(small.decision, LendingDecision::Approved);

    let large = engine()
        .assess(&CreditApplication {
            requested_amount: Decimal::from(30_000),
            ..base
        })
        .expect("valid application");
    assert_eq!(large.risk_level, RiskLevel::Medium);
    assert_eq!(large.decision, LendingDecision::ManualReview);
}

#[test]
fn weak_applicant_is_declined() {
    let app = CreditApplication {
        credit_score: 550,
        annual_income: Decimal::from(25_000),
        monthly_debt_payments: Decimal::from(1_500),
        employment_status: EmploymentStatus::Unemployed,
        years_employed: Decimal::ZERO,
        ..application()
    };

    let assessment = engine().assess(&app).expect("valid application");
    assert_eq!(assessment.total_score, 18);
    assert_eq!(assessment.risk_level, RiskLevel::High);
    assert_eq!(assessment.decision, LendingDecision::Declined);
    assert_eq!(
        factor(&assessment, RiskFactor::Employment).reason,
        "No employment"
    );
}

#[test]
fn band_edges_are_inclusive_on_the_lower_bound() {
    let engine = engine();
    let score_for = |credit_score: u16| {
        let assessment = engine
            .assess(&CreditApplication {
                credit_score,
                ..application()
            })
            .expect("valid application");
        factor(&assessment, RiskFactor::CreditScore).score
    };

    assert_eq!(score_for(750), 100);
    assert_eq!(score_for(749), 80);
    assert_eq!(score_for(600), 40);
    assert_eq!(score_for(599), 20);

    let dti_for = |monthly_debt: i64| {
        let assessment = engine
            .assess(&CreditApplication {
                annual_income: Decimal::from(60_000),
                monthly_debt_payments: Decimal::from(monthly_debt),
                ..application()
            })
            .expect("valid application");
        factor(&assessment, RiskFactor::DebtToIncome).clone()
    };

    // 60k income: 1000/month is exactly 20%.
    assert_eq!(dti_for(1_000).score, 80);
    assert_eq!(dti_for(999).score, 100);
    assert_eq!(dti_for(1_250).reason, "Good DTI (25.0%)");
    assert_eq!(dti_for(2_550).score, 20);
}

#[test]
fn infinite_dti_lands_in_the_worst_band() {
    let rule = rules::DebtToIncomeFactor {
        weight: Decimal::new(30, 2),
    };
    let features = RiskFeatures {
        credit_score: 700,
        annual_income: Decimal::ZERO,
        dti_percent: f64::INFINITY,
        employment_status: EmploymentStatus::FullTime,
        years_employed: Decimal::ONE,
        loan_to_income: f64::INFINITY,
    };

    let score = rule.evaluate(&features).expect("factor always scores");
    assert_eq!(score.score, 20);
    assert_eq!(score.reason, "Very risky DTI (inf%)");
}

#[test]
fn employment_bands_cover_every_status() {
    let engine = engine();
    let cases = [
        (EmploymentStatus::FullTime, Decimal::from(3), 100),
        (EmploymentStatus::FullTime, Decimal::ONE, 80),
        (EmploymentStatus::FullTime, Decimal::new(9, 1), 60),
        (EmploymentStatus::SelfEmployed, Decimal::from(3), 70),
        (EmploymentStatus::SelfEmployed, Decimal::from(2), 50),
        (EmploymentStatus::PartTime, Decimal::from(10), 40),
        (EmploymentStatus::Retired, Decimal::ZERO, 50),
        (EmploymentStatus::Unemployed, Decimal::from(10), 0),
    ];

    for (status, years, expected) in cases {
        let assessment = engine
            .assess(&CreditApplication {
                employment_status: status,
                years_employed: years,
                ..application()
            })
            .expect("valid application");
        assert_eq!(
            factor(&assessment, RiskFactor::Employment).score,
            expected,
            "{status:?} with {years} years"
        );
    }
}

#[test]
fn total_score_is_monotonic_in_credit_score() {
    let engine = engine();
    let mut previous = i32::MIN;
    for credit_score in MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE {
        let total = engine
            .assess(&CreditApplication {
                credit_score,
                ..application()
            })
            .expect("valid application")
            .total_score;
        assert!(total >= previous, "score dropped at {credit_score}");
        previous = total;
    }
}

#[test]
fn weights_must_sum_to_one() {
    let err = FactorWeights::new(
        Decimal::new(35, 2),
        Decimal::new(25, 2),
        Decimal::new(30, 2),
        Decimal::new(5, 2),
    )
    .expect_err("weights sum to 0.95");
    assert_eq!(
        err,
        EngineError::WeightSum {
            total: Decimal::new(95, 2)
        }
    );

    let custom = FactorWeights::new(
        Decimal::new(40, 2),
        Decimal::new(20, 2),
        Decimal::new(30, 2),
        Decimal::new(10, 2),
    )
    .expect("weights sum to one");
    assert!(RiskScoringEngine::new(custom, LendingPolicy::default()).is_ok());
}

#[test]
fn invalid_applications_are_rejected() {
    let engine = engine();

    let cases = [
        (
            CreditApplication {
                credit_score: 299,
                ..application()
            },
            RiskInputError::CreditScoreOutOfRange(299),
        ),
        (
            CreditApplication {
                annual_income: Decimal::ZERO,
                ..application()
            },
            RiskInputError::NonPositiveIncome(Decimal::ZERO),
        ),
        (
            CreditApplication {
                monthly_debt_payments: Decimal::from(-1),
                ..application()
            },
            RiskInputError::NegativeDebt(Decimal::from(-1)),
        ),
        (
            CreditApplication {
                requested_amount: Decimal::ZERO,
                ..application()
            },
            RiskInputError::NonPositiveRequest(Decimal::ZERO),
        ),
        (
            CreditApplication {
                application_id: "  ".to_string(),
                ..application()
            },
            RiskInputError::MissingApplicationId,
        ),
    ];

    for (app, expected) in cases {
        assert_eq!(engine.assess(&app), Err(expected));
    }
}

#[test]
fn unknown_employment_status_fails_deserialization() {
    let payload = serde_json::json!({
        "application_id": "APP-009",
        "credit_score": 700,
        "annual_income": "50000",
        "monthly_debt_payments": "500",
        "employment_status": "CONTRACTOR",
        "years_employed": "2",
        "requested_amount": "10000"
    });

    assert!(serde_json::from_value::<CreditApplication>(payload).is_err());
}

#[test]
fn batch_results_are_independent() {
    let applications = vec![
        application(),
        CreditApplication {
            application_id: "APP-002".to_string(),
            credit_score: 900,
            ..application()
        },
        CreditApplication {
            application_id: "APP-003".to_string(),
            credit_score: 550,
            annual_income: Decimal::from(25_000),
            monthly_debt_payments: Decimal::from(1_500),
            employment_status: EmploymentStatus::Unemployed,
            ..application()
        },
    ];

    let results = engine().assess_batch(&applications);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(err) => {
            assert_eq!(err.index, 1);
            assert_eq!(err.application_id, "APP-002");
            assert_eq!(err.source, RiskInputError::CreditScoreOutOfRange(900));
        }
        other => panic!("expected batch error, got {other:?}"),
    }

    let scored: Vec<RiskAssessment> = results.into_iter().filter_map(Result::ok).collect();
    let tally = DecisionTally::from_assessments(&scored);
    assert_eq!(tally.approved, 1);
    assert_eq!(tally.declined, 1);
    assert_eq!(tally.manual_review, 0);
    assert_eq!(tally.total(), 2);
}

#[test]
fn repeated_assessments_are_identical() {
    let mut weak = application();
    weak.application_id = "APP-002".to_string();
    weak.credit_score = 610;
    weak.annual_income = Decimal::from(42_000);
    weak.monthly_debt_payments = Decimal::from(1_400);
    weak.employment_status = EmploymentStatus::SelfEmployed;
    weak.years_employed = Decimal::ONE;
    let applications = vec![application(), weak];

    let first = engine().assess_batch(&applications);
    let second = engine().assess_batch(&applications);
    assert_eq!(first, second);

    let shared = engine();
    for application in &applications {
        assert_eq!(shared.assess(application), shared.assess(application));
    }
}
