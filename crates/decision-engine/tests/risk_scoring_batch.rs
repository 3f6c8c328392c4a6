use decision_engine::workflows::risk_scoring::{
    CreditApplication, DecisionTally, LendingDecision, RiskAssessment, RiskInputError, RiskLevel,
    RiskScoringEngine,
};

fn sample_applications() -> Vec<CreditApplication> {
    let data = include_bytes!("../data/sample_applications.json");
    serde_json::from_slice(data).expect("sample applications parse")
}

#[test]
fn sample_batch_scores_every_application() {
    let engine = RiskScoringEngine::standard().expect("standard engine");
    let assessments: Vec<RiskAssessment> = engine
        .assess_batch(&sample_applications())
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("sample batch is valid");

    let summary: Vec<(&str, i32, RiskLevel, LendingDecision)> = assessments
        .iter()
        .map(|assessment| {
            (
                assessment.application_id.as_str(),
                assessment.total_score,
                assessment.risk_level,
                assessment.decision,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("APP-001", 100, RiskLevel::Low, LendingDecision::Approved),
            ("APP-002", 65, RiskLevel::Medium, LendingDecision::ManualReview),
            ("APP-003", 18, RiskLevel::High, LendingDecision::Declined),
            ("APP-004", 78, RiskLevel::Low, LendingDecision::Approved),
        ]
    );

    let tally = DecisionTally::from_assessments(&assessments);
    assert_eq!(tally.approved, 2);
    assert_eq!(tally.manual_review, 1);
    assert_eq!(tally.declined, 1);
    assert_eq!(tally.total(), 4);
}

#[test]
fn every_assessment_explains_all_four_factors() {
    let engine = RiskScoringEngine::standard().expect("standard engine");

    for result in engine.assess_batch(&sample_applications()) {
        let assessment = result.expect("valid application");
        assert_eq!(assessment.risk_factors.len(), 4);
        assert!(assessment
            .risk_factors
            .iter()
            .all(|factor| !factor.reason.is_empty() && factor.score <= 100));
    }
}

#[test]
fn one_bad_record_does_not_poison_the_batch() {
    let engine = RiskScoringEngine::standard().expect("standard engine");
    let mut applications = sample_applications();
    applications[1].credit_score = 900;

    let results = engine.assess_batch(&applications);
    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert!(results[2].is_ok());
    assert!(results[3].is_ok());

    let err = results[1].clone().expect_err("credit score out of range");
    assert_eq!(err.index, 1);
    assert_eq!(err.application_id, "APP-002");
    assert_eq!(err.source, RiskInputError::CreditScoreOutOfRange(900));
}

#[test]
fn assessments_serialize_with_wire_names() {
    let engine = RiskScoringEngine::standard().expect("standard engine");
    let assessment = engine
        .assess(&sample_applications()[1])
        .expect("valid application");

    let value = serde_json::to_value(&assessment).expect("assessment encodes");
    assert_eq!(value["risk_level"], "MEDIUM");
    assert_eq!(value["decision"], "MANUAL_REVIEW");
    assert_eq!(value["risk_factors"][0]["factor"], "credit_score");
}
