use crate::batch::{assessment_line, print_triage_summary};
use crate::infra::{InMemoryApplicationRepository, InMemoryAuditSink, InMemoryDecisionRepository};
use clap::Args;
use decision_engine::config::DecisioningConfig;
use decision_engine::engine::ReasonCode;
use decision_engine::error::AppError;
use decision_engine::workflows::aml_triage::io::read_transactions;
use decision_engine::workflows::aml_triage::AmlTriageEngine;
use decision_engine::workflows::credit_decisioning::{
    ApplicationRequest, CreditDecisionEngine, CreditDecisioningService,
};
use decision_engine::workflows::risk_scoring::{CreditApplication, RiskScoringEngine};
use rust_decimal::Decimal;
use std::sync::Arc;

const SAMPLE_APPLICATIONS: &str =
    include_str!("../../../crates/decision-engine/data/sample_applications.json");
const SAMPLE_TRANSACTIONS: &str =
    include_str!("../../../crates/decision-engine/data/sample_transactions.csv");

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the batch risk scoring and AML triage portions of the demo.
    #[arg(long)]
    pub(crate) skip_batch: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let decisioning = DecisioningConfig::default();

    println!("Credit decisioning demo (personal fields never leave the application record)");
    let audit = Arc::new(InMemoryAuditSink::default());
    let service = CreditDecisioningService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemoryDecisionRepository::default()),
        audit.clone(),
        CreditDecisionEngine::new(decisioning.thresholds()?),
    );

    for (label, request) in demo_applicants() {
        let record = match service.submit(request) {
            Ok(record) => record,
            Err(err) => {
                println!("- {label}: submission rejected: {err}");
                continue;
            }
        };
        match service.decide(&record.application_id) {
            Ok(decision) => {
                let codes: Vec<&str> = decision.reason_codes.iter().map(|code| code.code()).collect();
                println!(
                    "- {label} ({}): {:?} with score {} [{}]",
                    record.application_id,
                    decision.outcome,
                    decision.score,
                    codes.join(", ")
                );
            }
            Err(err) => println!("- {label}: decision unavailable: {err}"),
        }
    }
    println!("  Audit entries recorded: {}", audit.entries().len());

    if args.skip_batch {
        return Ok(());
    }

    println!("\nBatch risk scoring demo");
    let applications: Vec<CreditApplication> = serde_json::from_str(SAMPLE_APPLICATIONS)?;
    let engine = RiskScoringEngine::standard()?;
    for result in engine.assess_batch(&applications) {
        match result {
            Ok(assessment) => println!("{}", assessment_line(&assessment)),
            Err(err) => println!("- skipped {err}"),
        }
    }

    println!("\nAML triage demo");
    let ledger = read_transactions(SAMPLE_TRANSACTIONS.as_bytes())?;
    let run = AmlTriageEngine::new(&decisioning.aml_rules())?.run(&ledger);
    print_triage_summary(&run);
    for decision in &run.decisions {
        println!(
            "  - {} {} score {:.0}: {}",
            decision.alert.alert_id,
            decision.priority.as_str(),
            decision.triage_score,
            decision.alert.explanation
        );
    }

    Ok(())
}

fn demo_applicants() -> Vec<(&'static str, ApplicationRequest)> {
    vec![
        ("safe", applicant("Avery Safe", 70_000, 1_000, 12_000, 7, 0)),
        ("risky", applicant("Riley Risky", 35_000, 1_500, 20_000, 1, 4)),
        (
            "borderline",
            applicant("Blake Borderline", 50_000, 1_400, 15_000, 3, 1),
        ),
    ]
}

fn applicant(
    full_name: &str,
    annual_income: i64,
    monthly_debt_payments: i64,
    requested_amount: i64,
    employment_years: u32,
    missed_payments_12m: u32,
) -> ApplicationRequest {
    ApplicationRequest {
        full_name: full_name.to_string(),
        annual_income: Decimal::from(annual_income),
        monthly_debt_payments: Decimal::from(monthly_debt_payments),
        requested_amount: Decimal::from(requested_amount),
        employment_years,
        missed_payments_12m,
        address: "100 Demo Avenue".to_string(),
        email: "applicant@example.com".to_string(),
    }
}
