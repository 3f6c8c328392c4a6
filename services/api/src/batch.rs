use clap::Args;
use decision_engine::config::AppConfig;
use decision_engine::error::AppError;
use decision_engine::workflows::aml_triage::io::{
    load_transactions, write_alerts_json, write_summary_json, write_triage_queue_csv,
};
use decision_engine::workflows::aml_triage::{Alert, AmlTriageEngine, TriageRun};
use decision_engine::workflows::risk_scoring::{
    CreditApplication, DecisionTally, RiskAssessment, RiskScoringEngine,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct RiskScoreArgs {
    /// JSON array of loan applications
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write scored assessments to this JSON file
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AmlTriageArgs {
    /// Transaction CSV export
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Directory receiving aml_alerts.json, triage_queue.csv, and summary.json
    #[arg(long, default_value = "out/aml_triage")]
    pub(crate) output_dir: PathBuf,
}

pub(crate) fn run_risk_score(args: RiskScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.input)?;
    let applications: Vec<CreditApplication> = serde_json::from_str(&raw)?;
    let engine = RiskScoringEngine::standard()?;

    println!(
        "Scoring {} applications from {}",
        applications.len(),
        args.input.display()
    );
    let mut assessments = Vec::with_capacity(applications.len());
    for result in engine.assess_batch(&applications) {
        match result {
            Ok(assessment) => {
                println!("{}", assessment_line(&assessment));
                assessments.push(assessment);
            }
            Err(err) => println!("- skipped {}", err),
        }
    }

    let tally = DecisionTally::from_assessments(&assessments);
    println!(
        "Decisions: {} approved | {} manual review | {} declined",
        tally.approved, tally.manual_review, tally.declined
    );

    if let Some(output) = args.output {
        write_json(&output, &assessments)?;
        println!("Assessments written to {}", output.display());
    }

    Ok(())
}

pub(crate) fn run_aml_triage(args: AmlTriageArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = AmlTriageEngine::new(&config.decisioning.aml_rules())?;
    let ledger = load_transactions(&args.input)?;

    let run = engine.run(&ledger);
    write_triage_outputs(&run, &args.output_dir)?;
    print_triage_summary(&run);
    println!("Outputs written to {}", args.output_dir.display());

    Ok(())
}

pub(crate) fn assessment_line(assessment: &RiskAssessment) -> String {
    format!(
        "- {}: score {} | {:?} risk | {}",
        assessment.application_id,
        assessment.total_score,
        assessment.risk_level,
        assessment.decision.summary()
    )
}

pub(crate) fn print_triage_summary(run: &TriageRun) {
    println!(
        "Triage: {} alerts from {} transactions",
        run.summary.total_alerts, run.summary.total_transactions
    );
    for (priority, count) in &run.summary.by_priority {
        println!("  - {}: {}", priority.as_str(), count);
    }
}

fn write_triage_outputs(run: &TriageRun, dir: &Path) -> Result<(), AppError> {
    let alerts: Vec<Alert> = run
        .decisions
        .iter()
        .map(|decision| decision.alert.clone())
        .collect();
    write_alerts_json(&alerts, &dir.join("aml_alerts.json"))?;
    write_triage_queue_csv(&run.decisions, &dir.join("triage_queue.csv"))?;
    write_summary_json(&run.summary, &dir.join("summary.json"))?;
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)?;
    Ok(())
}
