use std::fs;
use std::path::PathBuf;

use decision_engine::workflows::aml_triage::io::{
    read_transactions, write_alerts_json, write_summary_json, write_triage_queue,
    write_triage_queue_csv,
};
use decision_engine::workflows::aml_triage::{
    AmlReasonCode, AmlRuleConfig, AmlTriageEngine, Priority, TriageQueue,
};
use rust_decimal::Decimal;

fn sample_ledger() -> decision_engine::workflows::aml_triage::Ledger {
    let data = include_bytes!("../data/sample_transactions.csv");
    read_transactions(&data[..]).expect("sample transactions parse")
}

fn engine() -> AmlTriageEngine {
    AmlTriageEngine::new(&AmlRuleConfig::default()).expect("default rules")
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("aml-triage-{}", uuid::Uuid::new_v4()))
}

#[test]
fn sample_ledger_produces_expected_alerts() {
    let ledger = sample_ledger();
    assert_eq!(ledger.len(), 8);

    let run = engine().run(&ledger);
    let alerts: Vec<(&str, Vec<AmlReasonCode>, Priority, f64)> = run
        .decisions
        .iter()
        .map(|decision| {
            (
                decision.alert.alert_id.as_str(),
                decision.alert.reason_codes.clone(),
                decision.priority,
                decision.triage_score,
            )
        })
        .collect();

    assert_eq!(
        alerts,
        vec![
            (
                "ALERT-TXN-002",
                vec![AmlReasonCode::HighAmount, AmlReasonCode::RoundAmount],
                Priority::P2,
                50.0
            ),
            (
                "ALERT-TXN-003",
                vec![AmlReasonCode::RapidReversal, AmlReasonCode::RoundAmount],
                Priority::P2,
                60.0
            ),
            (
                "ALERT-TXN-005",
                vec![AmlReasonCode::HighVelocity],
                Priority::P2,
                50.0
            ),
            (
                "ALERT-TXN-006",
                vec![AmlReasonCode::HighVelocity, AmlReasonCode::RoundAmount],
                Priority::P1,
                70.0
            ),
            (
                "ALERT-TXN-007",
                vec![AmlReasonCode::HighVelocity],
                Priority::P2,
                50.0
            ),
        ]
    );

    assert_eq!(run.summary.total_transactions, 8);
    assert_eq!(run.summary.total_alerts, 5);
    assert_eq!(run.summary.by_priority.get(&Priority::P1), Some(&1));
    assert_eq!(run.summary.by_priority.get(&Priority::P2), Some(&4));
    assert_eq!(run.summary.by_priority.get(&Priority::P3), Some(&0));
    assert_eq!(
        run.summary.by_queue.get(&TriageQueue::HighRisk),
        Some(&1)
    );
    assert_eq!(
        run.summary.by_reason_code.get(&AmlReasonCode::HighVelocity),
        Some(&3)
    );
}

#[test]
fn blank_currency_and_naive_timestamp_are_accepted() {
    let ledger = sample_ledger();
    let last = ledger.transactions().last().expect("non-empty ledger");

    assert_eq!(last.transaction_id, "TXN-008");
    assert_eq!(last.currency, "USD");
    assert_eq!(last.amount, Decimal::new(9_999, 2));
}

#[test]
fn triage_queue_is_ordered_by_score() {
    let run = engine().run(&sample_ledger());

    let mut buffer = Vec::new();
    write_triage_queue(&run.decisions, &mut buffer).expect("queue encodes");
    let text = String::from_utf8(buffer).expect("utf8 csv");
    let ids: Vec<&str> = text
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();

    assert_eq!(
        ids,
        vec![
            "ALERT-TXN-006",
            "ALERT-TXN-003",
            "ALERT-TXN-002",
            "ALERT-TXN-005",
            "ALERT-TXN-007",
        ]
    );
}

#[test]
fn pipeline_writes_all_three_artifacts() {
    let dir = scratch_dir();
    let run = engine().run(&sample_ledger());
    let alerts: Vec<_> = run
        .decisions
        .iter()
        .map(|decision| decision.alert.clone())
        .collect();

    let alerts_path = dir.join("aml_alerts.json");
    let queue_path = dir.join("triage_queue.csv");
    let summary_path = dir.join("summary.json");
    write_alerts_json(&alerts, &alerts_path).expect("alerts written");
    write_triage_queue_csv(&run.decisions, &queue_path).expect("queue written");
    write_summary_json(&run.summary, &summary_path).expect("summary written");

    let alerts_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&alerts_path).expect("read alerts"))
            .expect("alerts json");
    assert_eq!(alerts_json.as_array().map(Vec::len), Some(5));

    let summary_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).expect("read summary"))
            .expect("summary json");
    assert_eq!(summary_json["total_alerts"], 5);
    assert_eq!(summary_json["by_priority"]["P1"], 1);

    let queue = fs::read_to_string(&queue_path).expect("read queue");
    assert_eq!(queue.lines().count(), 6);

    fs::remove_dir_all(&dir).ok();
}
