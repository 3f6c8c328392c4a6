//! Deterministic decision-scoring core shared by the credit risk scorer, the AML alert
//! triage pipeline, and the credit decisioning service.

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
pub mod workflows;
