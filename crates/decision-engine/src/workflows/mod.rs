pub mod aml_triage;
pub mod credit_decisioning;
pub mod risk_scoring;
