use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::engine::EngineError;
use crate::workflows::aml_triage::AmlRuleConfig;
use crate::workflows::credit_decisioning::DecisionThresholds;

/// Longest detection window accepted for the AML time-window rules (one week).
const MAX_WINDOW_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub decisioning: DecisioningConfig,
    pub audit: AuditConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = DecisioningConfig::default();
        let decisioning = DecisioningConfig {
            approve_threshold: parse_var("SCORE_APPROVE_THRESHOLD", defaults.approve_threshold)?,
            refer_threshold: parse_var("SCORE_REFER_THRESHOLD", defaults.refer_threshold)?,
            velocity_window_seconds: parse_var(
                "AML_VELOCITY_WINDOW_SECONDS",
                defaults.velocity_window_seconds,
            )?,
            reversal_window_seconds: parse_var(
                "AML_REVERSAL_WINDOW_SECONDS",
                defaults.reversal_window_seconds,
            )?,
            high_amount_threshold: parse_var(
                "AML_HIGH_AMOUNT_THRESHOLD",
                defaults.high_amount_threshold,
            )?,
        };
        decisioning.validate()?;

        let audit = AuditConfig {
            log_path: env::var("AUDIT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| AuditConfig::default().log_path),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            decisioning,
            audit,
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Thresholds and detection windows shared by every rule set.
///
/// Rule tables are built from a validated copy of this struct; nothing reads the
/// environment after load.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisioningConfig {
    pub approve_threshold: i32,
    pub refer_threshold: i32,
    pub velocity_window_seconds: i64,
    pub reversal_window_seconds: i64,
    pub high_amount_threshold: Decimal,
}

impl Default for DecisioningConfig {
    fn default() -> Self {
        Self {
            approve_threshold: 70,
            refer_threshold: 50,
            velocity_window_seconds: 60,
            reversal_window_seconds: 300,
            high_amount_threshold: Decimal::from(10_000),
        }
    }
}

impl DecisioningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds()?;

        for (key, value) in [
            ("AML_VELOCITY_WINDOW_SECONDS", self.velocity_window_seconds),
            ("AML_REVERSAL_WINDOW_SECONDS", self.reversal_window_seconds),
        ] {
            if value <= 0 || value > MAX_WINDOW_SECONDS {
                return Err(ConfigError::InvalidWindow { key, seconds: value });
            }
        }

        if self.high_amount_threshold <= Decimal::ZERO {
            return Err(ConfigError::InvalidAmountThreshold(
                self.high_amount_threshold,
            ));
        }

        Ok(())
    }

    pub fn thresholds(&self) -> Result<DecisionThresholds, EngineError> {
        DecisionThresholds::new(self.approve_threshold, self.refer_threshold)
    }

    pub fn aml_rules(&self) -> AmlRuleConfig {
        AmlRuleConfig {
            velocity_window_seconds: self.velocity_window_seconds,
            reversal_window_seconds: self.reversal_window_seconds,
            high_amount_threshold: self.high_amount_threshold,
        }
    }
}

/// Destination of the append-only decision audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    pub log_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("out/credit_decisioning/audit_log.jsonl"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str, value: String },
    InvalidThresholds(EngineError),
    InvalidWindow { key: &'static str, seconds: i64 },
    InvalidAmountThreshold(Decimal),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an unparseable value '{value}'")
            }
            ConfigError::InvalidThresholds(err) => write!(f, "invalid score thresholds: {err}"),
            ConfigError::InvalidWindow { key, seconds } => write!(
                f,
                "{key} must be between 1 and {MAX_WINDOW_SECONDS} seconds (got {seconds})"
            ),
            ConfigError::InvalidAmountThreshold(amount) => {
                write!(f, "AML_HIGH_AMOUNT_THRESHOLD must be positive (got {amount})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidThresholds(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidValue { .. }
            | ConfigError::InvalidWindow { .. }
            | ConfigError::InvalidAmountThreshold(_) => None,
        }
    }
}

impl From<EngineError> for ConfigError {
    fn from(value: EngineError) -> Self {
        Self::InvalidThresholds(value)
    }
}
