use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown severity: {0}")]
    UnknownSeverity(String),
    #[error(
        "invalid population thresholds: critical below {critical_below}, good at {good_at}"
    )]
    InvalidThresholds { critical_below: f64, good_at: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
