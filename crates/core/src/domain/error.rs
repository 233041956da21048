// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Interval must be positive, got {0}")]
    InvalidInterval(i64),

    #[error("Odometer reading must not be negative, got {0}")]
    NegativeOdometer(i64),

    #[error("Checkpoint is incomplete: odometer and date must be set together")]
    IncompleteCheckpoint,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Reject non-positive intervals at ingestion
pub fn ensure_positive_interval(interval: i64) -> Result<i64> {
    if interval <= 0 {
        return Err(DomainError::InvalidInterval(interval));
    }
    Ok(interval)
}

/// Reject negative odometer readings at ingestion
pub fn ensure_odometer(odometer: i64) -> Result<i64> {
    if odometer < 0 {
        return Err(DomainError::NegativeOdometer(odometer));
    }
    Ok(odometer)
}
