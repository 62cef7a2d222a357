use thiserror::Error;

/// Ledger state errors.
///
/// Absent keys are not errors; reads return `None` for them.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state read failed: {0}")]
    Read(String),

    #[error("state write failed: {0}")]
    Write(String),
}
