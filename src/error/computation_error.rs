use thiserror::Error;

/// Misuse of the computation driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    #[error("can't compute with a unactivated node system")]
    UnactivatedSystem,
}
