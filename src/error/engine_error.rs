use thiserror::Error;

use super::{ComputationError, SystemError};

/// Engine-level errors: launching computations without a usable node system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("can't compute without a configured node system")]
    MissingNodeSystem,
    #[error(transparent)]
    System(#[from] SystemError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}
