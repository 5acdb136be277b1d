use thiserror::Error;

/// Node-level errors.
///
/// An abort state carries one of these; it surfaces through the computation
/// report rather than through a `Result` from the driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("Execution error: {0}")]
    ExecutionError(String),
    #[error("Variable not found: {0}")]
    VariableNotFound(String),
    #[error("Type error: {0}")]
    TypeError(String),
    /// Raised by the driver when a decision node returns a branchless
    /// continue state.
    #[error("decision node must choose a branch")]
    MissingDecisionBranch,
}
