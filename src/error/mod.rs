//! Error types for the node system and its computations.
//!
//! - [`BuildError`] — Rejected builder operations (frozen system, malformed links).
//! - [`ValidationError`] — Structural defects collected by `NodeSystem::is_valid`.
//! - [`SystemError`] — Activation refusal and queries on an unactivated system.
//! - [`NodeError`] — Errors raised during individual node computation; the
//!   payload of an abort state.
//! - [`ComputationError`] / [`EngineError`] — Misuse of the computation driver
//!   and the engine.

pub mod build_error;
pub mod computation_error;
pub mod engine_error;
pub mod node_error;
pub mod system_error;
pub mod validation_error;

pub use build_error::BuildError;
pub use computation_error::ComputationError;
pub use engine_error::EngineError;
pub use node_error::NodeError;
pub use system_error::SystemError;
pub use validation_error::ValidationError;

/// Convenience alias for builder-level results.
pub type BuildResult = Result<(), BuildError>;
/// Convenience alias for node-level results.
pub type NodeResult<T> = Result<T, NodeError>;
