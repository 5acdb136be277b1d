//! The engine: a reusable computation launcher over one activated node
//! system.

use std::sync::Arc;

use crate::error::EngineError;
use crate::graph::NodeSystem;

use super::computation::{Computation, ComputationMode};
use super::context::Context;
use super::report::Report;

/// Holds an activated [`NodeSystem`] and a [`ComputationMode`], and launches
/// one independent [`Computation`] per call to [`Engine::compute`].
///
/// Engines are reusable and safe for concurrent `compute` calls against
/// independent contexts.
pub struct Engine {
    mode: ComputationMode,
    system: Option<Arc<NodeSystem>>,
}

impl Engine {
    pub fn new(mode: ComputationMode) -> Self {
        Engine { mode, system: None }
    }

    pub fn mode(&self) -> ComputationMode {
        self.mode
    }

    /// Install the node system this engine computes on, activating it first
    /// when needed. Fails when the system does not validate.
    pub fn configure_node_system(&mut self, mut system: NodeSystem) -> Result<(), EngineError> {
        if !system.is_activated() {
            system.activate()?;
        }
        self.system = Some(Arc::new(system));
        Ok(())
    }

    /// Run one computation over `context` and return its report. Runtime
    /// aborts surface through the report, not through this `Result`.
    pub async fn compute(&self, context: Context) -> Result<Report, EngineError> {
        let system = self.system.clone().ok_or(EngineError::MissingNodeSystem)?;
        let computation = Computation::with_mode(system, context, self.mode)?;
        Ok(computation.run().await)
    }
}
