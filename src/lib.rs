//! nodeflow — a graph-of-nodes computation engine.
//!
//! A client wires action and decision nodes into a [`NodeSystem`], checks it
//! with [`NodeSystem::is_valid`], freezes it with [`NodeSystem::activate`],
//! then hands it to an [`Engine`] that runs independent computations, one
//! per [`Context`].
//!
//! ```
//! use nodeflow::{
//!     new_action_node, ComputationMode, ComputeState, Context, Engine, NodeSystem,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let load = new_action_node("load", |ctx: &Context| {
//!     ctx.store("x", 1);
//!     ComputeState::new_continue()
//! });
//! let double = new_action_node("double", |ctx: &Context| {
//!     let x = ctx.read("x").and_then(|v| v.as_i64()).unwrap_or(0);
//!     ctx.store("x", x * 2);
//!     ComputeState::new_continue()
//! });
//!
//! let mut system = NodeSystem::new();
//! system.add_node(load.clone())?;
//! system.add_node(double.clone())?;
//! system.add_link(&load, &double)?;
//!
//! let mut engine = Engine::new(ComputationMode::Sequential);
//! engine.configure_node_system(system)?;
//!
//! let report = engine.compute(Context::new()).await?;
//! assert!(report.success());
//! assert_eq!(report.context().read("x"), Some(serde_json::json!(2)));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod graph;
pub mod node;

pub use crate::core::{Computation, ComputationMode, Context, Engine, Report};
pub use crate::error::{
    BuildError, ComputationError, EngineError, NodeError, SystemError, ValidationError,
};
pub use crate::graph::{JoinMode, NodeLink, NodeSystem};
pub use crate::node::{
    new_action_node, new_decision_node, same_node, ComputeState, Node, NodeRef, StateKind,
};
