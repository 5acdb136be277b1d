//! Computation execution: context, driver, engine, and report.

pub mod computation;
pub mod context;
pub mod engine;
pub mod report;

pub use computation::{Computation, ComputationMode};
pub use context::Context;
pub use engine::Engine;
pub use report::Report;
