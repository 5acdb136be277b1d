//! Node system construction and routing.
//!
//! A [`NodeSystem`] starts as a mutable builder, is checked by
//! [`NodeSystem::is_valid`], and is frozen by [`NodeSystem::activate`] into
//! an immutable routing structure the computation driver traverses through
//! [`NodeSystem::follow`] and [`NodeSystem::ancestors`].

pub mod system;
pub mod types;
pub mod validator;

pub use system::NodeSystem;
pub use types::{JoinMode, NodeLink};
