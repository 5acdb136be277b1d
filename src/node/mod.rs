//! Node contract and closure-backed node constructors.
//!
//! A [`Node`] is one computation step in a node system. Action nodes do work
//! and emit continue/skip/abort; decision nodes route the computation by
//! emitting a branched continue. IO-bound steps implement [`Node`] directly;
//! [`new_action_node`] and [`new_decision_node`] wrap plain closures.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Context;

pub mod compute_state;

pub use compute_state::{ComputeState, StateKind};

/// A computation step in a node system.
///
/// Implementations must be pure with respect to other nodes: the only shared
/// mutable state is the computation context passed to [`Node::compute`].
#[async_trait]
pub trait Node: Send + Sync + fmt::Debug {
    /// Run this node against the computation context.
    ///
    /// Decision nodes must return a branched continue, a skip, or an abort;
    /// a branchless continue from a decision node is converted to an abort
    /// by the driver. Action nodes must never return a branched continue.
    async fn compute(&self, ctx: &Context) -> ComputeState;

    /// Whether this node may emit `Continue on <branch>` states.
    fn decide_capability(&self) -> bool;
}

/// Shared handle to a node.
///
/// Two handles are the same node iff they point at the same allocation; the
/// node system forbids the same node value from being declared twice.
pub type NodeRef = Arc<dyn Node>;

/// Identity of a node, derived from its allocation address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey(usize);

impl NodeKey {
    pub(crate) fn of(node: &NodeRef) -> Self {
        NodeKey(Arc::as_ptr(node) as *const () as usize)
    }
}

/// Whether two handles designate the same node.
pub fn same_node(a: &NodeRef, b: &NodeRef) -> bool {
    NodeKey::of(a) == NodeKey::of(b)
}

struct ActionNode<F> {
    name: String,
    action: F,
}

impl<F> fmt::Debug for ActionNode<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionNode").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Node for ActionNode<F>
where
    F: Fn(&Context) -> ComputeState + Send + Sync,
{
    async fn compute(&self, ctx: &Context) -> ComputeState {
        (self.action)(ctx)
    }

    fn decide_capability(&self) -> bool {
        false
    }
}

struct DecisionNode<F> {
    name: String,
    decision: F,
}

impl<F> fmt::Debug for DecisionNode<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionNode").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Node for DecisionNode<F>
where
    F: Fn(&Context) -> ComputeState + Send + Sync,
{
    async fn compute(&self, ctx: &Context) -> ComputeState {
        (self.decision)(ctx)
    }

    fn decide_capability(&self) -> bool {
        true
    }
}

/// Wrap a closure as an action node. The name appears in validation errors
/// and log output.
pub fn new_action_node<F>(name: impl Into<String>, action: F) -> NodeRef
where
    F: Fn(&Context) -> ComputeState + Send + Sync + 'static,
{
    Arc::new(ActionNode {
        name: name.into(),
        action,
    })
}

/// Wrap a closure as a decision node.
pub fn new_decision_node<F>(name: impl Into<String>, decision: F) -> NodeRef
where
    F: Fn(&Context) -> ComputeState + Send + Sync + 'static,
{
    Arc::new(DecisionNode {
        name: name.into(),
        decision,
    })
}
