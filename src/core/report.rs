//! Aggregated result of one computation.

use std::collections::HashMap;

use crate::error::NodeError;
use crate::node::{ComputeState, NodeKey, NodeRef};

use super::context::Context;

/// What one computation produced: the overall success flag, the recorded
/// per-node states, the final context, and the first abort error when the
/// computation failed.
///
/// A node that never became eligible — its branch was not taken, or an
/// abort stopped scheduling first — has no entry.
#[derive(Debug)]
pub struct Report {
    success: bool,
    states: HashMap<NodeKey, (NodeRef, ComputeState)>,
    context: Context,
    error: Option<NodeError>,
}

impl Report {
    pub(crate) fn new(
        success: bool,
        states: HashMap<NodeKey, (NodeRef, ComputeState)>,
        context: Context,
        error: Option<NodeError>,
    ) -> Self {
        Report {
            success,
            states,
            context,
            error,
        }
    }

    /// True iff no node aborted.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The first abort error, when [`Report::success`] is false. Later
    /// aborts stay visible through their nodes' recorded states.
    pub fn error(&self) -> Option<&NodeError> {
        self.error.as_ref()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    /// The state `node` ended in, or `None` when it was never reached.
    pub fn state_of(&self, node: &NodeRef) -> Option<&ComputeState> {
        self.states
            .get(&NodeKey::of(node))
            .map(|(_, state)| state)
    }

    pub fn is_recorded(&self, node: &NodeRef) -> bool {
        self.states.contains_key(&NodeKey::of(node))
    }

    /// Every recorded (node, state) pair, in no particular order.
    pub fn recorded(&self) -> impl Iterator<Item = (&NodeRef, &ComputeState)> {
        self.states.values().map(|(node, state)| (node, state))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
