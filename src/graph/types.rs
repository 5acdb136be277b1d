//! Link and join-mode primitives of a node system.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{NodeKey, NodeRef};

/// Directed link between two nodes.
///
/// The branch label is present iff the source is a decision node: the link
/// is then traversed only when the decision continues on that branch.
#[derive(Debug, Clone)]
pub struct NodeLink {
    pub from: NodeRef,
    pub to: NodeRef,
    pub branch: Option<bool>,
}

impl NodeLink {
    pub(crate) fn new(from: NodeRef, to: NodeRef) -> Self {
        NodeLink {
            from,
            to,
            branch: None,
        }
    }

    pub(crate) fn on_branch(from: NodeRef, to: NodeRef, branch: bool) -> Self {
        NodeLink {
            from,
            to,
            branch: Some(branch),
        }
    }

    /// Whether both links connect the same node handles on the same branch.
    pub(crate) fn same_link(&self, other: &NodeLink) -> bool {
        NodeKey::of(&self.from) == NodeKey::of(&other.from)
            && NodeKey::of(&self.to) == NodeKey::of(&other.to)
            && self.branch == other.branch
    }
}

impl fmt::Display for NodeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.branch {
            Some(branch) => write!(f, "{:?} -[{}]-> {:?}", self.from, branch, self.to),
            None => write!(f, "{:?} -> {:?}", self.from, self.to),
        }
    }
}

/// How multiple inbound links of a node combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinMode {
    /// A single inbound link gates the node; more than one is a structural
    /// error.
    #[default]
    None,
    /// Every inbound link must route to the node, otherwise it is skipped.
    And,
    /// Any inbound link routing to the node triggers it, at most once.
    Or,
}
