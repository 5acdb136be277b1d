use thiserror::Error;

/// Structural defects of a node system, collected by
/// [`NodeSystem::is_valid`](crate::graph::NodeSystem::is_valid).
///
/// Validation never short-circuits: one call returns every defect found, so
/// the caller sees the full picture at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("can't have decision node without link from it: {node}")]
    OrphanDecisionNode { node: String },
    #[error("Can't have cycle in links between nodes: [{links}]")]
    CyclicLinks { links: String },
    #[error("can't have undeclared node '{node}' as '{side}' in branch link {link}")]
    UndeclaredLinkNode {
        node: String,
        side: &'static str,
        link: String,
    },
    #[error("can't have multiple instances ({count}) of the same node: {node}")]
    MultipleNodeInstances { count: usize, node: String },
    #[error("can't have multiple links ({count}) to the same node: {node} without join mode")]
    MultipleLinksWithoutJoinMode { count: usize, node: String },
}
