use thiserror::Error;

/// Rejected mutations of a [`NodeSystem`](crate::graph::NodeSystem) builder.
///
/// A frozen system refuses every mutator; link construction additionally
/// enforces the branch rules of the decision contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("can't add node, node system is freeze due to activation")]
    FrozenOnAddNode,
    #[error("can't add node join mode, node system is freeze due to activation")]
    FrozenOnJoinMode,
    #[error("can't add branch link, node system is freeze due to activation")]
    FrozenOnAddLink,
    #[error("can't have missing branch")]
    MissingBranch,
    #[error("can't have not needed branch")]
    UnneededBranch,
    #[error("can't have link on from and to the same node")]
    SelfLink,
}
