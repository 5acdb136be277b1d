use thiserror::Error;

/// Activation refusal and routing queries made before activation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SystemError {
    #[error("can't activate a unvalidated node system")]
    UnvalidatedSystem,
    #[error("can't follow a node if system is not activated")]
    FollowOnUnactivated,
    #[error("can't get ancestors of a node if system is not activated")]
    AncestorsOnUnactivated,
}
