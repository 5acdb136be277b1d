//! Per-node computation result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Tag of a [`ComputeState`].
///
/// A branched continue is a `Continue` kind with a branch value attached;
/// there is no separate tag for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateKind {
    Continue,
    Skip,
    Abort,
}

/// Result of one node computation.
///
/// Action nodes emit `Continue`, `Skip`, or `Abort`; decision nodes emit
/// `Continue on <branch>`, `Skip`, or `Abort`. The driver routes a
/// computation through the graph based on these values.
#[derive(Debug, Clone)]
pub struct ComputeState {
    kind: StateKind,
    branch: Option<bool>,
    error: Option<NodeError>,
}

impl ComputeState {
    /// A plain continue: proceed along branchless outbound links.
    pub fn new_continue() -> Self {
        ComputeState {
            kind: StateKind::Continue,
            branch: None,
            error: None,
        }
    }

    /// A branched continue: proceed only along outbound links labeled `branch`.
    pub fn new_continue_on_branch(branch: bool) -> Self {
        ComputeState {
            kind: StateKind::Continue,
            branch: Some(branch),
            error: None,
        }
    }

    /// A voluntary abstention: downstream treats the node as not having
    /// emitted success.
    pub fn new_skip() -> Self {
        ComputeState {
            kind: StateKind::Skip,
            branch: None,
            error: None,
        }
    }

    /// A failure that aborts the whole computation.
    pub fn new_abort(error: NodeError) -> Self {
        ComputeState {
            kind: StateKind::Abort,
            branch: None,
            error: Some(error),
        }
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn branch(&self) -> Option<bool> {
        self.branch
    }

    pub fn error(&self) -> Option<&NodeError> {
        self.error.as_ref()
    }

    /// Whether this state permits traversal of an outbound link labeled
    /// `branch`. Skip and abort states route nowhere.
    pub(crate) fn routes_on(&self, branch: Option<bool>) -> bool {
        self.kind == StateKind::Continue && self.branch == branch
    }
}

impl fmt::Display for ComputeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.branch, &self.error) {
            (StateKind::Continue, Some(branch), _) => write!(f, "'Continue on {}'", branch),
            (StateKind::Continue, None, _) => write!(f, "'Continue'"),
            (StateKind::Skip, _, _) => write!(f, "'Skip'"),
            (StateKind::Abort, _, Some(error)) => write!(f, "'Abort on {}'", error),
            (StateKind::Abort, _, None) => write!(f, "'Abort'"),
        }
    }
}

impl PartialEq for ComputeState {
    /// Kind and branch must match; abort errors compare by message.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.branch == other.branch
            && self.error.as_ref().map(ToString::to_string)
                == other.error.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Case {
        name: &'static str,
        state: ComputeState,
        expected_kind: StateKind,
        expected_branch: Option<bool>,
        expected_error: Option<NodeError>,
        expected_string: &'static str,
    }

    #[test]
    fn test_compute_state_constructors() {
        let cases = vec![
            Case {
                name: "should generate a continue state",
                state: ComputeState::new_continue(),
                expected_kind: StateKind::Continue,
                expected_branch: None,
                expected_error: None,
                expected_string: "'Continue'",
            },
            Case {
                name: "should generate a continue state on branch 'true'",
                state: ComputeState::new_continue_on_branch(true),
                expected_kind: StateKind::Continue,
                expected_branch: Some(true),
                expected_error: None,
                expected_string: "'Continue on true'",
            },
            Case {
                name: "should generate a continue state on branch 'false'",
                state: ComputeState::new_continue_on_branch(false),
                expected_kind: StateKind::Continue,
                expected_branch: Some(false),
                expected_error: None,
                expected_string: "'Continue on false'",
            },
            Case {
                name: "should generate a skip state",
                state: ComputeState::new_skip(),
                expected_kind: StateKind::Skip,
                expected_branch: None,
                expected_error: None,
                expected_string: "'Skip'",
            },
            Case {
                name: "should generate a abort state",
                state: ComputeState::new_abort(NodeError::ExecutionError("error".into())),
                expected_kind: StateKind::Abort,
                expected_branch: None,
                expected_error: Some(NodeError::ExecutionError("error".into())),
                expected_string: "'Abort on Execution error: error'",
            },
        ];

        for case in cases {
            assert_eq!(case.state.kind(), case.expected_kind, "{}", case.name);
            assert_eq!(case.state.branch(), case.expected_branch, "{}", case.name);
            assert_eq!(case.state.error(), case.expected_error.as_ref(), "{}", case.name);
            assert_eq!(case.state.to_string(), case.expected_string, "{}", case.name);
        }
    }

    #[test]
    fn test_compute_state_equality_by_error_message() {
        let a = ComputeState::new_abort(NodeError::ExecutionError("boom".into()));
        let b = ComputeState::new_abort(NodeError::ExecutionError("boom".into()));
        let c = ComputeState::new_abort(NodeError::ExecutionError("other".into()));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ComputeState::new_skip());
    }

    #[test]
    fn test_compute_state_branch_distinguishes_continues() {
        assert_ne!(
            ComputeState::new_continue(),
            ComputeState::new_continue_on_branch(true)
        );
        assert_ne!(
            ComputeState::new_continue_on_branch(true),
            ComputeState::new_continue_on_branch(false)
        );
    }

    #[test]
    fn test_routes_on() {
        assert!(ComputeState::new_continue().routes_on(None));
        assert!(!ComputeState::new_continue().routes_on(Some(true)));
        assert!(ComputeState::new_continue_on_branch(true).routes_on(Some(true)));
        assert!(!ComputeState::new_continue_on_branch(true).routes_on(Some(false)));
        assert!(!ComputeState::new_continue_on_branch(true).routes_on(None));
        assert!(!ComputeState::new_skip().routes_on(None));
        assert!(!ComputeState::new_abort(NodeError::ExecutionError("x".into())).routes_on(None));
    }
}
