//! The node system: a mutable builder frozen into an immutable routing
//! structure.

use std::collections::HashMap;

use crate::error::{BuildError, SystemError, ValidationError};
use crate::node::{NodeKey, NodeRef};

use super::types::{JoinMode, NodeLink};
use super::validator;

type BranchIndex = HashMap<NodeKey, HashMap<Option<bool>, Vec<NodeRef>>>;

/// A system of action and decision nodes wired by links and join modes.
///
/// Populate it with [`NodeSystem::add_node`], [`NodeSystem::add_link`],
/// [`NodeSystem::add_link_on_branch`] and
/// [`NodeSystem::configure_join_mode_on_node`], check it with
/// [`NodeSystem::is_valid`], then freeze it with [`NodeSystem::activate`].
/// An activated system is immutable and safe to share across concurrent
/// computations.
#[derive(Debug, Default)]
pub struct NodeSystem {
    activated: bool,
    nodes: Vec<NodeRef>,
    links: Vec<NodeLink>,
    join_modes: HashMap<NodeKey, JoinMode>,

    initial_nodes: Vec<NodeRef>,
    follow_index: BranchIndex,
    ancestors_index: BranchIndex,
}

impl NodeSystem {
    /// An empty system, to be populated, validated and activated before use.
    pub fn new() -> Self {
        NodeSystem::default()
    }

    /// Declare a node. Declaring the same node value twice is caught by
    /// [`NodeSystem::is_valid`].
    pub fn add_node(&mut self, node: NodeRef) -> Result<(), BuildError> {
        if self.activated {
            return Err(BuildError::FrozenOnAddNode);
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Configure how multiple inbound links of `node` combine. Last write
    /// wins; the node does not have to be declared yet.
    pub fn configure_join_mode_on_node(
        &mut self,
        node: &NodeRef,
        mode: JoinMode,
    ) -> Result<(), BuildError> {
        if self.activated {
            return Err(BuildError::FrozenOnJoinMode);
        }
        self.join_modes.insert(NodeKey::of(node), mode);
        Ok(())
    }

    /// Link an action node to a successor.
    pub fn add_link(&mut self, from: &NodeRef, to: &NodeRef) -> Result<(), BuildError> {
        self.add_link_inner(from, to, None)
    }

    /// Link a decision node to a successor on one of its branches.
    pub fn add_link_on_branch(
        &mut self,
        from: &NodeRef,
        to: &NodeRef,
        branch: bool,
    ) -> Result<(), BuildError> {
        self.add_link_inner(from, to, Some(branch))
    }

    fn add_link_inner(
        &mut self,
        from: &NodeRef,
        to: &NodeRef,
        branch: Option<bool>,
    ) -> Result<(), BuildError> {
        if self.activated {
            return Err(BuildError::FrozenOnAddLink);
        }
        if branch.is_none() && from.decide_capability() {
            return Err(BuildError::MissingBranch);
        }
        if branch.is_some() && !from.decide_capability() {
            return Err(BuildError::UnneededBranch);
        }
        if NodeKey::of(from) == NodeKey::of(to) {
            return Err(BuildError::SelfLink);
        }

        self.links.push(match branch {
            Some(branch) => NodeLink::on_branch(from.clone(), to.clone(), branch),
            None => NodeLink::new(from.clone(), to.clone()),
        });
        Ok(())
    }

    /// Run all structural checks and collect every error found: orphan
    /// decision nodes, cycles, undeclared link endpoints, duplicate node
    /// declarations, and ambiguous fan-in without a join mode.
    pub fn is_valid(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        errors.extend(validator::check_orphan_decision_nodes(&self.nodes, &self.links));
        errors.extend(validator::check_cycles(&self.nodes, &self.links));
        errors.extend(validator::check_undeclared_nodes(&self.nodes, &self.links));
        errors.extend(validator::check_duplicate_nodes(&self.nodes));
        errors.extend(validator::check_join_modes(&self.links, &self.join_modes));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Freeze the system and build its routing indices: the initial-node
    /// set, the follow index and the ancestors index. Refuses when the
    /// system does not validate. Idempotent.
    pub fn activate(&mut self) -> Result<(), SystemError> {
        if self.activated {
            return Ok(());
        }
        if self.is_valid().is_err() {
            return Err(SystemError::UnvalidatedSystem);
        }

        let mut follow_index: BranchIndex = HashMap::new();
        let mut ancestors_index: BranchIndex = HashMap::new();
        let mut link_targets: Vec<NodeKey> = Vec::new();

        for link in &self.links {
            follow_index
                .entry(NodeKey::of(&link.from))
                .or_default()
                .entry(link.branch)
                .or_default()
                .push(link.to.clone());
            ancestors_index
                .entry(NodeKey::of(&link.to))
                .or_default()
                .entry(link.branch)
                .or_default()
                .push(link.from.clone());
            link_targets.push(NodeKey::of(&link.to));
        }

        self.initial_nodes = self
            .nodes
            .iter()
            .filter(|node| !link_targets.contains(&NodeKey::of(node)))
            .cloned()
            .collect();
        self.follow_index = follow_index;
        self.ancestors_index = ancestors_index;
        self.activated = true;

        tracing::debug!(
            nodes = self.nodes.len(),
            links = self.links.len(),
            initial_nodes = self.initial_nodes.len(),
            "node system activated"
        );
        Ok(())
    }

    /// Whether [`NodeSystem::activate`] has run successfully.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// The nodes a computation begins at: every declared node that is no
    /// link's target, in declaration order.
    pub fn initial_nodes(&self) -> &[NodeRef] {
        &self.initial_nodes
    }

    /// Direct successors of `node` reached on `branch` (`None` for action
    /// nodes). Empty when there is no match.
    pub fn follow(&self, node: &NodeRef, branch: Option<bool>) -> Result<&[NodeRef], SystemError> {
        if !self.activated {
            return Err(SystemError::FollowOnUnactivated);
        }
        Ok(self.followers_on(NodeKey::of(node), branch))
    }

    /// Direct predecessors reaching `node` on `branch`. Empty when there is
    /// no match.
    pub fn ancestors(
        &self,
        node: &NodeRef,
        branch: Option<bool>,
    ) -> Result<&[NodeRef], SystemError> {
        if !self.activated {
            return Err(SystemError::AncestorsOnUnactivated);
        }
        Ok(self
            .ancestors_index
            .get(&NodeKey::of(node))
            .and_then(|by_branch| by_branch.get(&branch))
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// The configured join mode of `node`, defaulting to [`JoinMode::None`].
    pub fn join_mode_of_node(&self, node: &NodeRef) -> JoinMode {
        self.join_modes
            .get(&NodeKey::of(node))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn followers_on(&self, key: NodeKey, branch: Option<bool>) -> &[NodeRef] {
        self.follow_index
            .get(&key)
            .and_then(|by_branch| by_branch.get(&branch))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every inbound link of the node behind `key`, as (branch label,
    /// ancestor) pairs.
    pub(crate) fn gating_ancestors(&self, key: NodeKey) -> Vec<(Option<bool>, NodeRef)> {
        let mut gates = Vec::new();
        for link in &self.links {
            if NodeKey::of(&link.to) == key {
                gates.push((link.branch, link.from.clone()));
            }
        }
        gates
    }

    pub(crate) fn join_mode_of_key(&self, key: NodeKey) -> JoinMode {
        self.join_modes.get(&key).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::node::{new_action_node, new_decision_node, ComputeState};

    fn action(name: &str) -> NodeRef {
        new_action_node(name, |_: &Context| ComputeState::new_continue())
    }

    fn decision(name: &str) -> NodeRef {
        new_decision_node(name, |_: &Context| ComputeState::new_continue_on_branch(true))
    }

    fn linear_system() -> (NodeSystem, NodeRef, NodeRef) {
        let a = action("a");
        let b = action("b");
        let mut system = NodeSystem::new();
        system.add_node(a.clone()).unwrap();
        system.add_node(b.clone()).unwrap();
        system.add_link(&a, &b).unwrap();
        (system, a, b)
    }

    #[test]
    fn test_branch_rules_on_link_construction() {
        let a = action("a");
        let b = action("b");
        let d = decision("d");
        let mut system = NodeSystem::new();

        assert_eq!(system.add_link(&d, &b), Err(BuildError::MissingBranch));
        assert_eq!(
            system.add_link_on_branch(&a, &b, true),
            Err(BuildError::UnneededBranch)
        );
        assert_eq!(system.add_link(&a, &a), Err(BuildError::SelfLink));

        assert!(system.add_link(&a, &b).is_ok());
        assert!(system.add_link_on_branch(&d, &b, false).is_ok());
    }

    #[test]
    fn test_activation_freezes_mutators() {
        let (mut system, a, b) = linear_system();
        system.activate().unwrap();
        assert!(system.is_activated());

        let c = action("c");
        assert_eq!(system.add_node(c.clone()), Err(BuildError::FrozenOnAddNode));
        assert_eq!(system.add_link(&b, &c), Err(BuildError::FrozenOnAddLink));
        assert_eq!(
            system.configure_join_mode_on_node(&b, JoinMode::And),
            Err(BuildError::FrozenOnJoinMode)
        );

        // The failed mutations left the routing untouched.
        assert_eq!(system.initial_nodes().len(), 1);
        assert_eq!(system.follow(&a, None).unwrap().len(), 1);
    }

    #[test]
    fn test_activate_refuses_invalid_system() {
        let a = action("a");
        let b = action("b");
        let mut system = NodeSystem::new();
        system.add_node(a.clone()).unwrap();
        system.add_node(b.clone()).unwrap();
        system.add_link(&a, &b).unwrap();
        system.add_link(&b, &a).unwrap();

        assert_eq!(system.activate(), Err(SystemError::UnvalidatedSystem));
        assert!(!system.is_activated());
    }

    #[test]
    fn test_activate_is_idempotent() {
        let (mut system, a, _) = linear_system();
        assert_eq!(system.activate(), Ok(()));
        assert_eq!(system.activate(), Ok(()));
        assert_eq!(system.initial_nodes().len(), 1);
        assert!(crate::node::same_node(&system.initial_nodes()[0], &a));
    }

    #[test]
    fn test_queries_fail_before_activation() {
        let (system, a, _) = linear_system();
        assert_eq!(
            system.follow(&a, None).unwrap_err(),
            SystemError::FollowOnUnactivated
        );
        assert_eq!(
            system.ancestors(&a, None).unwrap_err(),
            SystemError::AncestorsOnUnactivated
        );
    }

    #[test]
    fn test_follow_and_ancestors_by_branch() {
        let d = decision("d");
        let t = action("t");
        let f = action("f");
        let mut system = NodeSystem::new();
        system.add_node(d.clone()).unwrap();
        system.add_node(t.clone()).unwrap();
        system.add_node(f.clone()).unwrap();
        system.add_link_on_branch(&d, &t, true).unwrap();
        system.add_link_on_branch(&d, &f, false).unwrap();
        system.activate().unwrap();

        let on_true = system.follow(&d, Some(true)).unwrap();
        assert_eq!(on_true.len(), 1);
        assert!(crate::node::same_node(&on_true[0], &t));

        let on_false = system.follow(&d, Some(false)).unwrap();
        assert_eq!(on_false.len(), 1);
        assert!(crate::node::same_node(&on_false[0], &f));

        assert!(system.follow(&d, None).unwrap().is_empty());
        assert!(system.follow(&t, None).unwrap().is_empty());

        let up = system.ancestors(&t, Some(true)).unwrap();
        assert_eq!(up.len(), 1);
        assert!(crate::node::same_node(&up[0], &d));
        assert!(system.ancestors(&t, None).unwrap().is_empty());
    }

    #[test]
    fn test_initial_nodes_preserve_declaration_order() {
        let a = action("a");
        let b = action("b");
        let c = action("c");
        let mut system = NodeSystem::new();
        system.add_node(c.clone()).unwrap();
        system.add_node(a.clone()).unwrap();
        system.add_node(b.clone()).unwrap();
        system.add_link(&a, &b).unwrap();
        system.activate().unwrap();

        let initial = system.initial_nodes();
        assert_eq!(initial.len(), 2);
        assert!(crate::node::same_node(&initial[0], &c));
        assert!(crate::node::same_node(&initial[1], &a));
    }

    #[test]
    fn test_join_mode_configuration() {
        let (mut system, _, b) = linear_system();
        assert_eq!(system.join_mode_of_node(&b), JoinMode::None);

        system.configure_join_mode_on_node(&b, JoinMode::And).unwrap();
        system.configure_join_mode_on_node(&b, JoinMode::Or).unwrap();
        assert_eq!(system.join_mode_of_node(&b), JoinMode::Or);
    }

    #[test]
    fn test_is_valid_collects_everything_and_is_pure() {
        let a = action("a");
        let b = action("b");
        let d = decision("orphan");
        let undeclared = action("undeclared");
        let mut system = NodeSystem::new();
        system.add_node(a.clone()).unwrap();
        system.add_node(a.clone()).unwrap();
        system.add_node(d).unwrap();
        system.add_node(b.clone()).unwrap();
        system.add_link(&a, &b).unwrap();
        system.add_link(&undeclared, &b).unwrap();

        let first = system.is_valid().unwrap_err();
        // Orphan decision, undeclared 'from', duplicate of a, and b's
        // unjoined fan-in, all in one pass.
        assert_eq!(first.len(), 4);

        let second = system.is_valid().unwrap_err();
        assert_eq!(first, second);
    }
}
