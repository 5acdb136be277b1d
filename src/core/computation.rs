//! Computation driver — one traversal of an activated node system.
//!
//! A [`Computation`] walks the graph from the initial nodes, invoking each
//! node once it becomes eligible under its join mode, routing on decision
//! branches, and collecting per-node [`ComputeState`]s into a [`Report`].
//! Eligibility is a pure function over the recorded states and the routing
//! indices, so the sequential and parallel dispatchers share it unchanged.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::error::{ComputationError, NodeError};
use crate::graph::{JoinMode, NodeSystem};
use crate::node::{ComputeState, NodeKey, NodeRef, StateKind};

use super::context::Context;
use super::report::Report;

/// Scheduling mode of a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComputationMode {
    /// One node at a time, in a deterministic order.
    #[default]
    Sequential,
    /// Eligible nodes run concurrently. Each node is still invoked at most
    /// once, an abort still stops all further scheduling, and no node starts
    /// before its gating ancestors resolved.
    Parallel,
}

type StateMap = HashMap<NodeKey, (NodeRef, ComputeState)>;

/// One traversal of an activated node system against one context.
pub struct Computation {
    id: Uuid,
    system: Arc<NodeSystem>,
    mode: ComputationMode,
    context: Arc<Context>,
    states: StateMap,
    first_abort: Option<NodeError>,
}

impl Computation {
    /// A sequential computation over `system`. Fails when the system is not
    /// activated.
    pub fn new(system: Arc<NodeSystem>, context: Context) -> Result<Self, ComputationError> {
        Computation::with_mode(system, context, ComputationMode::Sequential)
    }

    pub fn with_mode(
        system: Arc<NodeSystem>,
        context: Context,
        mode: ComputationMode,
    ) -> Result<Self, ComputationError> {
        if !system.is_activated() {
            return Err(ComputationError::UnactivatedSystem);
        }
        Ok(Computation {
            id: Uuid::new_v4(),
            system,
            mode,
            context: Arc::new(context),
            states: HashMap::new(),
            first_abort: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Drive the traversal to completion: no node is eligible anymore, or an
    /// abort occurred and every in-flight node has returned.
    pub async fn run(mut self) -> Report {
        tracing::debug!(computation = %self.id, mode = ?self.mode, "computation started");

        match self.mode {
            ComputationMode::Sequential => self.run_sequential().await,
            ComputationMode::Parallel => self.run_parallel().await,
        }

        let success = self.first_abort.is_none();
        tracing::debug!(
            computation = %self.id,
            success,
            recorded = self.states.len(),
            "computation finished"
        );

        let context = Arc::try_unwrap(self.context).unwrap_or_else(|shared| (*shared).clone());
        Report::new(success, self.states, context, self.first_abort)
    }

    async fn run_sequential(&mut self) {
        let system = Arc::clone(&self.system);
        let mut pending: VecDeque<NodeRef> = system.initial_nodes().iter().cloned().collect();

        while let Some(node) = pending.pop_front() {
            let key = NodeKey::of(&node);
            if self.states.contains_key(&key) {
                continue;
            }
            match eligibility(&system, &self.states, key) {
                Eligibility::Wait => {}
                Eligibility::SkipOut => {
                    record_state(
                        &mut self.states,
                        &mut self.first_abort,
                        node,
                        ComputeState::new_skip(),
                    );
                    enqueue_followers(&system, key, &mut pending);
                }
                Eligibility::Run => {
                    let state = invoke_node(self.context.as_ref(), &node).await;
                    let aborted = state.kind() == StateKind::Abort;
                    record_state(&mut self.states, &mut self.first_abort, node, state);
                    if aborted {
                        break;
                    }
                    enqueue_followers(&system, key, &mut pending);
                }
            }
        }
    }

    async fn run_parallel(&mut self) {
        let system = Arc::clone(&self.system);
        let mut pending: VecDeque<NodeRef> = system.initial_nodes().iter().cloned().collect();
        let mut running: JoinSet<(NodeRef, ComputeState)> = JoinSet::new();
        let mut in_flight: HashSet<NodeKey> = HashSet::new();

        loop {
            if self.first_abort.is_none() {
                while let Some(node) = pending.pop_front() {
                    let key = NodeKey::of(&node);
                    if self.states.contains_key(&key) || in_flight.contains(&key) {
                        continue;
                    }
                    match eligibility(&system, &self.states, key) {
                        Eligibility::Wait => {}
                        Eligibility::SkipOut => {
                            record_state(
                                &mut self.states,
                                &mut self.first_abort,
                                node,
                                ComputeState::new_skip(),
                            );
                            enqueue_followers(&system, key, &mut pending);
                        }
                        Eligibility::Run => {
                            in_flight.insert(key);
                            let context = Arc::clone(&self.context);
                            running.spawn(async move {
                                let state = invoke_node(context.as_ref(), &node).await;
                                (node, state)
                            });
                        }
                    }
                }
            } else {
                pending.clear();
            }

            match running.join_next().await {
                None => break,
                Some(Ok((node, state))) => {
                    let key = NodeKey::of(&node);
                    in_flight.remove(&key);
                    let aborted = state.kind() == StateKind::Abort;
                    record_state(&mut self.states, &mut self.first_abort, node, state);
                    if !aborted {
                        enqueue_followers(&system, key, &mut pending);
                    }
                }
                Some(Err(join_error)) => {
                    tracing::error!(computation = %self.id, error = %join_error, "node task failed");
                    if self.first_abort.is_none() {
                        self.first_abort = Some(NodeError::ExecutionError(format!(
                            "node computation panicked: {join_error}"
                        )));
                    }
                }
            }
        }
    }
}

enum Eligibility {
    /// Gating ancestors resolved and route here: invoke the node.
    Run,
    /// Some gating ancestor is still unresolved; a later completion may
    /// re-enqueue the node.
    Wait,
    /// An And gate resolved with a non-routing ancestor: record a skip
    /// without invoking the node.
    SkipOut,
}

fn eligibility(system: &NodeSystem, states: &StateMap, key: NodeKey) -> Eligibility {
    let gates = system.gating_ancestors(key);
    if gates.is_empty() {
        return Eligibility::Run;
    }

    let routed = |branch: Option<bool>, ancestor: &NodeRef| {
        states
            .get(&NodeKey::of(ancestor))
            .map(|(_, state)| state.routes_on(branch))
    };

    match system.join_mode_of_key(key) {
        JoinMode::And => {
            let mut all_route = true;
            for (branch, ancestor) in &gates {
                match routed(*branch, ancestor) {
                    None => return Eligibility::Wait,
                    Some(false) => all_route = false,
                    Some(true) => {}
                }
            }
            if all_route {
                Eligibility::Run
            } else {
                Eligibility::SkipOut
            }
        }
        // A None-joined node has a single inbound link; Or fires on the
        // first routing ancestor. Either way the node runs at most once —
        // the state map guards re-entry.
        JoinMode::None | JoinMode::Or => {
            let any_route = gates
                .iter()
                .any(|(branch, ancestor)| routed(*branch, ancestor) == Some(true));
            if any_route {
                Eligibility::Run
            } else {
                Eligibility::Wait
            }
        }
    }
}

async fn invoke_node(context: &Context, node: &NodeRef) -> ComputeState {
    let state = node.compute(context).await;
    if node.decide_capability() && state.kind() == StateKind::Continue && state.branch().is_none() {
        tracing::warn!(node = ?node, "decision node returned a branchless continue");
        return ComputeState::new_abort(NodeError::MissingDecisionBranch);
    }
    state
}

fn record_state(
    states: &mut StateMap,
    first_abort: &mut Option<NodeError>,
    node: NodeRef,
    state: ComputeState,
) {
    tracing::trace!(node = ?node, state = %state, "node state recorded");
    if first_abort.is_none() {
        if let Some(error) = state.error() {
            *first_abort = Some(error.clone());
        }
    }
    states.insert(NodeKey::of(&node), (node, state));
}

fn enqueue_followers(system: &NodeSystem, key: NodeKey, pending: &mut VecDeque<NodeRef>) {
    for branch in [None, Some(true), Some(false)] {
        for follower in system.followers_on(key, branch) {
            pending.push_back(follower.clone());
        }
    }
}
