//! Structural validation of a node system.
//!
//! Five checks run unconditionally; every error found is collected so one
//! `is_valid` call surfaces the full picture.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::node::{NodeKey, NodeRef};

use super::types::{JoinMode, NodeLink};

/// A decision node with no outbound link can never route a computation.
pub(crate) fn check_orphan_decision_nodes(
    nodes: &[NodeRef],
    links: &[NodeLink],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for node in nodes {
        if !node.decide_capability() {
            continue;
        }
        let key = NodeKey::of(node);
        let has_outbound = links.iter().any(|link| NodeKey::of(&link.from) == key);
        if !has_outbound {
            errors.push(ValidationError::OrphanDecisionNode {
                node: format!("{:?}", node),
            });
        }
    }
    errors
}

/// Enumerate every link walk that returns to its starting node, then
/// deduplicate by unordered link-set equality: two walks over the same set
/// of links are the same cycle, whichever node they were discovered from.
pub(crate) fn check_cycles(nodes: &[NodeRef], links: &[NodeLink]) -> Vec<ValidationError> {
    let mut cycles: Vec<Vec<&NodeLink>> = Vec::new();
    for node in nodes {
        let key = NodeKey::of(node);
        cycles.extend(walk_cycles(links, key, key, Vec::new()));
    }

    let mut distinct: Vec<Vec<&NodeLink>> = Vec::new();
    for cycle in cycles {
        if !distinct.iter().any(|seen| same_cycle(seen, &cycle)) {
            distinct.push(cycle);
        }
    }

    distinct
        .into_iter()
        .map(|cycle| ValidationError::CyclicLinks {
            links: cycle
                .iter()
                .map(|link| link.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn walk_cycles<'a>(
    links: &'a [NodeLink],
    top: NodeKey,
    current: NodeKey,
    walked: Vec<&'a NodeLink>,
) -> Vec<Vec<&'a NodeLink>> {
    if !walked.is_empty() {
        if current == top {
            return vec![walked];
        }
        // Revisiting any other node means this walk cannot close on `top`.
        if walked.iter().any(|link| NodeKey::of(&link.from) == current) {
            return Vec::new();
        }
    }

    let mut cycles = Vec::new();
    for link in links.iter().filter(|link| NodeKey::of(&link.from) == current) {
        let mut next = walked.clone();
        next.push(link);
        cycles.extend(walk_cycles(links, top, NodeKey::of(&link.to), next));
    }
    cycles
}

fn same_cycle(a: &[&NodeLink], b: &[&NodeLink]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|left| b.iter().any(|right| left.same_link(right)))
}

/// Every link endpoint must be declared in the system's node list.
pub(crate) fn check_undeclared_nodes(
    nodes: &[NodeRef],
    links: &[NodeLink],
) -> Vec<ValidationError> {
    let declared: Vec<NodeKey> = nodes.iter().map(NodeKey::of).collect();
    let mut errors = Vec::new();
    for link in links {
        if !declared.contains(&NodeKey::of(&link.from)) {
            errors.push(ValidationError::UndeclaredLinkNode {
                node: format!("{:?}", link.from),
                side: "from",
                link: link.to_string(),
            });
        }
        if !declared.contains(&NodeKey::of(&link.to)) {
            errors.push(ValidationError::UndeclaredLinkNode {
                node: format!("{:?}", link.to),
                side: "to",
                link: link.to_string(),
            });
        }
    }
    errors
}

/// The same node value must not be declared more than once.
pub(crate) fn check_duplicate_nodes(nodes: &[NodeRef]) -> Vec<ValidationError> {
    // First-occurrence order keeps repeated validation runs identical.
    let mut counts: Vec<(NodeKey, &NodeRef, usize)> = Vec::new();
    for node in nodes {
        let key = NodeKey::of(node);
        match counts.iter_mut().find(|(seen, _, _)| *seen == key) {
            Some((_, _, count)) => *count += 1,
            None => counts.push((key, node, 1)),
        }
    }

    counts
        .into_iter()
        .filter(|(_, _, count)| *count > 1)
        .map(|(_, node, count)| ValidationError::MultipleNodeInstances {
            count,
            node: format!("{:?}", node),
        })
        .collect()
}

/// A node with two or more inbound links needs an And/Or join mode to make
/// its fan-in unambiguous.
pub(crate) fn check_join_modes(
    links: &[NodeLink],
    join_modes: &HashMap<NodeKey, JoinMode>,
) -> Vec<ValidationError> {
    let mut counts: Vec<(NodeKey, &NodeRef, usize)> = Vec::new();
    for link in links {
        let key = NodeKey::of(&link.to);
        match counts.iter_mut().find(|(seen, _, _)| *seen == key) {
            Some((_, _, count)) => *count += 1,
            None => counts.push((key, &link.to, 1)),
        }
    }

    counts
        .into_iter()
        .filter(|(key, _, count)| {
            *count > 1 && join_modes.get(key).copied().unwrap_or_default() == JoinMode::None
        })
        .map(|(_, node, count)| ValidationError::MultipleLinksWithoutJoinMode {
            count,
            node: format!("{:?}", node),
        })
        .collect()
}
