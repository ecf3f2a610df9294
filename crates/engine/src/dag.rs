//! DAG validation — run this before threading a record through a workflow.
//!
//! Rules enforced:
//! 1. Node IDs must be unique within the workflow.
//! 2. Every edge must reference valid node IDs (both `from` and `to`).
//! 3. The directed graph must be acyclic.
//!
//! Returns node IDs in execution order.  Nodes that become ready at the same
//! time run in the order they were declared, so a workflow always produces
//! the same `processedBy` trail.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{models::Workflow, EngineError};

/// Validate the workflow's DAG and return nodes in topological execution order.
///
/// # Errors
/// - [`EngineError::DuplicateNodeId`] if two nodes share an ID.
/// - [`EngineError::UnknownNodeReference`] if an edge references a missing node.
/// - [`EngineError::CycleDetected`] if the graph is not acyclic.
pub fn validate_dag(workflow: &Workflow) -> Result<Vec<String>, EngineError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    for node in &workflow.nodes {
        if !seen_ids.insert(node.id.as_str()) {
            return Err(EngineError::DuplicateNodeId(node.id.clone()));
        }
    }

    for edge in &workflow.edges {
        for (node_id, side) in [(&edge.from, "from"), (&edge.to, "to")] {
            if !seen_ids.contains(node_id.as_str()) {
                return Err(EngineError::UnknownNodeReference {
                    node_id: node_id.clone(),
                    side,
                });
            }
        }
    }

    // Kahn's algorithm over declaration-ordered adjacency lists.
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut in_degree: HashMap<&str, usize> =
        workflow.nodes.iter().map(|n| (n.id.as_str(), 0)).collect();

    for edge in &workflow.edges {
        successors
            .entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
        *in_degree.entry(edge.to.as_str()).or_insert(0) += 1;
    }

    let mut ready: VecDeque<&str> = workflow
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| in_degree[id] == 0)
        .collect();

    let mut order: Vec<String> = Vec::with_capacity(workflow.nodes.len());

    while let Some(node_id) = ready.pop_front() {
        order.push(node_id.to_owned());

        for &next in successors.get(node_id).into_iter().flatten() {
            if let Some(deg) = in_degree.get_mut(next) {
                *deg -= 1;
                if *deg == 0 {
                    ready.push_back(next);
                }
            }
        }
    }

    if order.len() != workflow.nodes.len() {
        return Err(EngineError::CycleDetected);
    }

    Ok(order)
}
