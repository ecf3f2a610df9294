//! Engine-level error types.

use thiserror::Error;

/// Errors produced by the workflow engine (validation + chain execution).
///
/// Record processing itself cannot fail; these cover malformed workflows.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Validation errors ------

    /// Two or more nodes share the same ID.
    #[error("duplicate node ID: '{0}'")]
    DuplicateNodeId(String),

    /// An edge references a node ID that doesn't exist in the workflow.
    #[error("edge references unknown node '{node_id}' ({side} side)")]
    UnknownNodeReference {
        node_id: String,
        side: &'static str,
    },

    /// Topological sort detected a cycle.
    #[error("workflow graph contains a cycle")]
    CycleDetected,

    // ------ Execution errors ------

    /// A node's config could not be parsed for its type.
    #[error("node '{node_id}' has an invalid config")]
    InvalidNodeConfig {
        node_id: String,
        #[source]
        source: nodes::NodeError,
    },

    /// A node type the engine does not evaluate, under a strict policy.
    #[error("node '{node_id}' has unsupported type '{node_type}'")]
    UnknownNodeType {
        node_id: String,
        node_type: String,
    },
}
