//! Node-level error type.

use thiserror::Error;

/// Errors raised while turning editor input into a [`crate::NodeConfig`].
///
/// Evaluation itself never fails: missing fields, unknown operators and
/// unknown labels all degrade to "no match".
#[derive(Debug, Error)]
pub enum NodeError {
    /// The config JSON for a recognized node type has the wrong shape.
    #[error("invalid config for '{node_type}' node: {source}")]
    InvalidConfig {
        node_type: String,
        #[source]
        source: serde_json::Error,
    },
}
