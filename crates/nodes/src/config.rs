//! Typed node configuration.
//!
//! A node arrives from the editor as a `nodeType` string plus a JSON config
//! object.  [`NodeConfig::parse`] turns that pair into a closed enum so the
//! engine can dispatch exhaustively.  Node types the engine does not evaluate
//! (triggers, actions, …) become [`NodeConfig::PassThrough`].
//!
//! Missing fields fall back to defaults so a half-configured node still runs.
//! Fields of the wrong JSON type are rejected with [`NodeError::InvalidConfig`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::{evaluate, Operator};
use crate::record::WorkflowRecord;
use crate::NodeError;

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Discriminator selecting the evaluator a node dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ConditionLogic,
    AiTagging,
    AiClassification,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::ConditionLogic => "condition-logic",
            NodeKind::AiTagging => "ai-tagging",
            NodeKind::AiClassification => "ai-classification",
            NodeKind::Other(name) => name,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name {
            "condition-logic" => NodeKind::ConditionLogic,
            "ai-tagging" => NodeKind::AiTagging,
            "ai-classification" => NodeKind::AiClassification,
            other => NodeKind::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Per-kind configs
// ---------------------------------------------------------------------------

/// `condition-logic`: compare one field against a literal.
///
/// A node without a field or a value never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    #[serde(default)]
    pub field: String,
    #[serde(default = "unset_operator")]
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ConditionConfig {
    /// Evaluate this condition against `record`.
    pub fn check(&self, record: &WorkflowRecord) -> bool {
        match self.value.as_deref() {
            Some(value) if !self.field.is_empty() => evaluate(&self.field, &self.operator, value, record),
            _ => false,
        }
    }
}

fn unset_operator() -> Operator {
    Operator::from("")
}

/// `ai-tagging`: apply every selected tag whose keywords occur in the email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggingConfig {
    #[serde(default)]
    pub selected_tags: Vec<String>,
    /// Tag → comma-joined keyword list.
    #[serde(default)]
    pub tag_keywords: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

/// `ai-classification`: same shape as tagging, over categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationConfig {
    #[serde(default)]
    pub selected_categories: Vec<String>,
    /// Category → comma-joined keyword list.
    #[serde(default)]
    pub category_keywords: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

// ---------------------------------------------------------------------------
// NodeConfig
// ---------------------------------------------------------------------------

/// Closed set of node configurations the engine understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeConfig {
    ConditionLogic(ConditionConfig),
    AiTagging(TaggingConfig),
    AiClassification(ClassificationConfig),
    /// Any other node type; processing only records the visit.
    PassThrough { node_type: String },
}

impl NodeConfig {
    /// Build a config from the editor's `nodeType` and raw JSON config.
    ///
    /// A `null` config is treated as an empty object.
    ///
    /// # Errors
    /// [`NodeError::InvalidConfig`] when a recognized kind's config is not an
    /// object or has a field of the wrong type.
    pub fn parse(node_type: &str, config: &Value) -> Result<Self, NodeError> {
        let parsed = match NodeKind::from(node_type) {
            NodeKind::ConditionLogic => NodeConfig::ConditionLogic(decode(node_type, config)?),
            NodeKind::AiTagging => NodeConfig::AiTagging(decode(node_type, config)?),
            NodeKind::AiClassification => NodeConfig::AiClassification(decode(node_type, config)?),
            NodeKind::Other(name) => NodeConfig::PassThrough { node_type: name },
        };
        Ok(parsed)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::ConditionLogic(_) => NodeKind::ConditionLogic,
            NodeConfig::AiTagging(_) => NodeKind::AiTagging,
            NodeConfig::AiClassification(_) => NodeKind::AiClassification,
            NodeConfig::PassThrough { node_type } => NodeKind::Other(node_type.clone()),
        }
    }
}

fn decode<T: DeserializeOwned>(node_type: &str, config: &Value) -> Result<T, NodeError> {
    let raw = match config {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };

    serde_json::from_value(raw).map_err(|source| NodeError::InvalidConfig {
        node_type: node_type.to_owned(),
        source,
    })
}
