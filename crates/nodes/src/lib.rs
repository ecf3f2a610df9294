//! `nodes` crate — the workflow record and the evaluators nodes dispatch to.
//!
//! The record model lives here (rather than in the engine crate) so the
//! evaluators and the engine can share it without a circular dependency.

pub mod appliers;
pub mod condition;
pub mod config;
pub mod error;
pub mod keywords;
pub mod record;
pub mod resolver;

pub use appliers::{apply_categories, apply_tags, AppliedLabels};
pub use condition::{evaluate, Operator, UnsupportedOperator};
pub use config::{ClassificationConfig, ConditionConfig, NodeConfig, NodeKind, TaggingConfig};
pub use error::NodeError;
pub use record::{Payload, TriggerEvent, TriggerKind, WorkflowRecord, DEFAULT_TARGET_TYPE};
pub use resolver::resolve;
