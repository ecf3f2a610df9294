//! `engine` crate — record factory, the data processor, and the chain runner.

pub mod action;
pub mod dag;
pub mod error;
pub mod executor;
pub mod factory;
pub mod models;
pub mod processor;

pub use action::{render_template, targets_for, ActionTarget};
pub use dag::validate_dag;
pub use error::EngineError;
pub use executor::{ExecutionResult, ExecutorConfig, UnknownNodePolicy, WorkflowExecutor};
pub use factory::{create_record, create_record_at};
pub use models::{Edge, NodeDefinition, Trigger, Workflow};
pub use processor::{process, process_at};
