//! Workflow chain runner.
//!
//! `WorkflowExecutor` threads one record through a workflow:
//! 1. Validates the DAG and produces an execution order.
//! 2. Creates the record from the workflow's trigger kind and the event payload.
//! 3. Parses each node's config into a [`NodeConfig`].
//! 4. Passes the record through [`process`] once per node, feeding each
//!    output into the next call.
//!
//! Processing is pure, so the runner holds no state beyond its config and
//! independent records can be run from any number of threads.

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use nodes::{NodeConfig, Payload, TriggerKind, WorkflowRecord};

use crate::dag::validate_dag;
use crate::factory::create_record;
use crate::models::NodeDefinition;
use crate::processor::process_at;
use crate::{EngineError, Workflow};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do with node types that have no evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownNodePolicy {
    /// Record the visit and move on.
    #[default]
    PassThrough,
    /// Fail the run with [`EngineError::UnknownNodeType`].
    Reject,
}

/// Tuning knobs for the executor.
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    pub unknown_nodes: UnknownNodePolicy,
}

// ---------------------------------------------------------------------------
// Output of a completed execution
// ---------------------------------------------------------------------------

/// The result of running a full workflow.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Identifies this run in logs.
    pub execution_id: Uuid,
    /// Node IDs in the order they were processed.
    pub order: Vec<String>,
    /// The record after the last node.
    pub record: WorkflowRecord,
}

// ---------------------------------------------------------------------------
// WorkflowExecutor
// ---------------------------------------------------------------------------

/// Stateless orchestrator that runs a single workflow execution.
#[derive(Debug, Clone, Default)]
pub struct WorkflowExecutor {
    config: ExecutorConfig,
}

impl WorkflowExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Run the workflow for one triggering event.
    ///
    /// # Errors
    /// DAG validation failures, invalid node configs, and (under
    /// [`UnknownNodePolicy::Reject`]) unsupported node types.
    #[instrument(skip(self, workflow, payload), fields(workflow_id = %workflow.id))]
    pub fn run(&self, workflow: &Workflow, payload: Payload) -> Result<ExecutionResult, EngineError> {
        let order = validate_dag(workflow)?;
        debug!("DAG validated — {} nodes in order: {:?}", order.len(), order);

        let ordered: Vec<&NodeDefinition> = order
            .iter()
            .filter_map(|id| workflow.nodes.iter().find(|n| &n.id == id))
            .collect();

        self.run_ordered(workflow.trigger.kind(), payload, ordered)
    }

    /// Thread a fresh record through `nodes` in the given order.
    ///
    /// No graph checks are made; the caller owns the ordering.
    ///
    /// # Errors
    /// Invalid node configs and, under [`UnknownNodePolicy::Reject`],
    /// unsupported node types.  Configs are all checked before any node runs.
    pub fn run_ordered<'a>(
        &self,
        trigger: TriggerKind,
        payload: Payload,
        nodes: impl IntoIterator<Item = &'a NodeDefinition>,
    ) -> Result<ExecutionResult, EngineError> {
        let execution_id = Uuid::new_v4();

        let steps = nodes
            .into_iter()
            .map(|node| self.parse_node(node).map(|config| (node.id.as_str(), config)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut record = create_record(trigger, payload);
        for (node_id, config) in &steps {
            record = process_at(&record, node_id, config, Utc::now());
        }

        info!(
            "execution {} finished after {} nodes (tags: {:?}, categories: {:?})",
            execution_id,
            record.processed_by.len(),
            record.tags,
            record.categories
        );

        Ok(ExecutionResult {
            execution_id,
            order: record.processed_by.clone(),
            record,
        })
    }

    /// Check a workflow without running it: DAG rules plus every node config.
    ///
    /// Returns the execution order on success.
    pub fn validate(&self, workflow: &Workflow) -> Result<Vec<String>, EngineError> {
        let order = validate_dag(workflow)?;
        for node in &workflow.nodes {
            self.parse_node(node)?;
        }
        Ok(order)
    }

    fn parse_node(&self, node: &NodeDefinition) -> Result<NodeConfig, EngineError> {
        let config = NodeConfig::parse(&node.node_type, &node.config).map_err(|source| {
            EngineError::InvalidNodeConfig {
                node_id: node.id.clone(),
                source,
            }
        })?;

        if let NodeConfig::PassThrough { node_type } = &config {
            if self.config.unknown_nodes == UnknownNodePolicy::Reject {
                return Err(EngineError::UnknownNodeType {
                    node_id: node.id.clone(),
                    node_type: node_type.clone(),
                });
            }
        }

        Ok(config)
    }
}
