//! The workflow data processor.
//!
//! Every call audits the visit first (`processedBy` + `timestamp`) and then
//! merges the node's contribution into a fresh record.  The input record is
//! never touched, so replaying a chain from any intermediate record is safe.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use nodes::{apply_categories, apply_tags, NodeConfig, WorkflowRecord};

/// Process `record` through one node, stamping the step with the current time.
pub fn process(record: &WorkflowRecord, node_id: &str, config: &NodeConfig) -> WorkflowRecord {
    process_at(record, node_id, config, Utc::now())
}

/// Process `record` through one node, stamping the step with `now`.
pub fn process_at(
    record: &WorkflowRecord,
    node_id: &str,
    config: &NodeConfig,
    now: DateTime<Utc>,
) -> WorkflowRecord {
    let mut next = record.clone();
    next.processed_by.push(node_id.to_owned());
    next.timestamp = now;

    match config {
        NodeConfig::ConditionLogic(cond) => {
            let passed = cond.check(record);
            debug!(
                "node '{}': {} {} {:?} -> {}",
                node_id, cond.field, cond.operator, cond.value, passed
            );
            next.conditions.insert(node_id.to_owned(), passed);
        }
        NodeConfig::AiTagging(tagging) => {
            let applied = apply_tags(
                &tagging.selected_tags,
                &tagging.tag_keywords,
                record,
                tagging.target_type.as_deref(),
            );
            debug!("node '{}': applied tags {:?}", node_id, applied.labels);
            next.tags.extend(applied.labels);
            next.target_type = Some(applied.target_type);
        }
        NodeConfig::AiClassification(classification) => {
            let applied = apply_categories(
                &classification.selected_categories,
                &classification.category_keywords,
                record,
                classification.target_type.as_deref(),
            );
            debug!("node '{}': applied categories {:?}", node_id, applied.labels);
            next.categories.extend(applied.labels);
            next.target_type = Some(applied.target_type);
        }
        NodeConfig::PassThrough { node_type } => {
            warn!("node '{}' has type '{}' with no evaluator, passing through", node_id, node_type);
        }
    }

    next
}
