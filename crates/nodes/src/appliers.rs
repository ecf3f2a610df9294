//! Keyword-driven tagging and classification.
//!
//! Both appliers scan the same haystack: the trigger payload's `subject`,
//! `body` and `sender`, joined with single spaces and lower-cased once.

use std::collections::HashMap;

use tracing::warn;

use crate::keywords;
use crate::record::{WorkflowRecord, DEFAULT_TARGET_TYPE};
use crate::resolver::stringify;

const HAYSTACK_FIELDS: [&str; 3] = ["subject", "body", "sender"];

/// Labels that matched, plus the routing hint to store on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedLabels {
    pub labels: Vec<String>,
    pub target_type: String,
}

/// Lower-cased text the keyword specs are matched against.
pub fn haystack(record: &WorkflowRecord) -> String {
    HAYSTACK_FIELDS
        .iter()
        .map(|field| record.payload(field).and_then(stringify).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Tags from `selected_tags` whose keyword spec matches the record.
pub fn apply_tags(
    selected_tags: &[String],
    tag_keywords: &HashMap<String, String>,
    record: &WorkflowRecord,
    target_type: Option<&str>,
) -> AppliedLabels {
    apply_labels(selected_tags, tag_keywords, record, target_type)
}

/// Categories from `selected_categories` whose keyword spec matches the record.
pub fn apply_categories(
    selected_categories: &[String],
    category_keywords: &HashMap<String, String>,
    record: &WorkflowRecord,
    target_type: Option<&str>,
) -> AppliedLabels {
    apply_labels(selected_categories, category_keywords, record, target_type)
}

fn apply_labels(
    selected: &[String],
    keyword_specs: &HashMap<String, String>,
    record: &WorkflowRecord,
    target_type: Option<&str>,
) -> AppliedLabels {
    let text = haystack(record);

    let labels = selected
        .iter()
        .filter(|label| match keyword_specs.get(label.as_str()) {
            Some(spec) => keywords::matches(spec, &text),
            None => {
                warn!("no keyword spec for label '{}', skipping", label);
                false
            }
        })
        .cloned()
        .collect();

    AppliedLabels {
        labels,
        target_type: target_type.unwrap_or(DEFAULT_TARGET_TYPE).to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Payload, TriggerKind};
    use chrono::Utc;
    use serde_json::{json, Value};

    fn record(data: Value) -> WorkflowRecord {
        let payload: Payload = data.as_object().cloned().unwrap();
        WorkflowRecord::new(TriggerKind::Email, payload, Utc::now())
    }

    fn specs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn haystack_joins_and_lowers_known_fields() {
        let r = record(json!({ "subject": "Hi", "body": "There", "sender": "Bob@X.io", "to": "ignored" }));
        assert_eq!(haystack(&r), "hi there bob@x.io");
    }

    #[test]
    fn haystack_treats_missing_fields_as_empty() {
        let r = record(json!({ "body": "Only Body" }));
        assert_eq!(haystack(&r), " only body ");
    }

    #[test]
    fn urgent_subject_is_tagged() {
        let r = record(json!({ "subject": "Urgent: Server Down - Critical Issue" }));
        let applied = apply_tags(
            &labels(&["urgent"]),
            &specs(&[("urgent", "urgent, critical, asap")]),
            &r,
            None,
        );
        assert_eq!(applied.labels, vec!["urgent"]);
        assert_eq!(applied.target_type, "both");
    }

    #[test]
    fn categories_keep_selection_order() {
        let r = record(json!({
            "subject": "Urgent: Server Down - Critical Issue",
            "body": "Our main server has been down for 30 minutes",
        }));
        let applied = apply_categories(
            &labels(&["technical", "critical", "sales"]),
            &specs(&[
                ("technical", "server, technical, system"),
                ("critical", "critical, down, affecting"),
                ("sales", "pricing, plans, premium"),
            ]),
            &r,
            Some("trello"),
        );
        assert_eq!(applied.labels, vec!["technical", "critical"]);
        assert_eq!(applied.target_type, "trello");
    }

    #[test]
    fn label_without_spec_is_skipped() {
        let r = record(json!({ "subject": "urgent" }));
        let applied = apply_tags(&labels(&["ghost", "urgent"]), &specs(&[("urgent", "urgent")]), &r, None);
        assert_eq!(applied.labels, vec!["urgent"]);
    }
}
