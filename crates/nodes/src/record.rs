//! The record threaded through a workflow chain.
//!
//! A [`WorkflowRecord`] is created once per triggering event and grows by
//! one step every time a node processes it.  Nodes never mutate a record in
//! place: the engine clones, extends, and hands the new value onward.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Target hint used when a tagging/classification node does not set one.
pub const DEFAULT_TARGET_TYPE: &str = "both";

/// Free-form payload of a triggering event.
pub type Payload = Map<String, Value>;

// ---------------------------------------------------------------------------
// Trigger event
// ---------------------------------------------------------------------------

/// Which kind of source produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Email,
    Webhook,
    Schedule,
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TriggerKind::Email => "email",
            TriggerKind::Webhook => "webhook",
            TriggerKind::Schedule => "schedule",
        };
        write!(f, "{s}")
    }
}

/// The event that started the chain.  Never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    pub data: Payload,
}

// ---------------------------------------------------------------------------
// WorkflowRecord
// ---------------------------------------------------------------------------

/// Accumulated state for one triggering event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    pub trigger: TriggerEvent,
    /// Logic node ID → result of its last evaluation.
    #[serde(default)]
    pub conditions: BTreeMap<String, bool>,
    /// Tags applied so far, in application order.  Duplicates are kept.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Categories applied so far, in application order.  Duplicates are kept.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Routing hint; last writer wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// Node IDs in the order they processed this record.
    #[serde(default)]
    pub processed_by: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Fresh record for an event observed at `now`.
    pub fn new(kind: TriggerKind, data: Payload, now: DateTime<Utc>) -> Self {
        Self {
            trigger: TriggerEvent { kind, data },
            conditions: BTreeMap::new(),
            tags: Vec::new(),
            categories: Vec::new(),
            target_type: None,
            processed_by: Vec::new(),
            timestamp: now,
        }
    }

    /// Raw payload value under `key`, if present.
    pub fn payload(&self, key: &str) -> Option<&Value> {
        self.trigger.data.get(key)
    }

    /// `true` when every logic node that ran evaluated to `true`.
    pub fn conditions_passed(&self) -> bool {
        self.conditions.values().all(|passed| *passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn new_record_starts_empty() {
        let now = Utc::now();
        let r = WorkflowRecord::new(TriggerKind::Email, payload(json!({ "subject": "hi" })), now);

        assert!(r.conditions.is_empty());
        assert!(r.tags.is_empty());
        assert!(r.categories.is_empty());
        assert!(r.target_type.is_none());
        assert!(r.processed_by.is_empty());
        assert_eq!(r.timestamp, now);
        assert_eq!(r.payload("subject"), Some(&json!("hi")));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut r = WorkflowRecord::new(TriggerKind::Webhook, Payload::new(), Utc::now());
        r.target_type = Some("trello".into());
        r.processed_by.push("n1".into());

        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["trigger"]["type"], "webhook");
        assert_eq!(v["targetType"], "trello");
        assert_eq!(v["processedBy"], json!(["n1"]));
    }

    #[test]
    fn conditions_passed_requires_every_condition() {
        let mut r = WorkflowRecord::new(TriggerKind::Email, Payload::new(), Utc::now());
        assert!(r.conditions_passed());

        r.conditions.insert("a".into(), true);
        assert!(r.conditions_passed());

        r.conditions.insert("b".into(), false);
        assert!(!r.conditions_passed());
    }
}
