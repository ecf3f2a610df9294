//! Record creation from a triggering event.

use chrono::{DateTime, Utc};

use nodes::{Payload, TriggerKind, WorkflowRecord};

/// Start a record for an event that arrived now.
pub fn create_record(kind: TriggerKind, payload: Payload) -> WorkflowRecord {
    create_record_at(kind, payload, Utc::now())
}

/// Start a record with an explicit creation instant.
pub fn create_record_at(kind: TriggerKind, payload: Payload, now: DateTime<Utc>) -> WorkflowRecord {
    WorkflowRecord::new(kind, payload, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_carries_trigger_and_nothing_else() {
        let payload = json!({ "subject": "Question about pricing plans", "to": "sales@acme.io" });
        let r = create_record(TriggerKind::Email, payload.as_object().cloned().unwrap());

        assert_eq!(r.trigger.kind, TriggerKind::Email);
        assert_eq!(serde_json::Value::Object(r.trigger.data.clone()), payload);
        assert!(r.processed_by.is_empty());
        assert!(r.conditions.is_empty());
        assert!(r.target_type.is_none());
    }
}
