//! Routing a finished record to the task-management APIs.
//!
//! The engine does not call Trello or Asana itself.  It only tells the caller
//! which of them the record is meant for and fills in `{{ field }}`
//! placeholders in the action's text templates.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::warn;

use nodes::resolver::{resolve, stringify};
use nodes::WorkflowRecord;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// A downstream task-management system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionTarget {
    Trello,
    Asana,
}

/// Systems the record should be sent to, according to its `targetType`.
///
/// An unset hint means both.  An unrecognized hint routes nowhere.
pub fn targets_for(record: &WorkflowRecord) -> Vec<ActionTarget> {
    let hint = record
        .target_type
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_else(|| nodes::DEFAULT_TARGET_TYPE.to_owned());

    match hint.as_str() {
        "trello" => vec![ActionTarget::Trello],
        "asana" => vec![ActionTarget::Asana],
        "both" => vec![ActionTarget::Trello, ActionTarget::Asana],
        other => {
            warn!("unrecognized target type '{}', record will not be routed", other);
            Vec::new()
        }
    }
}

/// Replace every `{{ path }}` in `template` with the value found in `record`.
///
/// `tags` and `categories` expand to the applied labels joined by `", "`.
/// Other paths go through the field resolver; absent values become empty.
pub fn render_template(template: &str, record: &WorkflowRecord) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "tags" => record.tags.join(", "),
            "categories" => record.categories.join(", "),
            path => resolve(path, record)
                .as_ref()
                .and_then(stringify)
                .unwrap_or_default(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nodes::TriggerKind;
    use serde_json::json;

    fn record(target: Option<&str>) -> WorkflowRecord {
        let payload = json!({
            "subject": "Urgent: Server Down",
            "sender": "ops@customer.io",
            "receivedAt": "2024-01-15T10:30:00Z",
        });
        let mut r = WorkflowRecord::new(TriggerKind::Email, payload.as_object().cloned().unwrap(), Utc::now());
        r.target_type = target.map(str::to_owned);
        r
    }

    #[test]
    fn routing_follows_target_type() {
        assert_eq!(targets_for(&record(Some("trello"))), vec![ActionTarget::Trello]);
        assert_eq!(targets_for(&record(Some("Asana"))), vec![ActionTarget::Asana]);
        assert_eq!(
            targets_for(&record(Some("both"))),
            vec![ActionTarget::Trello, ActionTarget::Asana]
        );
        assert_eq!(targets_for(&record(None)).len(), 2);
        assert!(targets_for(&record(Some("jira"))).is_empty());
    }

    #[test]
    fn template_fills_fields_and_labels() {
        let mut r = record(None);
        r.tags = vec!["urgent".into(), "ops".into()];

        let title = render_template("[{{tags}}] {{ email.subject }} from {{email.sender}}", &r);
        assert_eq!(title, "[urgent, ops] Urgent: Server Down from ops@customer.io");
    }

    #[test]
    fn template_drops_missing_fields() {
        let r = record(None);
        assert_eq!(render_template("due: {{email.dueDate}}.", &r), "due: .");
        assert_eq!(render_template("no placeholders", &r), "no placeholders");
    }
}
