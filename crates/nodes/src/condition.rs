//! Condition evaluation for `condition-logic` nodes.

use serde::{Deserialize, Serialize};

use crate::record::WorkflowRecord;
use crate::resolver::{resolve, stringify};

/// Comparison applied between a resolved field and a literal.
///
/// Operator names the engine does not know are kept verbatim in
/// [`Operator::Unsupported`] and always evaluate to `false`.  Build one with
/// `Operator::from(name)`; known names always map to their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    Unsupported(UnsupportedOperator),
}

/// Name of an operator with no evaluator.  Only [`Operator::from`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnsupportedOperator(String);

impl UnsupportedOperator {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Contains => "contains",
            Operator::Equals => "equals",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Unsupported(op) => op.name(),
        }
    }

    /// Apply the operator to two already lower-cased strings.
    fn compare(&self, field: &str, literal: &str) -> bool {
        match self {
            Operator::Contains => field.contains(literal),
            Operator::Equals => field == literal,
            Operator::StartsWith => field.starts_with(literal),
            Operator::EndsWith => field.ends_with(literal),
            Operator::Unsupported(_) => false,
        }
    }
}

impl From<&str> for Operator {
    fn from(name: &str) -> Self {
        match name {
            "contains" => Operator::Contains,
            "equals" => Operator::Equals,
            "startsWith" => Operator::StartsWith,
            "endsWith" => Operator::EndsWith,
            other => Operator::Unsupported(UnsupportedOperator(other.to_owned())),
        }
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::from(name.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Unsupported(op) => op.0,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate `field <operator> value` against `record`, ignoring case.
///
/// Absent or `null` fields and unsupported operators yield `false`.
pub fn evaluate(field: &str, operator: &Operator, value: &str, record: &WorkflowRecord) -> bool {
    let Some(resolved) = resolve(field, record) else {
        return false;
    };
    let Some(text) = stringify(&resolved) else {
        return false;
    };

    operator.compare(&text.to_lowercase(), &value.to_lowercase())
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

    fn urgent() -> WorkflowRecord {
        record(json!({
            "subject": "Urgent: Server Down - Critical Issue",
            "priority": 3,
            "flagged": true,
            "cc": null,
        }))
    }

    #[test]
    fn contains_ignores_case() {
        let r = urgent();
        assert!(evaluate("email.subject", &Operator::Contains, "urgent", &r));
        assert_eq!(
            evaluate("email.subject", &Operator::Contains, "URGENT", &r),
            evaluate("email.subject", &Operator::Contains, "urgent", &r),
        );
    }

    #[test]
    fn each_operator() {
        let r = urgent();
        assert!(evaluate("email.subject", &Operator::Equals, "urgent: server down - critical issue", &r));
        assert!(!evaluate("email.subject", &Operator::Equals, "urgent", &r));
        assert!(evaluate("email.subject", &Operator::StartsWith, "URGENT:", &r));
        assert!(evaluate("email.subject", &Operator::EndsWith, "issue", &r));
        assert!(!evaluate("email.subject", &Operator::EndsWith, "urgent", &r));
    }

    #[test]
    fn non_string_fields_are_stringified() {
        let r = urgent();
        assert!(evaluate("email.priority", &Operator::Equals, "3", &r));
        assert!(evaluate("email.flagged", &Operator::Equals, "TRUE", &r));
    }

    #[test]
    fn absent_and_null_fields_are_false() {
        let r = urgent();
        assert!(!evaluate("email.nonexistent", &Operator::Equals, "x", &r));
        assert!(!evaluate("email.cc", &Operator::Contains, "", &r));
    }

    #[test]
    fn unsupported_operator_is_false() {
        let r = urgent();
        let op = Operator::from("matches");
        assert!(matches!(&op, Operator::Unsupported(u) if u.name() == "matches"));
        assert!(!evaluate("email.subject", &op, "urgent", &r));
    }

    #[test]
    fn operator_serde_uses_camel_case_names() {
        let op: Operator = serde_json::from_value(json!("startsWith")).unwrap();
        assert_eq!(op, Operator::StartsWith);
        assert_eq!(serde_json::to_value(&op).unwrap(), json!("startsWith"));

        let odd: Operator = serde_json::from_value(json!("regex")).unwrap();
        assert_eq!(serde_json::to_value(&odd).unwrap(), json!("regex"));
    }

    #[test]
    fn known_names_never_become_unsupported() {
        for (name, op) in [
            ("contains", Operator::Contains),
            ("equals", Operator::Equals),
            ("startsWith", Operator::StartsWith),
            ("endsWith", Operator::EndsWith),
        ] {
            assert_eq!(Operator::from(name), op);
            let back: Operator = serde_json::from_value(serde_json::to_value(&op).unwrap()).unwrap();
            assert_eq!(back, op);
        }
        assert!(matches!(Operator::from("Contains"), Operator::Unsupported(_)));
    }
}
