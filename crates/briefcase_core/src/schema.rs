//! Expected payload shapes and their fallback defaults.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use crate::error::{PayloadError, Result, SchemaError};

/// A single top-level field and the value it takes when nothing was recovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub default: Value,
}

/// Where a failure message is recorded in a fallback result.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Extra top-level key holding the message (e.g. `"error"`).
    Key(String),
    /// Message written into an existing field; companions overwrite other
    /// fields. Parse failures and failed model calls have separate companions.
    Sentinel {
        field: String,
        companions: Vec<(String, Value)>,
        upstream_companions: Vec<(String, Value)>,
    },
}

/// Field set plus defaults, fallback field and diagnostic placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
    fallback: String,
    diagnostic: Diagnostic,
}

/// Built-in schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    MarketBrief,
    ComplianceReview,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 2] = [SchemaKind::MarketBrief, SchemaKind::ComplianceReview];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::MarketBrief => "market",
            SchemaKind::ComplianceReview => "compliance",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            SchemaKind::MarketBrief => Schema::market_brief(),
            SchemaKind::ComplianceReview => Schema::compliance_review(),
        }
    }
}

impl FromStr for SchemaKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "market" | "market-brief" => Ok(SchemaKind::MarketBrief),
            "compliance" | "policy" => Ok(SchemaKind::ComplianceReview),
            _ => Err(SchemaError::UnknownSchema(s.to_string())),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Schema {
    /// Build a schema, checking that the fallback and diagnostic targets exist
    /// and can hold free text.
    pub fn new<I, K>(
        name: impl Into<String>,
        fields: I,
        fallback: impl Into<String>,
        diagnostic: Diagnostic,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let name = name.into();
        let fields: Vec<Field> = fields
            .into_iter()
            .map(|(k, default)| Field {
                name: k.into(),
                default,
            })
            .collect();
        if fields.is_empty() {
            return Err(SchemaError::Empty(name));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        let schema = Self {
            name,
            fields,
            fallback: fallback.into(),
            diagnostic,
        };
        schema.ensure_textual(&schema.fallback)?;
        match &schema.diagnostic {
            Diagnostic::Key(key) => {
                if schema.field(key).is_some() {
                    return Err(SchemaError::DiagnosticCollision(key.clone()));
                }
            }
            Diagnostic::Sentinel {
                field,
                companions,
                upstream_companions,
            } => {
                schema.ensure_textual(field)?;
                for (companion, _) in companions.iter().chain(upstream_companions) {
                    if schema.field(companion).is_none() {
                        return Err(SchemaError::UnknownField(companion.clone()));
                    }
                }
            }
        }
        Ok(schema)
    }

    /// SWOT analysis, cited trends and a narrative summary.
    pub fn market_brief() -> Self {
        Self {
            name: "market".to_string(),
            fields: vec![
                Field {
                    name: "SWOT".to_string(),
                    default: json!({
                        "strengths": [],
                        "weaknesses": [],
                        "opportunities": [],
                        "threats": []
                    }),
                },
                Field {
                    name: "trends".to_string(),
                    default: json!([]),
                },
                Field {
                    name: "citations".to_string(),
                    default: json!([]),
                },
                Field {
                    name: "narrative_summary".to_string(),
                    default: json!(""),
                },
            ],
            fallback: "narrative_summary".to_string(),
            diagnostic: Diagnostic::Key("error".to_string()),
        }
    }

    /// Compliance issues with parallel severity and recommendation lists.
    pub fn compliance_review() -> Self {
        Self {
            name: "compliance".to_string(),
            fields: vec![
                Field {
                    name: "issues".to_string(),
                    default: json!([]),
                },
                Field {
                    name: "severity".to_string(),
                    default: json!([]),
                },
                Field {
                    name: "recommendations".to_string(),
                    default: json!([]),
                },
            ],
            fallback: "recommendations".to_string(),
            diagnostic: Diagnostic::Sentinel {
                field: "issues".to_string(),
                companions: vec![("severity".to_string(), json!(["N/A"]))],
                upstream_companions: vec![
                    ("severity".to_string(), json!(["Critical"])),
                    (
                        "recommendations".to_string(),
                        json!(["Please try again or check your input."]),
                    ),
                ],
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fallback_field(&self) -> &str {
        &self.fallback
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Fresh copy of every field's default value, in schema order.
    pub fn defaults(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }

    /// Accept `value` only if it is an object holding every schema key, each
    /// with the same JSON kind as its default. Extra keys are allowed.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), PayloadError> {
        let Some(object) = value.as_object() else {
            return Err(PayloadError::NotAnObject(kind_name(value)));
        };

        let missing: Vec<String> = self
            .keys()
            .filter(|k| !object.contains_key(*k))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(PayloadError::MissingKeys(missing));
        }

        for field in &self.fields {
            let found = &object[&field.name];
            if kind_name(found) != kind_name(&field.default) {
                return Err(PayloadError::WrongKind {
                    field: field.name.clone(),
                    expected: kind_name(&field.default),
                    found: kind_name(found),
                });
            }
        }
        Ok(())
    }

    /// Write free text into `field`, shaped like the field's default.
    pub(crate) fn put_text(&self, map: &mut Map<String, Value>, field: &str, text: &str) {
        let value = match self.field(field).map(|f| &f.default) {
            Some(Value::Array(_)) => json!([text]),
            _ => Value::String(text.to_string()),
        };
        map.insert(field.to_string(), value);
    }

    pub(crate) fn put_diagnostic(
        &self,
        map: &mut Map<String, Value>,
        message: &str,
        stage: FailureStage,
    ) {
        match &self.diagnostic {
            Diagnostic::Key(key) => {
                map.insert(key.clone(), Value::String(message.to_string()));
            }
            Diagnostic::Sentinel {
                field,
                companions,
                upstream_companions,
            } => {
                self.put_text(map, field, message);
                let companions = match stage {
                    FailureStage::Parse => companions,
                    FailureStage::Upstream => upstream_companions,
                };
                for (name, value) in companions {
                    map.insert(name.clone(), value.clone());
                }
            }
        }
    }

    fn ensure_textual(&self, name: &str) -> Result<()> {
        match self.field(name).map(|f| &f.default) {
            None => Err(SchemaError::UnknownField(name.to_string())),
            Some(Value::String(_)) | Some(Value::Array(_)) => Ok(()),
            Some(_) => Err(SchemaError::NotTextual(name.to_string())),
        }
    }
}

/// Which step failed when a diagnostic is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureStage {
    Parse,
    Upstream,
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas_pass_their_own_checks() {
        for kind in SchemaKind::ALL {
            let builtin = kind.schema();
            let rebuilt = Schema::new(
                builtin.name().to_string(),
                builtin
                    .fields()
                    .iter()
                    .map(|f| (f.name.clone(), f.default.clone())),
                builtin.fallback_field().to_string(),
                builtin.diagnostic().clone(),
            );
            assert_eq!(rebuilt, Ok(builtin));
        }
    }

    #[test]
    fn test_defaults_keep_schema_order() {
        let defaults = Schema::market_brief().defaults();
        let keys: Vec<_> = defaults.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["SWOT", "trends", "citations", "narrative_summary"]);
        assert_eq!(defaults["SWOT"]["threats"], json!([]));
    }

    #[test]
    fn test_new_rejects_bad_fallback() {
        let err = Schema::new(
            "x",
            [("a", json!({}))],
            "a",
            Diagnostic::Key("error".into()),
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::NotTextual("a".into()));

        let err = Schema::new("x", [("a", json!([]))], "b", Diagnostic::Key("error".into()))
            .unwrap_err();
        assert_eq!(err, SchemaError::UnknownField("b".into()));
    }

    #[test]
    fn test_new_rejects_empty_and_duplicates() {
        let none: Vec<(String, Value)> = Vec::new();
        assert_eq!(
            Schema::new("x", none, "a", Diagnostic::Key("error".into())).unwrap_err(),
            SchemaError::Empty("x".into())
        );
        assert_eq!(
            Schema::new(
                "x",
                [("a", json!([])), ("a", json!(""))],
                "a",
                Diagnostic::Key("error".into())
            )
            .unwrap_err(),
            SchemaError::DuplicateField("a".into())
        );
    }

    #[test]
    fn test_new_rejects_diagnostic_collision() {
        let err = Schema::new(
            "x",
            [("error", json!("")), ("body", json!(""))],
            "body",
            Diagnostic::Key("error".into()),
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::DiagnosticCollision("error".into()));
    }

    #[test]
    fn test_new_rejects_unknown_upstream_companion() {
        let err = Schema::new(
            "x",
            [("issues", json!([])), ("severity", json!([]))],
            "issues",
            Diagnostic::Sentinel {
                field: "issues".into(),
                companions: vec![("severity".into(), json!(["N/A"]))],
                upstream_companions: vec![("priority".into(), json!(["Critical"]))],
            },
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::UnknownField("priority".into()));
    }

    #[test]
    fn test_validate_reports_missing_keys() {
        let schema = Schema::compliance_review();
        let err = schema
            .validate(&json!({ "issues": [], "extra": 1 }))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing keys: severity, recommendations");
    }

    #[test]
    fn test_validate_reports_wrong_kind() {
        let schema = Schema::compliance_review();
        let err = schema
            .validate(&json!({ "issues": "none", "severity": [], "recommendations": [] }))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "field `issues` should be a list, found a string"
        );
    }

    #[test]
    fn test_validate_rejects_non_objects() {
        let err = Schema::market_brief().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON object, found a list");
    }

    #[test]
    fn test_schema_kind_from_str() {
        assert_eq!("Market".parse(), Ok(SchemaKind::MarketBrief));
        assert_eq!("policy".parse(), Ok(SchemaKind::ComplianceReview));
        assert!("swot".parse::<SchemaKind>().is_err());
    }
}
