//! Schema-conforming result returned by the extractor.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::schema::{FailureStage, Schema};

/// How a [`ParsedResult`] was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A payload was found and accepted as-is.
    Parsed,
    /// The reply held no opening brace; the text went to the fallback field.
    NoPayload,
    /// Braces were present but nothing usable was inside.
    Malformed { reason: String },
    /// The generation call itself failed.
    UpstreamFailed { message: String },
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Parsed => "parsed",
            Outcome::NoPayload => "no_payload",
            Outcome::Malformed { .. } => "malformed",
            Outcome::UpstreamFailed { .. } => "upstream_failed",
        }
    }
}

/// Always carries every key of the schema it was built for. Serializes as
/// the bare JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResult {
    value: Map<String, Value>,
    outcome: Outcome,
}

impl ParsedResult {
    pub(crate) fn parsed(value: Map<String, Value>) -> Self {
        Self {
            value,
            outcome: Outcome::Parsed,
        }
    }

    pub(crate) fn no_payload(schema: &Schema, raw: &str) -> Self {
        let mut value = schema.defaults();
        schema.put_text(&mut value, schema.fallback_field(), raw);
        Self {
            value,
            outcome: Outcome::NoPayload,
        }
    }

    pub(crate) fn malformed(schema: &Schema, raw: &str, reason: String) -> Self {
        let mut value = schema.defaults();
        schema.put_diagnostic(
            &mut value,
            &format!("JSON parse error: {reason}"),
            FailureStage::Parse,
        );
        schema.put_text(&mut value, schema.fallback_field(), raw);
        Self {
            value,
            outcome: Outcome::Malformed { reason },
        }
    }

    /// Result to show when the model call failed before any reply existed.
    ///
    /// The message lands in the fallback field and the diagnostic; sentinel
    /// companions for failed calls are applied last.
    pub fn upstream_failure(schema: &Schema, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut value = schema.defaults();
        schema.put_text(&mut value, schema.fallback_field(), &message);
        schema.put_diagnostic(&mut value, &message, FailureStage::Upstream);
        Self {
            value,
            outcome: Outcome::UpstreamFailed { message },
        }
    }

    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_parsed(&self) -> bool {
        self.outcome == Outcome::Parsed
    }

    /// Failure reason, if the result is a fallback built after an error.
    pub fn failure(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Malformed { reason } => Some(reason),
            Outcome::UpstreamFailed { message } => Some(message),
            Outcome::Parsed | Outcome::NoPayload => None,
        }
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.value)
            .unwrap_or_else(|_| Value::Object(self.value.clone()).to_string())
    }
}

impl Serialize for ParsedResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}
