//! Recover an embedded JSON object from free-text model output.
//!
//! Candidates are found with a balanced-brace scan that skips braces inside
//! string literals, so prose before or after the payload, nested objects and
//! `{`/`}` inside values do not derail it.

use serde_json::Value;

use crate::error::PayloadError;
use crate::result::ParsedResult;
use crate::schema::{kind_name, Schema};

/// Turn a raw model reply into a result shaped like `schema`. Never fails.
///
/// - no `{` at all: schema defaults, `raw` in the fallback field
/// - first candidate object that decodes and validates: returned unchanged
/// - otherwise: defaults, `raw` in the fallback field, and the first
///   candidate's failure recorded in the diagnostic
pub fn extract(raw: &str, schema: &Schema) -> ParsedResult {
    let mut first_error: Option<PayloadError> = None;

    for candidate in object_spans(raw) {
        let attempt = candidate.and_then(|span| {
            let value: Value = serde_json::from_str(span)?;
            schema.validate(&value)?;
            Ok(value)
        });
        match attempt {
            Ok(Value::Object(map)) => {
                tracing::debug!(schema = schema.name(), "payload accepted");
                return ParsedResult::parsed(map);
            }
            Ok(other) => {
                // validate() only passes objects
                first_error.get_or_insert(PayloadError::NotAnObject(kind_name(&other)));
            }
            Err(e) => {
                tracing::trace!(schema = schema.name(), error = %e, "candidate rejected");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        None => {
            tracing::debug!(schema = schema.name(), "no payload in reply");
            ParsedResult::no_payload(schema, raw)
        }
        Some(e) => {
            tracing::debug!(schema = schema.name(), error = %e, "no usable payload in reply");
            ParsedResult::malformed(schema, raw, e.to_string())
        }
    }
}

/// Every `{...}` candidate in `text`, ordered by opening brace. An opening
/// brace with no matching close yields [`PayloadError::Unterminated`].
///
/// One forward pass. Outside any object the text is prose and quotes are
/// ignored; inside an object, braces within string literals are skipped.
fn object_spans(text: &str) -> Vec<Result<&str, PayloadError>> {
    let mut open: Vec<usize> = Vec::new();
    let mut spans: Vec<(usize, Option<usize>)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in text.as_bytes().iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, Some(i)));
                }
            }
            _ => {}
        }
    }
    spans.extend(open.into_iter().map(|start| (start, None)));
    spans.sort_unstable_by_key(|&(start, _)| start);

    spans
        .into_iter()
        .map(|(start, end)| match end {
            Some(end) => Ok(&text[start..=end]),
            None => Err(PayloadError::Unterminated(start)),
        })
        .collect()
}
