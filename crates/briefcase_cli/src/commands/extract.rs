//! `briefcase extract`: recover a schema object from a saved reply.

use std::path::Path;

use anyhow::Result;
use briefcase_core::{extract, SchemaKind};
use briefcase_observability::extract_span;

use crate::output;

pub fn handle(schema: SchemaKind, input: Option<&Path>) -> Result<()> {
    let raw = super::read_input(input)?;

    let span = extract_span!(schema.as_str());
    let result = span.in_scope(|| extract(&raw, &schema.schema()));
    span.record("outcome", result.outcome().as_str());

    if let Some(reason) = result.failure() {
        output::warning(&format!("No valid payload: {reason}"));
    }
    output::data(result.outcome().as_str(), &result);
    Ok(())
}
