//! `briefcase tools`

use anyhow::Result;
use briefcase_core::{Tool, ToolOutput};
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct ToolRow {
    id: &'static str,
    title: &'static str,
    trigger: &'static str,
    output: &'static str,
    description: &'static str,
}

impl From<&Tool> for ToolRow {
    fn from(tool: &Tool) -> Self {
        Self {
            id: tool.id,
            title: tool.title,
            trigger: tool.trigger,
            output: match tool.output {
                ToolOutput::Structured(kind) => kind.as_str(),
                ToolOutput::Text => "text",
            },
            description: tool.tagline,
        }
    }
}

pub fn handle() -> Result<()> {
    let rows: Vec<ToolRow> = Tool::all().iter().map(ToolRow::from).collect();

    let mut table = output::table(&["Tool", "Trigger", "Output", "Description"]);
    for row in &rows {
        output::table_row(&mut table, &[row.id, row.trigger, row.output, row.description]);
    }
    output::table_print(&table, &rows);
    Ok(())
}
