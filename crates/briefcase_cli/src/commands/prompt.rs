//! `briefcase prompt`: show what a tool would send to the model.

use std::path::Path;

use anyhow::Result;
use briefcase_core::Tool;

use crate::output;

pub fn handle(tool: &Tool, input: Option<&Path>) -> Result<()> {
    let text = super::read_input(input)?;
    let prompt = tool.template.render(text.trim_end());

    if output::is_json() {
        output::data(tool.id, &prompt);
        return Ok(());
    }
    output::header("System:");
    output::text("system", &prompt.system);
    println!();
    output::header("User:");
    output::text("user", &prompt.user);
    Ok(())
}
