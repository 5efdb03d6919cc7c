//! Terminal output helpers, dual-mode: styled text for humans, one JSON
//! envelope per line for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the tool listing
//! - `indicatif` for the generation spinner

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

/// One-line `{level, message, data}` envelope.
pub fn envelope(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", envelope(level, message, data));
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        eprintln!("{} {}", style("!").yellow(), style(text).bright());
    }
}

/// Emit a serializable value: pretty JSON for humans, a `data` envelope
/// in JSON mode.
pub fn data<T: Serialize>(label: &str, value: &T) {
    if is_json() {
        let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Emit plain text unchanged (no styling, so it can be piped).
pub fn text(label: &str, body: &str) {
    if is_json() {
        let data = JsonValue::String(body.to_string());
        emit_json("data", label, Some(&data));
    } else {
        println!("{body}");
    }
}

// ── Tables ─────────────────────────────────────────────────────────

pub fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|c| {
            Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold)
        }));
    table
}

/// First cell is highlighted as the row's identifier.
pub fn table_row(table: &mut Table, cells: &[&str]) {
    let mut row = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        row.push(if i == 0 {
            Cell::new(cell).fg(Color::Green)
        } else {
            Cell::new(cell)
        });
    }
    table.add_row(row);
}

/// Print a table (JSON mode emits an items array instead).
pub fn table_print<T: Serialize>(table: &Table, items: &[T]) {
    if is_json() {
        let data = serde_json::json!({ "items": items });
        emit_json("list", "", Some(&data));
    } else {
        println!("{table}");
    }
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr; hidden when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_skips_missing_data() {
        assert_eq!(
            envelope("info", "Exiting.", None),
            r#"{"level":"info","message":"Exiting."}"#
        );
    }

    #[test]
    fn test_envelope_with_data() {
        let data = serde_json::json!({ "issues": [] });
        let line = envelope("data", "Compliance Review Results:", Some(&data));
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["data"]["issues"], serde_json::json!([]));
        assert_eq!(parsed["message"], "Compliance Review Results:");
    }
}
