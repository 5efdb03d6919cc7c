//! Interactive request loop shared by every tool.
//!
//! The loop reads commands from `R` and writes everything it shows to `W`,
//! so tests can drive it with in-memory buffers.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use briefcase_core::{Reply, Tool, ToolOutput};
use briefcase_llm::ModelClient;
use briefcase_observability::{extract_span, record_duration, record_error, tool_span};
use serde_json::Value as JsonValue;
use tracing::Instrument;

use crate::output;

/// Line that ends multi-line input collection.
pub const END_MARKER: &str = "###END###";

const QUIT: &str = "quit";

/// Run one request: render the prompt, call the model, shape the reply.
///
/// Model failures are folded into the reply, never returned.
pub async fn respond(tool: &Tool, client: &dyn ModelClient, input: &str) -> Reply {
    let span = tool_span!(tool.id, client.provider(), client.model());
    let prompt = tool.template.render(input);
    let started = Instant::now();

    async {
        let reply = match client.generate(&prompt).await {
            Ok(raw) => {
                tracing::debug!(chars = raw.len(), "model replied");
                shape(tool, &raw)
            }
            Err(e) => {
                record_error(&e);
                tool.failure(&e)
            }
        };
        record_duration("duration_ms", started.elapsed());
        reply
    }
    .instrument(span)
    .await
}

/// Shape a model reply; structured tools extract under their own span.
fn shape(tool: &Tool, raw: &str) -> Reply {
    let ToolOutput::Structured(kind) = tool.output else {
        return tool.reply(raw);
    };
    let span = extract_span!(kind.as_str());
    let reply = span.in_scope(|| tool.reply(raw));
    if let Reply::Structured(result) = &reply {
        span.record("outcome", result.outcome().as_str());
    }
    reply
}

pub struct Session<'a, R, W> {
    tool: &'static Tool,
    client: &'a dyn ModelClient,
    input: R,
    out: W,
    json: bool,
    spinner: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(tool: &'static Tool, client: &'a dyn ModelClient, input: R, out: W) -> Self {
        Self {
            tool,
            client,
            input,
            out,
            json: false,
            spinner: false,
        }
    }

    /// Write JSON envelopes instead of plain lines.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Show a spinner on stderr while waiting for the model.
    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    pub async fn run(&mut self) -> io::Result<()> {
        self.say("info", self.tool.title)?;
        self.say("info", self.tool.tagline)?;

        loop {
            if !self.json {
                write!(self.out, "\n{}", self.tool.command_prompt())?;
                self.out.flush()?;
            }
            let Some(line) = self.read_line()? else {
                break;
            };
            let command = line.trim().to_lowercase();

            if command == QUIT {
                break;
            }
            if command != self.tool.trigger {
                let msg = format!(
                    "Invalid input. Please enter '{}' or '{}'.",
                    self.tool.trigger, QUIT
                );
                self.say("warning", &msg)?;
                continue;
            }

            let text = self.collect()?;
            if text.trim().is_empty() {
                let msg = format!("Error: {}. Please try again.", self.tool.missing_input);
                self.say("error", &msg)?;
                continue;
            }
            self.request(&text).await?;
        }

        self.say("info", "Exiting.")
    }

    async fn request(&mut self, text: &str) -> io::Result<()> {
        if self.json {
            self.say("info", self.tool.progress)?;
        } else {
            writeln!(self.out, "\n{}", self.tool.progress)?;
            self.out.flush()?;
        }

        let spinner = self.spinner.then(|| output::spinner(self.tool.progress));
        let reply = respond(self.tool, self.client, text).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        self.show(&reply)
    }

    fn show(&mut self, reply: &Reply) -> io::Result<()> {
        let heading = self.tool.heading;
        if self.json {
            let data = match reply {
                Reply::Structured(result) => JsonValue::Object(result.value().clone()),
                Reply::Text(text) => JsonValue::String(text.clone()),
            };
            return writeln!(self.out, "{}", output::envelope("data", heading, Some(&data)));
        }

        writeln!(self.out, "\n{heading}")?;
        match reply {
            Reply::Structured(result) => writeln!(self.out, "{}", result.to_pretty_json()),
            Reply::Text(text) => writeln!(self.out, "{text}"),
        }
    }

    /// Gather lines until the end marker or EOF.
    fn collect(&mut self) -> io::Result<String> {
        for hint in self.tool.input_hint {
            self.say("info", hint)?;
        }
        let prompt = format!("When finished, enter '{END_MARKER}' on a new line:");
        self.say("info", &prompt)?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == END_MARKER {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// Next line without its terminator, or None at EOF. Bytes that are not
    /// UTF-8 become U+FFFD.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn say(&mut self, level: &str, text: &str) -> io::Result<()> {
        if self.json {
            writeln!(self.out, "{}", output::envelope(level, text, None))
        } else {
            writeln!(self.out, "{text}")
        }
    }
}
