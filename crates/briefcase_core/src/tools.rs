//! The five writing tools, each a template plus an output shape.

use crate::extract::extract;
use crate::prompts::{
    COMPLIANCE_AUDITOR_SYSTEM, FINANCIAL_ANALYST_SYSTEM, MARKET_ANALYST_SYSTEM,
    MEETING_ASSISTANT_SYSTEM, PROJECT_MANAGER_SYSTEM,
};
use crate::result::ParsedResult;
use crate::schema::SchemaKind;
use crate::template::PromptTemplate;

/// How a tool's reply is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutput {
    /// Reply is recovered into the given schema and printed as JSON.
    Structured(SchemaKind),
    /// Reply is printed verbatim.
    Text,
}

/// What a tool produced for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Structured(ParsedResult),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub id: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    /// Word typed at the prompt to start a request.
    pub trigger: &'static str,
    /// What the trigger does, as shown in the prompt line.
    pub action: &'static str,
    /// Lines shown before collecting input.
    pub input_hint: &'static [&'static str],
    /// Noun used when input is empty ("No documents provided").
    pub missing_input: &'static str,
    pub progress: &'static str,
    pub heading: &'static str,
    /// Prefix for the message shown when the model call fails.
    pub failure_label: &'static str,
    pub template: PromptTemplate,
    pub output: ToolOutput,
}

pub static TOOLS: [Tool; 5] = [
    Tool {
        id: "market",
        title: "Market Analysis Brief Generator",
        tagline: "Generate market analysis briefs from news articles and internal reports.",
        trigger: "analyze",
        action: "generate a brief",
        input_hint: &["Paste your documents (news articles, reports, etc.) below."],
        missing_input: "No documents provided",
        progress: "Generating market analysis brief...",
        heading: "Market Analysis Brief:",
        failure_label: "Error generating analysis",
        template: PromptTemplate::new(
            MARKET_ANALYST_SYSTEM,
            "Generate a market analysis brief from the following documents:\n\n{documents}",
            "documents",
        ),
        output: ToolOutput::Structured(SchemaKind::MarketBrief),
    },
    Tool {
        id: "compliance",
        title: "Policy Compliance Checker",
        tagline: "Review HR policy drafts for compliance issues and ambiguous language.",
        trigger: "review",
        action: "check a policy",
        input_hint: &["Paste your HR policy text below."],
        missing_input: "No policy text provided",
        progress: "Reviewing policy for compliance...",
        heading: "Compliance Review Results:",
        failure_label: "Error checking compliance",
        template: PromptTemplate::new(
            COMPLIANCE_AUDITOR_SYSTEM,
            "Review the following HR policy text:\n\n{policy_text}",
            "policy_text",
        ),
        output: ToolOutput::Structured(SchemaKind::ComplianceReview),
    },
    Tool {
        id: "minutes",
        title: "Meeting Minutes Summarizer",
        tagline: "Summarize meeting transcripts into decisions and action items.",
        trigger: "summarize",
        action: "process a transcript",
        input_hint: &["Paste your meeting transcript below."],
        missing_input: "No transcript provided",
        progress: "Summarizing meeting transcript...",
        heading: "Meeting Summary:",
        failure_label: "Error summarizing meeting",
        template: PromptTemplate::new(
            MEETING_ASSISTANT_SYSTEM,
            "Summarize the following meeting transcript:\n\n{transcript_text}",
            "transcript_text",
        ),
        output: ToolOutput::Text,
    },
    Tool {
        id: "email",
        title: "Client Email Drafter",
        tagline: "Draft professional emails to clients summarizing project progress.",
        trigger: "draft",
        action: "create an email",
        input_hint: &[
            "Provide details for the email.",
            "Enter project information, progress updates, and milestones.",
        ],
        missing_input: "No details provided",
        progress: "Drafting email...",
        heading: "Drafted Email:",
        failure_label: "Error drafting email",
        template: PromptTemplate::new(
            PROJECT_MANAGER_SYSTEM,
            "Draft an email based on the following details:\n\n{email_details}",
            "email_details",
        ),
        output: ToolOutput::Text,
    },
    Tool {
        id: "summary",
        title: "Executive Summary Generator",
        tagline: "Enter your quarterly report text or 'quit' to exit.",
        trigger: "paste",
        action: "input a multi-line report",
        input_hint: &["Paste your quarterly report text below."],
        missing_input: "No report text provided",
        progress: "Generating executive summary...",
        heading: "Result:",
        failure_label: "Error generating summary",
        template: PromptTemplate::new(
            FINANCIAL_ANALYST_SYSTEM,
            "Summarize the following quarterly report:\n\n{report_text}",
            "report_text",
        ),
        output: ToolOutput::Text,
    },
];

impl Tool {
    /// Line shown at the top-level prompt.
    pub fn command_prompt(&self) -> String {
        format!(
            "Enter '{}' to {}, or 'quit' to exit: ",
            self.trigger, self.action
        )
    }

    pub fn all() -> &'static [Tool] {
        &TOOLS
    }

    pub fn find(id: &str) -> Option<&'static Tool> {
        TOOLS.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
    }

    /// Shape a successful model reply.
    pub fn reply(&self, raw: &str) -> Reply {
        match self.output {
            ToolOutput::Structured(kind) => Reply::Structured(extract(raw, &kind.schema())),
            ToolOutput::Text => Reply::Text(raw.to_string()),
        }
    }

    /// Shape a failed model call; the error is never raised past this point.
    pub fn failure(&self, error: &dyn std::fmt::Display) -> Reply {
        let message = format!("{}: {}", self.failure_label, error);
        match self.output {
            ToolOutput::Structured(kind) => {
                Reply::Structured(ParsedResult::upstream_failure(&kind.schema(), message))
            }
            ToolOutput::Text => Reply::Text(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;

    #[test]
    fn test_ids_and_triggers_are_unique() {
        let mut ids: Vec<_> = Tool::all().iter().map(|t| t.id).collect();
        let mut triggers: Vec<_> = Tool::all().iter().map(|t| t.trigger).collect();
        ids.sort();
        ids.dedup();
        triggers.sort();
        triggers.dedup();
        assert_eq!(ids.len(), 5);
        assert_eq!(triggers.len(), 5);
    }

    #[test]
    fn test_every_template_has_its_placeholder() {
        for tool in Tool::all() {
            let prompt = tool.template.render("<<INPUT>>");
            assert!(prompt.user.contains("<<INPUT>>"), "{} lost its input", tool.id);
            assert!(!prompt.user.contains('{'), "{} left a placeholder", tool.id);
        }
    }

    #[test]
    fn test_command_prompt() {
        let tool = Tool::find("summary").unwrap();
        assert_eq!(
            tool.command_prompt(),
            "Enter 'paste' to input a multi-line report, or 'quit' to exit: "
        );
    }

    #[test]
    fn test_summary_banner() {
        let tool = Tool::find("summary").unwrap();
        assert_eq!(tool.title, "Executive Summary Generator");
        assert_eq!(tool.tagline, "Enter your quarterly report text or 'quit' to exit.");
    }

    #[test]
    fn test_find() {
        assert_eq!(Tool::find("Compliance").map(|t| t.trigger), Some("review"));
        assert!(Tool::find("poetry").is_none());
    }

    #[test]
    fn test_structured_reply() {
        let tool = Tool::find("compliance").unwrap();
        let Reply::Structured(result) = tool.reply("No issues found.") else {
            panic!("compliance replies are structured");
        };
        assert_eq!(result.get("recommendations"), Some(&json!(["No issues found."])));
    }

    #[test]
    fn test_text_failure_message() {
        let tool = Tool::find("email").unwrap();
        assert_eq!(
            tool.failure(&"connection refused"),
            Reply::Text("Error drafting email: connection refused".into())
        );
    }

    #[test]
    fn test_structured_failure_keeps_schema_shape() {
        let tool = Tool::find("market").unwrap();
        let Reply::Structured(result) = tool.failure(&"timed out") else {
            panic!("market replies are structured");
        };
        for key in Schema::market_brief().keys() {
            assert!(result.get(key).is_some(), "missing {key}");
        }
        assert_eq!(
            result.get("narrative_summary"),
            Some(&json!("Error generating analysis: timed out"))
        );
    }
}
