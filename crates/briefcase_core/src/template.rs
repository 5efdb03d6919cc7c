//! Static prompt templates.

use serde::Serialize;

/// A composed prompt ready for a chat-style model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// System text plus a human message with one `{placeholder}`.
///
/// Only the human message is substituted; system text may contain literal
/// JSON braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    system: &'static str,
    human: &'static str,
    placeholder: &'static str,
}

impl PromptTemplate {
    pub const fn new(system: &'static str, human: &'static str, placeholder: &'static str) -> Self {
        Self {
            system,
            human,
            placeholder,
        }
    }

    pub fn render(&self, input: &str) -> Prompt {
        let token = format!("{{{}}}", self.placeholder);
        Prompt {
            system: self.system.to_string(),
            user: self.human.replacen(&token, input, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: PromptTemplate = PromptTemplate::new(
        "Reply as JSON: {\"a\": []}",
        "Review the following:\n\n{policy_text}",
        "policy_text",
    );

    #[test]
    fn test_render_substitutes_human_only() {
        let prompt = TEMPLATE.render("Leave is 10 days.");
        assert_eq!(prompt.system, "Reply as JSON: {\"a\": []}");
        assert_eq!(prompt.user, "Review the following:\n\nLeave is 10 days.");
    }

    #[test]
    fn test_render_does_not_rescan_input() {
        let prompt = TEMPLATE.render("literal {policy_text} stays");
        assert_eq!(prompt.user, "Review the following:\n\nliteral {policy_text} stays");
    }
}
