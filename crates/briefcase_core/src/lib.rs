//! briefcase-core: reply extraction, schemas, prompt templates and the tool catalog.
//!
//! The extractor recovers a structured payload from free-text model output:
//!
//! ```
//! use briefcase_core::{extract, Schema};
//!
//! let raw = r#"Sure! {"issues": ["x"], "severity": ["Low"], "recommendations": ["y"]} Hope that helps."#;
//! let result = extract(raw, &Schema::compliance_review());
//! assert!(result.is_parsed());
//! ```

mod error;
mod extract;
mod prompts;
mod result;
mod schema;
mod template;
mod tools;

pub use error::{PayloadError, Result, SchemaError};
pub use extract::extract;
pub use prompts::{
    COMPLIANCE_AUDITOR_SYSTEM, FINANCIAL_ANALYST_SYSTEM, MARKET_ANALYST_SYSTEM,
    MEETING_ASSISTANT_SYSTEM, PROJECT_MANAGER_SYSTEM,
};
pub use result::{Outcome, ParsedResult};
pub use schema::{Diagnostic, Field, Schema, SchemaKind};
pub use template::{Prompt, PromptTemplate};
pub use tools::{Reply, Tool, ToolOutput, TOOLS};
