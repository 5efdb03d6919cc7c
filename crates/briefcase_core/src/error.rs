//! Error types for schemas and payload recovery.

use thiserror::Error;

/// Why a candidate payload was rejected.
///
/// These never escape [`crate::extract`]; they are rendered into the
/// diagnostic field of the fallback result.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("unterminated object starting at byte {0}")]
    Unterminated(usize),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("missing keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("field `{field}` should be {expected}, found {found}")]
    WrongKind {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while building a [`crate::Schema`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema `{0}` has no fields")]
    Empty(String),

    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// Fallback and sentinel fields must hold free text: a string or a list.
    #[error("field `{0}` cannot hold free text")]
    NotTextual(String),

    #[error("diagnostic key `{0}` collides with a schema field")]
    DiagnosticCollision(String),

    #[error("unknown schema `{0}` (expected market or compliance)")]
    UnknownSchema(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
