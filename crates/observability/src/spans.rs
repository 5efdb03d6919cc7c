//! Span helpers and recording utilities

/// Create a span for one tool request
///
/// # Example
///
/// ```rust
/// use briefcase_observability::tool_span;
///
/// let span = tool_span!("compliance", "ollama", "gemma3:latest");
/// let _guard = span.enter();
/// // ... build prompt, call the model, extract ...
/// ```
#[macro_export]
macro_rules! tool_span {
    ($tool:expr, $provider:expr, $model:expr) => {
        tracing::info_span!(
            "tool.request",
            tool.id = $tool,
            llm.provider = $provider,
            llm.model = $model,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
        )
    };
}

/// Create a span for reply extraction
///
/// # Example
///
/// ```rust
/// use briefcase_observability::extract_span;
///
/// let span = extract_span!("market");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! extract_span {
    ($schema:expr) => {
        tracing::debug_span!("extract", schema = $schema, outcome = tracing::field::Empty)
    };
}

/// Record an error on the current span
///
/// # Example
///
/// ```rust
/// use briefcase_observability::record_error;
///
/// let err = std::io::Error::other("connection refused");
/// record_error(&err);
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", error.to_string());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// # Example
///
/// ```rust
/// use briefcase_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// // ... operation ...
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
