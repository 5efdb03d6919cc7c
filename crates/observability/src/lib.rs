//! briefcase observability - logging setup shared by the briefcase crates
//!
//! # Quick Start
//!
//! ```no_run
//! use briefcase_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("briefcase").with_log_level("debug");
//! init(config)?;
//!
//! tracing::info!("started");
//! # Ok::<(), briefcase_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `BRIEFCASE_LOG` or `RUST_LOG` - Log level filter (default `warn`)
//! - `NO_COLOR` - disables ANSI colors in log lines

pub mod config;
pub mod error;
pub mod telemetry;
pub mod spans;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::init;
pub use spans::{record_duration, record_error};

// Macros are exported via #[macro_export] and available
// as briefcase_observability::tool_span!(), etc.
