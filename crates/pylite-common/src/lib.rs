pub mod config;
pub mod errors;
pub mod span;

pub use config::{AnalyzerConfig, ConfigError, Limits};
pub use errors::{Diagnostic, DiagnosticBag, Stage};
pub use span::{Position, Span};
