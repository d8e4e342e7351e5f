//! Dialplan Core
//!
//! Core domain model: the area-code index, shared error types,
//! configuration and the versioned report format.
//! Never rename diagnostic codes - they are part of the public API.

pub mod error;
pub mod index;
pub mod diagnostic;
pub mod report;
pub mod config;

pub use error::{RecordError, ConfigurationError};
pub use index::{AreaCode, AreaCodeIndex, PrefixWindow, UNKNOWN_AREA};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, Location};
pub use report::{Report, ReportSummary, ReportVersion};
pub use config::{Config, ConfigError, GeneratorConfig, ResolverConfig, ColumnConfig, MAX_TOTAL_LENGTH};
