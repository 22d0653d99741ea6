//! Output formatter trait for CLI results.

use anyhow::Result;
use nuget_validate_core::ValidationObserver;
use nuget_validate_core::ValidationReport;
use serde::Serialize;

/// Common output formatter trait
///
/// Formatters also receive the run's diagnostics as a
/// [`ValidationObserver`].
pub trait OutputFormatter: ValidationObserver {
    /// Format a successful validation
    fn format_report(&self, report: &ValidationReport) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error, kind: Option<&str>);

    /// Access the formatter as a validation observer
    fn as_observer(&mut self) -> &mut dyn ValidationObserver;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: Some(data),
            error: Some(error.into()),
        }
    }
}
