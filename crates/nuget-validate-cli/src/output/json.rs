//! JSON output formatter for machine-readable results.
//!
//! Diagnostics are buffered while the run progresses and emitted as a single
//! envelope once the outcome is known.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use nuget_validate_core::ArchiveListing;
use nuget_validate_core::AssetCheck;
use nuget_validate_core::CleanupReport;
use nuget_validate_core::ValidationObserver;
use nuget_validate_core::ValidationReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

const OPERATION: &str = "validate";

#[derive(Debug, Clone, Serialize)]
struct CheckOutput {
    platform: String,
    family: String,
    path: String,
    present: bool,
}

impl From<&AssetCheck> for CheckOutput {
    fn from(check: &AssetCheck) -> Self {
        Self {
            platform: check.platform.clone(),
            family: check.family.to_string(),
            path: check.path.clone(),
            present: check.present,
        }
    }
}

#[derive(Default)]
pub struct JsonFormatter {
    package: Option<String>,
    checks: Vec<CheckOutput>,
    listing: Option<Vec<String>>,
    cleanup_errors: Vec<String>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl ValidationObserver for JsonFormatter {
    fn on_package_located(&mut self, package: &Path) {
        self.package = Some(package.display().to_string());
    }

    fn on_staged(&mut self, _archive: &Path, _entries: usize) {}

    fn on_asset_checked(&mut self, check: &AssetCheck) {
        self.checks.push(check.into());
    }

    fn on_listing_dump(&mut self, listing: &ArchiveListing) {
        self.listing = Some(listing.iter().map(str::to_owned).collect());
    }

    fn on_cleanup(&mut self, report: &CleanupReport) {
        self.cleanup_errors = report.errors.iter().map(ToString::to_string).collect();
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ValidationReport) -> Result<()> {
        #[derive(Serialize)]
        struct ValidationOutput {
            package: String,
            entry_count: usize,
            platforms: Vec<CheckOutput>,
            signature: String,
            cleanup_errors: Vec<String>,
        }

        let data = ValidationOutput {
            package: report.package.display().to_string(),
            entry_count: report.entry_count,
            platforms: report.checks.iter().map(CheckOutput::from).collect(),
            signature: report.signature.to_string(),
            cleanup_errors: self.cleanup_errors.clone(),
        };

        let output = JsonOutput::success(OPERATION, data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error, kind: Option<&str>) {
        #[derive(Serialize)]
        struct FailureOutput {
            #[serde(skip_serializing_if = "Option::is_none")]
            kind: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            package: Option<String>,
            platforms: Vec<CheckOutput>,
            #[serde(skip_serializing_if = "Option::is_none")]
            listing: Option<Vec<String>>,
            cleanup_errors: Vec<String>,
        }

        let data = FailureOutput {
            kind: kind.map(str::to_owned),
            package: self.package.clone(),
            platforms: self.checks.clone(),
            listing: self.listing.clone(),
            cleanup_errors: self.cleanup_errors.clone(),
        };

        let output = JsonOutput::error(OPERATION, format!("{error:#}"), data);
        let _ = Self::output(&output);
    }

    fn as_observer(&mut self) -> &mut dyn ValidationObserver {
        self
    }
}
