//! Validation command implementation

use crate::cli::Cli;
use crate::error::convert_validation_error;
use crate::output::OutputFormatter;
use nuget_validate_core::PackageValidator;
use nuget_validate_core::ValidatorConfig;

/// Failure of a validation run, already converted for display.
pub struct Failure {
    pub error: anyhow::Error,
    pub kind: Option<String>,
}

pub fn execute(cli: &Cli, formatter: &mut dyn OutputFormatter) -> Result<(), Failure> {
    // Build config
    let mut config = ValidatorConfig::default().with_staging_dir(&cli.staging_dir);
    config.required_host = cli.require_host;

    // Validate package
    let validator = PackageValidator::new(config);
    let report = validator
        .run(
            &cli.nuget_path,
            &cli.platforms_supported,
            formatter.as_observer(),
        )
        .map_err(|err| Failure {
            error: convert_validation_error(&err),
            kind: Some(err.kind().to_string()),
        })?;

    // Format output
    formatter.format_report(&report).map_err(|error| Failure { error, kind: None })
}
