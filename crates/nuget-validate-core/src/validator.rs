//! End-to-end package validation.

use std::path::Path;

use crate::PlatformFamily;
use crate::Result;
use crate::SignatureStatus;
use crate::ValidationError;
use crate::ValidationObserver;
use crate::ValidationReport;
use crate::ValidatorConfig;
use crate::locate::locate_package_for;
use crate::staging::StagingGuard;
use crate::staging::remove_residue;
use crate::staging::stage_copy;
use crate::verify::verify_assets;

/// Validates a NuGet package directory against a list of platforms.
///
/// A run locates the single package, stages a copy, checks the required
/// native binaries and always removes the staging files afterwards. Runs are
/// synchronous and keep no state between invocations.
///
/// Two validators whose configurations share a staging directory must not run
/// at the same time: both write the same fixed staging file names and no lock
/// is taken.
///
/// # Examples
///
/// ```no_run
/// use nuget_validate_core::NoopObserver;
/// use nuget_validate_core::PackageValidator;
/// use nuget_validate_core::ValidatorConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let validator = PackageValidator::new(ValidatorConfig::default());
/// let report = validator.run("build/nuget", "win-x64,linux-x64", &mut NoopObserver)?;
/// println!("{} platforms validated", report.checks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageValidator {
    config: ValidatorConfig,
}

impl PackageValidator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the validator configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Runs a full validation of the package in `directory`.
    ///
    /// Finalization runs whatever the outcome and is reported to `observer`
    /// through [`ValidationObserver::on_cleanup`]. A failure during
    /// validation takes precedence over a cleanup failure.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or a
    /// [`ValidationError::Cleanup`] if validation passed but a staging file
    /// could not be removed.
    pub fn run<P: AsRef<Path>>(
        &self,
        directory: P,
        platforms: &str,
        observer: &mut dyn ValidationObserver,
    ) -> Result<ValidationReport> {
        let package = locate_package_for(directory, &self.config)?;
        observer.on_package_located(&package);

        remove_residue(&self.config)?;

        let guard = StagingGuard::new(&self.config);
        let outcome = self.validate_staged(&package, platforms, observer);
        let cleanup = guard.finish();
        log::debug!(
            "cleaned up {} staging file(s), {} failure(s)",
            cleanup.removed.len(),
            cleanup.errors.len()
        );
        observer.on_cleanup(&cleanup);

        let report = outcome?;
        match cleanup.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }

    /// Steps that need the staging files. The archive handle is closed when
    /// this returns, before the guard removes the files.
    fn validate_staged(
        &self,
        package: &Path,
        platforms: &str,
        observer: &mut dyn ValidationObserver,
    ) -> Result<ValidationReport> {
        self.check_host()?;

        let staged = stage_copy(package, &self.config)?;
        let listing = staged.listing();
        observer.on_staged(staged.path(), listing.len());

        let checks = verify_assets(platforms, &listing, observer)?;

        // Signature verification is not performed; the report records that.
        Ok(ValidationReport {
            package: package.to_path_buf(),
            entry_count: listing.len(),
            checks,
            signature: SignatureStatus::NotVerified,
        })
    }

    fn check_host(&self) -> Result<()> {
        let Some(required) = self.config.required_host else {
            return Ok(());
        };

        if PlatformFamily::host() == Some(required) {
            Ok(())
        } else {
            Err(ValidationError::HostMismatch {
                required,
                actual: std::env::consts::OS.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::NoopObserver;
    use crate::test_utils::write_test_package;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        packages: std::path::PathBuf,
        validator: PackageValidator,
    }

    fn fixture(entries: &[(&str, &[u8])]) -> Fixture {
        let temp = TempDir::new().unwrap();
        let packages = temp.path().join("nuget");
        let stage = temp.path().join("stage");
        fs::create_dir(&packages).unwrap();
        fs::create_dir(&stage).unwrap();
        write_test_package(&packages, "Microsoft.ML.OnnxRuntime.1.2.0.nupkg", entries);

        Fixture {
            validator: PackageValidator::new(ValidatorConfig::default().with_staging_dir(stage)),
            packages,
            _temp: temp,
        }
    }

    fn assert_no_staging_files(validator: &PackageValidator) {
        assert!(!validator.config().package_copy_path().exists());
        assert!(!validator.config().archive_copy_path().exists());
    }

    #[test]
    fn test_run_success_cleans_up() {
        let fx = fixture(&[
            ("runtimes/win-x64/native/onnxruntime.dll", b"MZ"),
            ("runtimes/linux-x64/native/libonnxruntime.so", b"ELF"),
        ]);

        let report = fx
            .validator
            .run(&fx.packages, "win-x64,linux-x64", &mut NoopObserver)
            .unwrap();

        assert_eq!(report.entry_count, 2);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.signature, SignatureStatus::NotVerified);
        assert_no_staging_files(&fx.validator);
    }

    #[test]
    fn test_run_missing_asset_cleans_up() {
        let fx = fixture(&[("runtimes/win-x64/native/onnxruntime.dll", b"MZ")]);

        let err = fx
            .validator
            .run(&fx.packages, "osx-x64", &mut NoopObserver)
            .unwrap_err();

        assert_eq!(
            err.missing_path(),
            Some("runtimes/osx-x64/native/libonnxruntime.dylib")
        );
        assert_no_staging_files(&fx.validator);
    }

    #[test]
    fn test_run_removes_residue_from_previous_run() {
        let fx = fixture(&[("runtimes/win-x64/native/onnxruntime.dll", b"MZ")]);
        fs::write(fx.validator.config().package_copy_path(), b"stale").unwrap();
        fs::write(fx.validator.config().archive_copy_path(), b"stale").unwrap();

        fx.validator
            .run(&fx.packages, "win-x64", &mut NoopObserver)
            .unwrap();
        assert_no_staging_files(&fx.validator);
    }

    #[test]
    fn test_run_host_mismatch_is_platform_error() {
        let fx = fixture(&[("runtimes/win-x64/native/onnxruntime.dll", b"MZ")]);
        let other = PlatformFamily::ALL
            .into_iter()
            .find(|family| Some(*family) != PlatformFamily::host())
            .unwrap();
        let validator = PackageValidator::new(fx.validator.config().clone().with_required_host(other));

        let err = validator
            .run(&fx.packages, "win-x64", &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Platform);
        assert_no_staging_files(&validator);
    }

    #[test]
    fn test_run_matching_host_passes() {
        let Some(host) = PlatformFamily::host() else {
            return;
        };
        let fx = fixture(&[("runtimes/win-x64/native/onnxruntime.dll", b"MZ")]);
        let validator = PackageValidator::new(fx.validator.config().clone().with_required_host(host));

        assert!(validator.run(&fx.packages, "win-x64", &mut NoopObserver).is_ok());
    }

    #[test]
    fn test_run_corrupt_package_is_archive_error() {
        let fx = fixture(&[]);
        let package = fx.packages.join("Microsoft.ML.OnnxRuntime.1.2.0.nupkg");
        fs::write(&package, b"definitely not a zip").unwrap();

        let err = fx
            .validator
            .run(&fx.packages, "win-x64", &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Archive);
        assert_no_staging_files(&fx.validator);
    }

    #[test]
    fn test_run_in_staging_dir_ignores_and_removes_residue() {
        let temp = TempDir::new().unwrap();
        write_test_package(
            temp.path(),
            "pkg.nupkg",
            &[("runtimes/win-x64/native/onnxruntime.dll", b"MZ")],
        );
        let validator =
            PackageValidator::new(ValidatorConfig::default().with_staging_dir(temp.path()));
        fs::write(validator.config().package_copy_path(), b"stale").unwrap();

        for _ in 0..2 {
            let report = validator
                .run(temp.path(), "win-x64", &mut NoopObserver)
                .unwrap();
            assert_eq!(report.package, temp.path().join("pkg.nupkg"));
            assert_no_staging_files(&validator);
        }
    }

    #[test]
    fn test_run_does_not_delete_package_named_like_staging_copy() {
        let temp = TempDir::new().unwrap();
        let package = write_test_package(temp.path(), "NugetCopy.nupkg", &[]);
        let validator =
            PackageValidator::new(ValidatorConfig::default().with_staging_dir(temp.path()));

        let err = validator
            .run(temp.path(), "win-x64", &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(package.exists());
    }

    #[test]
    fn test_run_precondition_failure_touches_nothing() {
        let fx = fixture(&[]);
        write_test_package(&fx.packages, "second.nupkg", &[]);
        fs::write(fx.validator.config().archive_copy_path(), b"left alone").unwrap();

        let err = fx
            .validator
            .run(&fx.packages, "win-x64", &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        // Locating the package happens before any staging work.
        assert!(fx.validator.config().archive_copy_path().exists());
    }
}
