//! Staging copies of the package under inspection.
//!
//! A package is never opened in place. It is copied to
//! `<staging_dir>/<stem>.<ext>`, renamed to `<stem>.zip` and opened from
//! there. Both names are fixed per configuration, so two runs sharing a
//! staging directory must not overlap; no locking is attempted.

use std::fs::File;
use std::fs::{self};
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveListing;
use crate::Result;
use crate::ValidationError;
use crate::ValidatorConfig;

/// An opened staging copy of the package.
///
/// Dropping it closes the underlying file handle. The file itself is removed
/// by [`StagingGuard::finish`].
#[derive(Debug)]
pub struct StagedArchive {
    path: PathBuf,
    archive: zip::ZipArchive<File>,
}

impl StagedArchive {
    /// Path of the staged archive file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entry names of the staged archive.
    #[must_use]
    pub fn listing(&self) -> ArchiveListing {
        ArchiveListing::from_zip(&self.archive)
    }
}

/// Copies `package` into the staging area and opens the copy as a ZIP archive.
///
/// Residue from an earlier run is removed first.
///
/// # Errors
///
/// Returns [`ValidationError::Cleanup`] if residue cannot be removed,
/// [`ValidationError::Staging`] if the copy or rename fails, and
/// [`ValidationError::InvalidArchive`] if the copy is not a ZIP archive.
pub fn stage_copy(package: &Path, config: &ValidatorConfig) -> Result<StagedArchive> {
    remove_residue(config)?;

    let copy_path = config.package_copy_path();
    let archive_path = config.archive_copy_path();

    log::debug!("copying {} to {}", package.display(), copy_path.display());
    fs::copy(package, &copy_path).map_err(|source| ValidationError::Staging {
        from: package.to_path_buf(),
        to: copy_path.clone(),
        source,
    })?;

    fs::rename(&copy_path, &archive_path).map_err(|source| ValidationError::Staging {
        from: copy_path.clone(),
        to: archive_path.clone(),
        source,
    })?;

    let file = File::open(&archive_path).map_err(|source| ValidationError::Staging {
        from: copy_path,
        to: archive_path.clone(),
        source,
    })?;
    let archive = zip::ZipArchive::new(file).map_err(|e| ValidationError::InvalidArchive {
        path: archive_path.clone(),
        reason: e.to_string(),
    })?;

    log::debug!(
        "opened {} ({} entries)",
        archive_path.display(),
        archive.len()
    );

    Ok(StagedArchive {
        path: archive_path,
        archive,
    })
}

/// Removes staging files left behind by an earlier run.
///
/// # Errors
///
/// Returns [`ValidationError::Cleanup`] for the first file that exists but
/// cannot be removed.
pub fn remove_residue(config: &ValidatorConfig) -> Result<()> {
    for path in [config.package_copy_path(), config.archive_copy_path()] {
        match fs::remove_file(&path) {
            Ok(()) => log::debug!("removed residual {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(ValidationError::Cleanup { path, source }),
        }
    }
    Ok(())
}

/// Outcome of the finalization phase.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Staging files that existed and were removed.
    pub removed: Vec<PathBuf>,

    /// Staging files that could not be removed.
    pub errors: Vec<ValidationError>,
}

impl CleanupReport {
    /// Returns `true` if every staging file is gone.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// RAII guard for the staging files of one run.
///
/// [`finish`](Self::finish) removes both staging files and reports what
/// happened. If the guard is dropped without `finish` (for example during a
/// panic) the files are still removed, silently.
#[derive(Debug)]
pub struct StagingGuard {
    paths: [PathBuf; 2],
    finished: bool,
}

impl StagingGuard {
    /// Creates a guard for the staging files named by `config`.
    #[must_use]
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            paths: [config.package_copy_path(), config.archive_copy_path()],
            finished: false,
        }
    }

    /// Removes every staging file that exists.
    ///
    /// Each removal is attempted independently of the others.
    #[must_use]
    pub fn finish(mut self) -> CleanupReport {
        self.finished = true;
        let mut report = CleanupReport::default();

        for path in &self.paths {
            match fs::remove_file(path) {
                Ok(()) => report.removed.push(path.clone()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    log::warn!("failed to remove {}: {source}", path.display());
                    report.errors.push(ValidationError::Cleanup {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }

        report
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if !self.finished {
            for path in &self.paths {
                let _ = fs::remove_file(path);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::test_utils::write_test_package;
    use tempfile::TempDir;

    fn staging_config(temp: &TempDir) -> ValidatorConfig {
        ValidatorConfig::default().with_staging_dir(temp.path().join("stage"))
    }

    fn setup() -> (TempDir, ValidatorConfig) {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("stage")).unwrap();
        let config = staging_config(&temp);
        (temp, config)
    }

    #[test]
    fn test_stage_copy_opens_zip_copy() {
        let (temp, config) = setup();
        let package = write_test_package(
            temp.path(),
            "pkg.nupkg",
            &[("runtimes/linux-x64/native/libonnxruntime.so", b"ELF")],
        );

        let staged = stage_copy(&package, &config).unwrap();
        assert_eq!(staged.path(), config.archive_copy_path());
        assert!(staged.listing().contains("runtimes/linux-x64/native/libonnxruntime.so"));

        // The package copy was renamed, not duplicated.
        assert!(!config.package_copy_path().exists());
        assert!(config.archive_copy_path().exists());
        // The original is untouched.
        assert!(package.exists());
    }

    #[test]
    fn test_stage_copy_removes_residue_first() {
        let (temp, config) = setup();
        fs::write(config.package_copy_path(), b"stale").unwrap();
        fs::write(config.archive_copy_path(), b"stale").unwrap();

        let package = write_test_package(temp.path(), "pkg.nupkg", &[("a.txt", b"a")]);
        let staged = stage_copy(&package, &config).unwrap();
        assert_eq!(staged.listing().len(), 1);
    }

    #[test]
    fn test_stage_copy_rejects_non_zip() {
        let (temp, config) = setup();
        let package = temp.path().join("broken.nupkg");
        fs::write(&package, b"this is not a zip file").unwrap();

        let err = stage_copy(&package, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Archive);
    }

    #[test]
    fn test_stage_copy_missing_staging_dir_is_platform_error() {
        let temp = TempDir::new().unwrap();
        let config = staging_config(&temp);
        let package = write_test_package(temp.path(), "pkg.nupkg", &[("a.txt", b"a")]);

        let err = stage_copy(&package, &config).unwrap_err();
        assert!(matches!(err, ValidationError::Staging { .. }));
        assert_eq!(err.kind(), ErrorKind::Platform);
    }

    #[test]
    fn test_guard_finish_removes_both_files() {
        let (_temp, config) = setup();
        fs::write(config.package_copy_path(), b"x").unwrap();
        fs::write(config.archive_copy_path(), b"x").unwrap();

        let report = StagingGuard::new(&config).finish();
        assert!(report.is_clean());
        assert_eq!(report.removed.len(), 2);
        assert!(!config.package_copy_path().exists());
        assert!(!config.archive_copy_path().exists());
    }

    #[test]
    fn test_guard_finish_tolerates_absent_files() {
        let (_temp, config) = setup();
        let report = StagingGuard::new(&config).finish();
        assert!(report.is_clean());
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_guard_continues_after_failed_removal() {
        let (_temp, config) = setup();
        // A directory in place of the package copy cannot be removed with
        // `remove_file`; the archive copy must still go.
        fs::create_dir(config.package_copy_path()).unwrap();
        fs::write(config.archive_copy_path(), b"x").unwrap();

        let report = StagingGuard::new(&config).finish();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind(), ErrorKind::Cleanup);
        assert!(!config.archive_copy_path().exists());
    }

    #[test]
    fn test_guard_drop_removes_files() {
        let (_temp, config) = setup();
        fs::write(config.archive_copy_path(), b"x").unwrap();

        drop(StagingGuard::new(&config));
        assert!(!config.archive_copy_path().exists());
    }
}
