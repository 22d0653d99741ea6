//! Package discovery.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::ValidationError;
use crate::ValidatorConfig;

/// Finds the single package file in `directory`.
///
/// Only files directly inside `directory` whose name ends with `.{extension}`
/// are considered; symlinks count when their target is a file. The extension
/// match is case-sensitive.
///
/// # Errors
///
/// Returns [`ValidationError::UnreadableDirectory`] if the directory cannot be
/// listed, and [`ValidationError::PackageCount`] (carrying every match) if
/// the number of packages is not exactly one.
///
/// # Examples
///
/// ```no_run
/// use nuget_validate_core::locate_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let package = locate_package("build/nuget", "nupkg")?;
/// println!("validating {}", package.display());
/// # Ok(())
/// # }
/// ```
pub fn locate_package<P: AsRef<Path>>(directory: P, extension: &str) -> Result<PathBuf> {
    scan(directory.as_ref(), extension, &[])
}

/// Finds the single package file in `directory` using the extension from
/// `config`.
///
/// When `directory` is also the staging directory, the staging copies named
/// by `config` are not counted as packages, so residue from an interrupted
/// run does not hide the real package.
///
/// # Errors
///
/// Same as [`locate_package`].
pub fn locate_package_for<P: AsRef<Path>>(
    directory: P,
    config: &ValidatorConfig,
) -> Result<PathBuf> {
    let directory = directory.as_ref();
    let ignored: Vec<OsString> = if same_directory(directory, &config.staging_dir) {
        [config.package_copy_path(), config.archive_copy_path()]
            .iter()
            .filter_map(|path| path.file_name().map(ToOwned::to_owned))
            .collect()
    } else {
        Vec::new()
    };

    scan(directory, &config.package_extension, &ignored)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn scan(directory: &Path, extension: &str, ignored: &[OsString]) -> Result<PathBuf> {
    let unreadable = |source| ValidationError::UnreadableDirectory {
        directory: directory.to_path_buf(),
        source,
    };

    let suffix = format!(".{extension}");
    let mut found = Vec::new();

    for entry in fs::read_dir(directory).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(&suffix) {
            continue;
        }
        if ignored.contains(&name) {
            log::debug!("ignoring staging file {}", entry.path().display());
            continue;
        }

        let path = entry.path();
        if path.is_file() {
            found.push(path);
        }
    }

    found.sort();
    log::debug!(
        "found {} package(s) in {}: {found:?}",
        found.len(),
        directory.display()
    );

    if found.len() != 1 {
        return Err(ValidationError::PackageCount {
            directory: directory.to_path_buf(),
            found,
        });
    }

    Ok(found.remove(0))
}
