//! Validator configuration.

use std::path::PathBuf;

use crate::platform::PlatformFamily;

/// Configuration for a validation run.
///
/// The staging file names are derived from `staging_dir` and `staging_stem`;
/// two runs sharing both values must not overlap in time.
///
/// # Examples
///
/// ```
/// use nuget_validate_core::ValidatorConfig;
///
/// // Stage in the current directory as `NugetCopy.nupkg` / `NugetCopy.zip`
/// let config = ValidatorConfig::default();
/// assert_eq!(config.package_extension, "nupkg");
///
/// // Stage somewhere else
/// let custom = ValidatorConfig::default().with_staging_dir("/tmp/nuget-validate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Extension (without the dot) that identifies package files.
    pub package_extension: String,

    /// Directory that receives the staging copies.
    pub staging_dir: PathBuf,

    /// File stem shared by both staging copies.
    pub staging_stem: String,

    /// Host family the run must execute on, if any.
    pub required_host: Option<PlatformFamily>,
}

impl Default for ValidatorConfig {
    /// Default values:
    /// - `package_extension`: `nupkg`
    /// - `staging_dir`: `.` (current working directory)
    /// - `staging_stem`: `NugetCopy`
    /// - `required_host`: none
    fn default() -> Self {
        Self {
            package_extension: "nupkg".to_string(),
            staging_dir: PathBuf::from("."),
            staging_stem: "NugetCopy".to_string(),
            required_host: None,
        }
    }
}

impl ValidatorConfig {
    /// Sets the staging directory.
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Requires the run to execute on the given host family.
    #[must_use]
    pub fn with_required_host(mut self, family: PlatformFamily) -> Self {
        self.required_host = Some(family);
        self
    }

    /// Path of the staged package copy.
    #[must_use]
    pub fn package_copy_path(&self) -> PathBuf {
        self.staging_dir
            .join(format!("{}.{}", self.staging_stem, self.package_extension))
    }

    /// Path of the staged copy once renamed for the archive reader.
    #[must_use]
    pub fn archive_copy_path(&self) -> PathBuf {
        self.staging_dir.join(format!("{}.zip", self.staging_stem))
    }
}
