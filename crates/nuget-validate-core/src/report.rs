//! Validation reporting.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveListing;
use crate::PlatformFamily;
use crate::staging::CleanupReport;

/// Result of checking one platform's required asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCheck {
    /// Platform token as requested.
    pub platform: String,

    /// Family selected by the token prefix.
    pub family: PlatformFamily,

    /// Archive entry path that was looked up.
    pub path: String,

    /// Whether the entry exists in the archive.
    pub present: bool,
}

/// State of package signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureStatus {
    /// Signatures are not checked.
    #[default]
    NotVerified,
}

impl std::fmt::Display for SignatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotVerified => f.write_str("not verified"),
        }
    }
}

/// Report of a successful validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The package that was validated.
    pub package: PathBuf,

    /// Number of entries in the package archive.
    pub entry_count: usize,

    /// One check per requested platform, in request order.
    pub checks: Vec<AssetCheck>,

    /// Signature verification state.
    pub signature: SignatureStatus,
}

impl ValidationReport {
    /// Platforms that were validated.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|check| check.platform.as_str())
    }
}

/// Callback trait for diagnostics emitted during a validation run.
///
/// Events arrive in run order: package located, staged, one asset check per
/// platform, an optional listing dump, and the cleanup outcome last. Cleanup
/// is reported on every run, including failed ones.
///
/// # Examples
///
/// ```
/// use nuget_validate_core::ArchiveListing;
/// use nuget_validate_core::AssetCheck;
/// use nuget_validate_core::CleanupReport;
/// use nuget_validate_core::ValidationObserver;
/// use std::path::Path;
///
/// struct PrintObserver;
///
/// impl ValidationObserver for PrintObserver {
///     fn on_package_located(&mut self, package: &Path) {
///         println!("package: {}", package.display());
///     }
///
///     fn on_staged(&mut self, _archive: &Path, _entries: usize) {}
///
///     fn on_asset_checked(&mut self, check: &AssetCheck) {
///         println!("checking path: {}", check.path);
///     }
///
///     fn on_listing_dump(&mut self, listing: &ArchiveListing) {
///         for name in listing.iter() {
///             println!("  {name}");
///         }
///     }
///
///     fn on_cleanup(&mut self, _report: &CleanupReport) {
///         println!("cleaning up");
///     }
/// }
/// ```
pub trait ValidationObserver {
    /// Called once the single package file has been found.
    fn on_package_located(&mut self, package: &Path);

    /// Called once the staging copy has been opened as an archive.
    fn on_staged(&mut self, archive: &Path, entries: usize);

    /// Called after each platform's required asset has been looked up.
    fn on_asset_checked(&mut self, check: &AssetCheck);

    /// Called with the full listing when a required asset is missing.
    fn on_listing_dump(&mut self, listing: &ArchiveListing);

    /// Called after finalization, whatever the outcome.
    fn on_cleanup(&mut self, report: &CleanupReport);
}

/// No-op implementation of `ValidationObserver`.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ValidationObserver for NoopObserver {
    fn on_package_located(&mut self, _package: &Path) {}

    fn on_staged(&mut self, _archive: &Path, _entries: usize) {}

    fn on_asset_checked(&mut self, _check: &AssetCheck) {}

    fn on_listing_dump(&mut self, _listing: &ArchiveListing) {}

    fn on_cleanup(&mut self, _report: &CleanupReport) {}
}
