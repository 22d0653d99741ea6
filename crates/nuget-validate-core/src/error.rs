//! Error types for package validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::platform::PlatformFamily;

/// Result type alias using `ValidationError`.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Coarse classification of a [`ValidationError`].
///
/// Every kind is terminal for the run. The CLI maps all of them to exit
/// status 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong number of package files, or an unreadable package directory.
    Precondition,
    /// The host cannot stage the package (copy failure or host mismatch).
    Platform,
    /// The staged copy is not a readable archive.
    Archive,
    /// A requested platform token has no known family prefix.
    UnsupportedPlatform,
    /// A required native binary is absent from the archive.
    MissingAsset,
    /// Finalization could not remove a staging artifact.
    Cleanup,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Precondition => "precondition",
            Self::Platform => "platform",
            Self::Archive => "archive",
            Self::UnsupportedPlatform => "unsupported-platform",
            Self::MissingAsset => "missing-asset",
            Self::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while validating a package.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The package directory does not hold exactly one package file.
    #[error(
        "expected exactly one package in {}, found {}",
        .directory.display(),
        .found.len()
    )]
    PackageCount {
        /// Directory that was scanned.
        directory: PathBuf,
        /// Every matching file, sorted by name.
        found: Vec<PathBuf>,
    },

    /// The package directory could not be enumerated.
    #[error("cannot read package directory {}: {source}", .directory.display())]
    UnreadableDirectory {
        /// Directory that was scanned.
        directory: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The running host does not satisfy the configured host requirement.
    #[error("validation requires a {required} host, running on {actual}")]
    HostMismatch {
        /// Host family required by the configuration.
        required: PlatformFamily,
        /// Operating system this process runs on.
        actual: String,
    },

    /// The package could not be duplicated into the staging area.
    #[error("failed to stage {} as {}: {source}", .from.display(), .to.display())]
    Staging {
        /// Source path of the copy or rename.
        from: PathBuf,
        /// Destination path of the copy or rename.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The staged copy is not a valid archive.
    #[error("invalid archive {}: {reason}", .path.display())]
    InvalidArchive {
        /// Path of the staged archive.
        path: PathBuf,
        /// Reader diagnostic.
        reason: String,
    },

    /// A platform token has no recognized family prefix.
    #[error("unsupported platform: {token:?}")]
    UnsupportedPlatform {
        /// The offending token, after trimming.
        token: String,
    },

    /// A required native binary is missing from the package.
    #[error("{path} not found for {platform}")]
    MissingAsset {
        /// Platform token the asset was required for.
        platform: String,
        /// Expected archive entry path.
        path: String,
    },

    /// A staging artifact survived finalization.
    #[error("failed to remove staging file {}: {source}", .path.display())]
    Cleanup {
        /// Staging file that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ValidationError {
    /// Returns the taxonomy kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuget_validate_core::ErrorKind;
    /// use nuget_validate_core::ValidationError;
    ///
    /// let err = ValidationError::UnsupportedPlatform {
    ///     token: "freebsd-x64".to_string(),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::UnsupportedPlatform);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PackageCount { .. } | Self::UnreadableDirectory { .. } => ErrorKind::Precondition,
            Self::HostMismatch { .. } | Self::Staging { .. } => ErrorKind::Platform,
            Self::InvalidArchive { .. } => ErrorKind::Archive,
            Self::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            Self::MissingAsset { .. } => ErrorKind::MissingAsset,
            Self::Cleanup { .. } => ErrorKind::Cleanup,
        }
    }

    /// Returns the expected archive path for a missing asset.
    #[must_use]
    pub fn missing_path(&self) -> Option<&str> {
        match self {
            Self::MissingAsset { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the platform token this error is about, if any.
    #[must_use]
    pub fn platform_token(&self) -> Option<&str> {
        match self {
            Self::MissingAsset { platform, .. } => Some(platform),
            Self::UnsupportedPlatform { token } => Some(token),
            _ => None,
        }
    }
}
