//! Error conversion utilities for CLI.
//!
//! Converts nuget-validate-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use nuget_validate_core::ValidationError;

/// Converts `ValidationError` to user-friendly anyhow error with context
pub fn convert_validation_error(err: &ValidationError) -> anyhow::Error {
    match err {
        ValidationError::PackageCount { directory, found } => {
            let listed = found
                .iter()
                .map(|p| format!("  {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n");
            anyhow!(
                "No Nuget packages / more than one Nuget packages found in '{}' ({} found)\n{}\
                 HINT: --nuget_path must point at a directory holding exactly one .nupkg.",
                directory.display(),
                found.len(),
                if listed.is_empty() {
                    String::new()
                } else {
                    format!("{listed}\n")
                }
            )
        }
        ValidationError::UnreadableDirectory { directory, source } => {
            anyhow!(
                "Cannot read package directory '{}': {source}\n\
                 HINT: Check that --nuget_path exists and is a directory.",
                directory.display()
            )
        }
        ValidationError::HostMismatch { required, actual } => {
            anyhow!(
                "Nuget validation is restricted to {required} hosts, this host is {actual}\n\
                 HINT: Drop --require-host to validate on any host."
            )
        }
        ValidationError::Staging { from, to, source } => {
            anyhow!(
                "Could not stage '{}' as '{}': {source}\n\
                 HINT: Check that --staging-dir exists and is writable.",
                from.display(),
                to.display()
            )
        }
        ValidationError::InvalidArchive { path, reason } => {
            anyhow!(
                "Package is not a valid zip archive ('{}'): {reason}\n\
                 HINT: The package may be truncated or corrupted.",
                path.display()
            )
        }
        ValidationError::UnsupportedPlatform { token } => {
            anyhow!(
                "Unsupported platform: {token:?}\n\
                 HINT: Platform tokens must start with win, linux or osx and be separated by commas without spaces."
            )
        }
        ValidationError::MissingAsset { platform, path } => {
            anyhow!(
                "{path} not found for {platform}\n\
                 HINT: The package build did not include the native runtime for {platform}."
            )
        }
        ValidationError::Cleanup { path, source } => {
            anyhow!(
                "Failed to remove staging file '{}': {source}\n\
                 HINT: Delete it manually before the next run.",
                path.display()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_missing_asset_error() {
        let err = ValidationError::MissingAsset {
            platform: "osx-x64".to_string(),
            path: "runtimes/osx-x64/native/libonnxruntime.dylib".to_string(),
        };
        let msg = format!("{:?}", convert_validation_error(&err));
        assert!(msg.contains("runtimes/osx-x64/native/libonnxruntime.dylib not found for osx-x64"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_package_count_lists_matches() {
        let err = ValidationError::PackageCount {
            directory: PathBuf::from("out"),
            found: vec![PathBuf::from("out/a.nupkg"), PathBuf::from("out/b.nupkg")],
        };
        let msg = format!("{:?}", convert_validation_error(&err));
        assert!(msg.contains("2 found"));
        assert!(msg.contains("out/a.nupkg"));
        assert!(msg.contains("out/b.nupkg"));
    }

    #[test]
    fn test_convert_staging_error() {
        let err = ValidationError::Staging {
            from: PathBuf::from("pkg.nupkg"),
            to: PathBuf::from("NugetCopy.nupkg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = format!("{:?}", convert_validation_error(&err));
        assert!(msg.contains("--staging-dir"));
    }
}
