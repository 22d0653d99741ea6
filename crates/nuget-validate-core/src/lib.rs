//! Post-build validation of NuGet packages carrying native runtimes.
//!
//! `nuget-validate-core` checks that a `.nupkg` contains the native runtime
//! library for every requested platform, at
//! `runtimes/<platform>/native/<binary>`. The package is inspected through a
//! staging copy that is always removed when the run ends.
//!
//! # Examples
//!
//! ```no_run
//! use nuget_validate_core::NoopObserver;
//! use nuget_validate_core::PackageValidator;
//! use nuget_validate_core::ValidatorConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = PackageValidator::new(ValidatorConfig::default());
//! let report = validator.run("build/nuget", "linux-x64,win-x86,osx-x64", &mut NoopObserver)?;
//! for check in &report.checks {
//!     println!("{}: {}", check.platform, check.path);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod listing;
pub mod locate;
pub mod platform;
pub mod report;
pub mod staging;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod validator;
pub mod verify;

pub use config::ValidatorConfig;
pub use error::ErrorKind;
pub use error::Result;
pub use error::ValidationError;
pub use listing::ArchiveListing;
pub use locate::locate_package;
pub use locate::locate_package_for;
pub use platform::PlatformFamily;
pub use platform::PlatformSpec;
pub use report::AssetCheck;
pub use report::NoopObserver;
pub use report::SignatureStatus;
pub use report::ValidationObserver;
pub use report::ValidationReport;
pub use staging::CleanupReport;
pub use staging::StagedArchive;
pub use staging::StagingGuard;
pub use staging::stage_copy;
pub use validator::PackageValidator;
pub use verify::verify_assets;
