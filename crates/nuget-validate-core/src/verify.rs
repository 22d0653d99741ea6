//! Required native asset verification.

use crate::ArchiveListing;
use crate::AssetCheck;
use crate::PlatformSpec;
use crate::Result;
use crate::ValidationError;
use crate::ValidationObserver;
use crate::platform::split_platform_list;

/// Checks that `listing` holds the native runtime for every platform in
/// `platforms`.
///
/// `platforms` is a comma-separated list such as `linux-x64,win-x86,osx-x64`.
/// Tokens are processed in order and the check stops at the first failure:
/// later tokens are neither parsed nor looked up.
///
/// # Errors
///
/// Returns [`ValidationError::UnsupportedPlatform`] for a token without a
/// known prefix and [`ValidationError::MissingAsset`] for the first platform
/// whose binary is absent. In the latter case the observer receives the full
/// listing before the error is returned.
///
/// # Examples
///
/// ```
/// use nuget_validate_core::ArchiveListing;
/// use nuget_validate_core::NoopObserver;
/// use nuget_validate_core::verify_assets;
///
/// let listing: ArchiveListing = [
///     "runtimes/win-x64/native/onnxruntime.dll",
///     "runtimes/linux-x64/native/libonnxruntime.so",
/// ]
/// .into_iter()
/// .collect();
///
/// let checks = verify_assets("win-x64,linux-x64", &listing, &mut NoopObserver).unwrap();
/// assert_eq!(checks.len(), 2);
///
/// let err = verify_assets("osx-x64", &listing, &mut NoopObserver).unwrap_err();
/// assert_eq!(
///     err.missing_path(),
///     Some("runtimes/osx-x64/native/libonnxruntime.dylib")
/// );
/// ```
pub fn verify_assets(
    platforms: &str,
    listing: &ArchiveListing,
    observer: &mut dyn ValidationObserver,
) -> Result<Vec<AssetCheck>> {
    let mut checks = Vec::new();

    for token in split_platform_list(platforms) {
        let spec = PlatformSpec::parse(token)?;
        let path = spec.required_asset();
        log::info!("checking path: {path}");

        let check = AssetCheck {
            platform: spec.token().to_string(),
            family: spec.family(),
            present: listing.contains(&path),
            path,
        };
        observer.on_asset_checked(&check);

        if !check.present {
            log::debug!("archive listing: {:?}", listing.iter().collect::<Vec<_>>());
            observer.on_listing_dump(listing);
            return Err(ValidationError::MissingAsset {
                platform: check.platform,
                path: check.path,
            });
        }

        checks.push(check);
    }

    Ok(checks)
}
