//! Platform tokens and the native binaries each family must ship.

use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

/// Archive directory that holds per-platform runtime assets.
const RUNTIMES_DIR: &str = "runtimes";

/// Operating system family identified by a platform token prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
    /// `win*` tokens.
    Windows,
    /// `linux*` tokens.
    Linux,
    /// `osx*` tokens.
    MacOs,
}

impl PlatformFamily {
    /// All known families, in prefix-matching order.
    pub const ALL: [Self; 3] = [Self::Windows, Self::Linux, Self::MacOs];

    /// Token prefix that selects this family.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Windows => "win",
            Self::Linux => "linux",
            Self::MacOs => "osx",
        }
    }

    /// File name of the native runtime library for this family.
    #[must_use]
    pub const fn binary_name(self) -> &'static str {
        match self {
            Self::Windows => "onnxruntime.dll",
            Self::Linux => "libonnxruntime.so",
            Self::MacOs => "libonnxruntime.dylib",
        }
    }

    /// Classifies a token by prefix. The rest of the token is not inspected.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| token.starts_with(family.prefix()))
    }

    /// Family of the host this process was compiled for, if it is one of the
    /// known three.
    #[must_use]
    pub const fn host() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Self::MacOs)
        } else {
            None
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for PlatformFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.prefix() == s)
            .ok_or_else(|| format!("unknown platform family '{s}' (expected win, linux or osx)"))
    }
}

/// A validated platform token such as `win-x64` or `osx-arm64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSpec {
    token: String,
    family: PlatformFamily,
}

impl PlatformSpec {
    /// Parses a single token, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedPlatform`] if the token does not
    /// start with `win`, `linux` or `osx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuget_validate_core::PlatformFamily;
    /// use nuget_validate_core::PlatformSpec;
    ///
    /// let spec = PlatformSpec::parse("linux-arm64").unwrap();
    /// assert_eq!(spec.family(), PlatformFamily::Linux);
    /// assert_eq!(
    ///     spec.required_asset(),
    ///     "runtimes/linux-arm64/native/libonnxruntime.so"
    /// );
    /// ```
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        let token = token.trim();
        let family =
            PlatformFamily::from_token(token).ok_or_else(|| ValidationError::UnsupportedPlatform {
                token: token.to_string(),
            })?;

        Ok(Self {
            token: token.to_string(),
            family,
        })
    }

    /// The token as given, after trimming.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Family selected by the token prefix.
    #[must_use]
    pub const fn family(&self) -> PlatformFamily {
        self.family
    }

    /// Archive entry path the package must contain for this platform.
    #[must_use]
    pub fn required_asset(&self) -> String {
        format!(
            "{RUNTIMES_DIR}/{}/native/{}",
            self.token,
            self.family.binary_name()
        )
    }
}

impl fmt::Display for PlatformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Splits a comma-separated platform list into trimmed tokens.
///
/// Tokens are not validated here; empty tokens are kept so that a stray
/// comma is reported as an unsupported platform rather than ignored.
pub fn split_platform_list(list: &str) -> impl Iterator<Item = &str> {
    list.trim().split(',').map(str::trim)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_asset_per_family() {
        assert_eq!(
            PlatformSpec::parse("win-x64").unwrap().required_asset(),
            "runtimes/win-x64/native/onnxruntime.dll"
        );
        assert_eq!(
            PlatformSpec::parse("linux-x64").unwrap().required_asset(),
            "runtimes/linux-x64/native/libonnxruntime.so"
        );
        assert_eq!(
            PlatformSpec::parse("osx-arm64").unwrap().required_asset(),
            "runtimes/osx-arm64/native/libonnxruntime.dylib"
        );
    }

    #[test]
    fn test_suffix_is_opaque() {
        let spec = PlatformSpec::parse("win10-arm").unwrap();
        assert_eq!(spec.family(), PlatformFamily::Windows);
        assert_eq!(spec.required_asset(), "runtimes/win10-arm/native/onnxruntime.dll");

        let bare = PlatformSpec::parse("osx").unwrap();
        assert_eq!(bare.required_asset(), "runtimes/osx/native/libonnxruntime.dylib");
    }

    #[test]
    fn test_unknown_prefix_rejected() {
        let err = PlatformSpec::parse("freebsd-x64").unwrap_err();
        assert_eq!(err.platform_token(), Some("freebsd-x64"));

        // Prefix matching is case-sensitive.
        assert!(PlatformSpec::parse("Win-x64").is_err());
        assert!(PlatformSpec::parse("").is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec = PlatformSpec::parse("  linux-x64\t").unwrap();
        assert_eq!(spec.token(), "linux-x64");
    }

    #[test]
    fn test_split_platform_list() {
        let tokens: Vec<_> = split_platform_list(" linux-x64,win-x86,osx-x64 \n").collect();
        assert_eq!(tokens, vec!["linux-x64", "win-x86", "osx-x64"]);

        let tokens: Vec<_> = split_platform_list("win-x64,").collect();
        assert_eq!(tokens, vec!["win-x64", ""]);
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("win".parse::<PlatformFamily>().unwrap(), PlatformFamily::Windows);
        assert_eq!("osx".parse::<PlatformFamily>().unwrap(), PlatformFamily::MacOs);
        assert!("windows".parse::<PlatformFamily>().is_err());
    }

    #[test]
    fn test_host_family_matches_target() {
        #[cfg(target_os = "linux")]
        assert_eq!(PlatformFamily::host(), Some(PlatformFamily::Linux));
        #[cfg(target_os = "windows")]
        assert_eq!(PlatformFamily::host(), Some(PlatformFamily::Windows));
        #[cfg(target_os = "macos")]
        assert_eq!(PlatformFamily::host(), Some(PlatformFamily::MacOs));
    }
}
