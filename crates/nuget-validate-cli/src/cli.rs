//! CLI argument parsing using clap.

use clap::Parser;
use nuget_validate_core::PlatformFamily;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "validate-nuget")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the package to validate (exactly one .nupkg)
    #[arg(long = "nuget_path", value_name = "DIR")]
    pub nuget_path: PathBuf,

    /// Comma separated list of platforms, no spaces (e.g. linux-x64,win-x86,osx-x64)
    #[arg(long = "platforms_supported", value_name = "PLATFORMS")]
    pub platforms_supported: String,

    /// Directory for the temporary package copies
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub staging_dir: PathBuf,

    /// Fail unless running on this host family (win, linux or osx)
    #[arg(long, value_name = "FAMILY")]
    pub require_host: Option<PlatformFamily>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}
