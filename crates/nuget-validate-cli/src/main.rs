//! validate-nuget - Post-build check that a NuGet package carries the native
//! runtime for every supported platform.

mod cli;
mod error;
mod output;
mod validate;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match validate::execute(&cli, &mut *formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            log::debug!("validation failed: {:#}", failure.error);
            formatter.format_error(&failure.error, failure.kind.as_deref());
            ExitCode::FAILURE
        }
    }
}
