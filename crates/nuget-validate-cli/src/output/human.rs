//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use nuget_validate_core::ArchiveListing;
use nuget_validate_core::AssetCheck;
use nuget_validate_core::CleanupReport;
use nuget_validate_core::ValidationObserver;
use nuget_validate_core::ValidationReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn line(&self, text: &str) {
        if !self.quiet {
            let _ = self.term.write_line(text);
        }
    }

    fn cleanup_message(&self, report: &CleanupReport) -> String {
        if self.verbose {
            format!(
                "Cleaning up after Nuget validation ({} staging file(s) removed)",
                report.removed.len()
            )
        } else {
            "Cleaning up after Nuget validation".to_string()
        }
    }

    fn mark(&self, ok: bool) -> String {
        match (ok, self.use_colors) {
            (true, true) => style("✓").green().bold().to_string(),
            (false, true) => style("✗").red().bold().to_string(),
            (true, false) => "ok".to_string(),
            (false, false) => "MISSING".to_string(),
        }
    }
}

impl ValidationObserver for HumanFormatter {
    fn on_package_located(&mut self, package: &Path) {
        self.line(&format!("Validating {}", package.display()));
    }

    fn on_staged(&mut self, archive: &Path, entries: usize) {
        if self.verbose {
            self.line(&format!(
                "  Staged copy: {} ({entries} entries)",
                archive.display()
            ));
        }
        self.line("Checking if the Nuget contains relevant dlls");
    }

    fn on_asset_checked(&mut self, check: &AssetCheck) {
        self.line(&format!(
            "  {} {} ({})",
            self.mark(check.present),
            check.path,
            check.platform
        ));
    }

    fn on_listing_dump(&mut self, listing: &ArchiveListing) {
        // Part of the failure diagnostics, shown even in quiet mode.
        let _ = self
            .err_term
            .write_line(&format!("Package contents ({} entries):", listing.len()));
        for name in listing.iter() {
            let _ = self.err_term.write_line(&format!("  {name}"));
        }
    }

    fn on_cleanup(&mut self, report: &CleanupReport) {
        self.line(&self.cleanup_message(report));

        for error in &report.errors {
            let message = format!("Cleanup failed: {error}");
            if self.use_colors {
                let _ = self
                    .err_term
                    .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
            } else {
                let _ = self.err_term.write_line(&format!("WARNING: {message}"));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &ValidationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Nuget validation was successful",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Nuget validation was successful");
        }

        let platforms: Vec<_> = report.platforms().collect();
        let _ = self
            .term
            .write_line(&format!("  Platforms: {}", platforms.join(", ")));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Package: {}", report.package.display()));
            let _ = self
                .term
                .write_line(&format!("  Entries: {}", report.entry_count));
            let _ = self
                .term
                .write_line(&format!("  Signature: {}", report.signature));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error, _kind: Option<&str>) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
        let _ = self.err_term.write_line("Nuget validation was unsuccessful");
    }

    fn as_observer(&mut self) -> &mut dyn ValidationObserver {
        self
    }
}
