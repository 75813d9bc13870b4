//! CLI command implementations

use clap::Subcommand;

pub mod convert;
pub mod report;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a scan text file into the flat result tables
    Convert(convert::ConvertArgs),

    /// Check scan files for structural and numeric consistency
    Validate(validate::ValidateArgs),

    /// Render an HTML or LaTeX analysis report
    Report(report::ReportArgs),
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let convert_cmd = Commands::Convert(convert::ConvertArgs {
            input: PathBuf::from("scan.txt"),
            output: PathBuf::from("processed"),
            delimiter: None,
            config: None,
            quiet: false,
            verbose: 0,
        });

        let debug_str = format!("{:?}", convert_cmd);
        assert!(debug_str.contains("Convert"));
        assert!(debug_str.contains("scan.txt"));
    }

    #[test]
    fn test_enum_variants_completeness() {
        let report_cmd = Commands::Report(report::ReportArgs {
            input: PathBuf::from("scan.txt"),
            output: PathBuf::from("reports"),
            format: report::ReportKind::Html,
            top_k: None,
            config: None,
            quiet: false,
            verbose: 0,
        });

        match report_cmd {
            Commands::Report(_) => (),
            _ => panic!("Should be Report"),
        }
    }
}
