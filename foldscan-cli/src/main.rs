//! Entry point for the foldscan binary

use clap::Parser;
use foldscan_cli::commands::Commands;

/// Parse, validate and report window-size cross-validation scans
#[derive(Debug, Parser)]
#[command(name = "foldscan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Report(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
