//! subgen - Subdomain candidate generator
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;

use subgen::cli::Args;
use subgen::processor::{PipelineConfig, Processor};
use subgen::progress::{print_banner, print_error, print_header, print_info};
use subgen::staging;

fn main() -> ExitCode {
    // Parse command-line arguments; usage errors exit with code 2, help and version with 0
    let args = Args::parse();

    // Set up logging
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    staging::install_handler();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{}", e));

            // Print chain of errors
            let mut source = e.source();
            while let Some(err) = source {
                print_error(&format!("  Caused by: {}", err));
                source = err.source();
            }

            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> subgen::error::Result<()> {
    // Print banner unless quiet mode
    if !args.is_quiet() {
        print_banner();
    }

    // Create processor configuration
    let config = PipelineConfig::from_args(&args)?;

    // Show configuration
    if !config.quiet && config.verbose {
        print_config(&args, &config);
    }

    // Create and run processor
    let mut processor = Processor::new(config);
    processor.run()?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &PipelineConfig) {
    print_header("Configuration");

    print_info(&format!("Wordlist:      {}", config.wordlist));
    print_info(&format!("Wordlist 2:    {}", config.wordlist2));
    print_info(&format!("Domain:        {}", config.domain));
    print_info(&format!("Depth:         {}", config.depth));
    print_info(&format!("Output:        {}", args.get_output_path().display()));
    print_info(&format!("Strict labels: {}", config.strict_labels));
    if let Some(limit) = config.max_candidates {
        print_info(&format!("Max candidates: {}", limit));
    }
}
