//! Platform-specific functionality and error handling.

/// Report a fatal error with its cause chain and exit with code 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    tracing::debug!("Fatal error: {error:?}");
    eprintln!();
    eprintln!("Error: {error}");
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse the command line arguments.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    crate::core::cli::CliArgs::parse()
}
