//! carve - custom builds of the Lo-Dash utility library.

use std::process::ExitCode;

use carve_cli::error::CliError;
use carve_cli::{cli, commands, error, logger, ui};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // log lines and status messages share one color decision
    let color = ui::init_colors(args.no_color);
    logger::init_logger(args.verbose, args.quiet, !color);

    match commands::execute(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // -s silences the report but not the exit status
            if !args.is_silent() {
                print_failure(err);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_failure(err: CliError) {
    // the builder has already logged each diagnostic
    if let CliError::BuildFailed { help, .. } = &err {
        ui::error(&err.to_string());
        if let Some(help) = help {
            ui::info(help);
        }
        return;
    }
    eprintln!("{:?}", error::cli_error_to_miette(err));
}
