//! spritegrid CLI binary: parse arguments, dispatch to a command.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use spritegrid_cli::cli_args::{Cli, Commands};
use spritegrid_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Detect {
            input,
            algorithm,
            expected_count,
            cache,
            json,
        } => commands::detect::run(&input, &algorithm, expected_count, cache.as_deref(), json),
        Commands::Crop {
            input,
            output,
            padding,
            padding_left,
            padding_right,
            padding_top,
            padding_bottom,
            pivot_x,
            pivot_y,
            only_if_needed,
            json,
        } => commands::crop::run(
            &input,
            &output,
            padding,
            padding_left,
            padding_right,
            padding_top,
            padding_bottom,
            (pivot_x, pivot_y),
            only_if_needed,
            json,
        ),
        Commands::Pivot {
            input,
            region,
            json,
        } => commands::pivot::run(&input, region.as_deref(), json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
