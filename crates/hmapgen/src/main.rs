//! `hmapgen` command-line entry point.

use clap::Parser;
use hmapgen::{
    build_source, generate_heightmap, report_lines, Cli, ConsoleProgress, HmapgenError, Response,
};
use hmapgen_core::NoProgress;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(response) => {
            if cli.json {
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("{}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!(
                    "Heightmap: {} (height offset: {} m)",
                    response.filename.display(),
                    response.height_offset
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            for line in report_lines(&e) {
                error!("{}", line);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Response, HmapgenError> {
    let bound = cli.bound()?;
    let options = cli.options()?;
    info!(
        "Sampling {} every {} m from {}",
        bound, options.precision, options.service
    );

    let source = build_source(&options)?;
    if cli.no_progress {
        generate_heightmap(bound, &options, &source, &mut NoProgress)
    } else {
        generate_heightmap(bound, &options, &source, &mut ConsoleProgress::stderr())
    }
}
