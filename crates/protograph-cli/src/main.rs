//! protograph CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use protograph_cli::{
    Args, EXIT_SUCCESS, error_adapter::to_reportables, exit_code, report_to_stderr,
};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting protograph");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = protograph_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let to_stderr = report_to_stderr(log::max_level());

        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &reportable)
                .expect("Writing to String buffer is infallible");

            if to_stderr {
                eprintln!("{writer}");
            } else {
                error!("{writer}");
            }
        }

        process::exit(exit_code(&err));
    }

    info!("Completed successfully");
    process::exit(EXIT_SUCCESS);
}
