/*!
 * Command-line interface for paper-export
 */

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Local;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use log::info;

use paper_export::config::{Args, Config};
use paper_export::dropbox::{AccessToken, DropboxClient};
use paper_export::error::{Error, Result};
use paper_export::logging::init_logging;
use paper_export::pipeline::run_migration;
use paper_export::report::{MigrationReport, ReportFormat, Reporter};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        generate(shell, &mut Args::command(), "paper-export", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = Config::from_args(args);
    init_logging(config.debug);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly so RUST_LOG cannot hide it
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    config.validate()?;

    // No network call may happen without a credential
    let token = AccessToken::from_env()?;
    let client = DropboxClient::new(token).map_err(Error::Client)?;

    let started = Local::now();
    let start_time = Instant::now();

    info!(
        "Exporting {} documents from {:?} to {}",
        config.source_extension,
        config.source_folder,
        config.output_dir.display()
    );
    let stats = run_migration(&client, config)?;

    let report = MigrationReport {
        source_folder: config.source_folder.clone(),
        output_dir: config.output_dir.display().to_string(),
        started,
        duration: start_time.elapsed(),
        stats,
    };
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
