use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod error;
mod report;

use crate::cli::Cli;
use crate::commands::Commands;
pub use crate::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Cli::parse();

    let result = match &args.command {
        Commands::Http(http) => http.run().await,
        Commands::Files(files) => files.run().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
