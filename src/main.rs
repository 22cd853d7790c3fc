mod cep47;
mod commands;
mod config;
mod error;
mod events;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red(), err);
            ExitCode::FAILURE
        }
    }
}
