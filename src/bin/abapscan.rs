use abapscan_core::cli::{self, Cli};
use abapscan_core::exit::AbapscanExit;
use abapscan_core::logging;
use clap::Parser;
use colored::Colorize;

fn main() -> AbapscanExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli::dispatch::execute(&cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            AbapscanExit::Error
        }
    }
}
