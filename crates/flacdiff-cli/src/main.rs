use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;
mod logging;

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = commands::run(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
