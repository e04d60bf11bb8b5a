mod baseline_cmd;
mod cli;
mod config;
mod convert;
#[cfg(test)]
mod fixtures;
mod io;
mod logging;
mod lp3_cmd;
mod report;
mod report_cmd;
mod rp_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Baseline(args) => baseline_cmd::run(args),
        Command::Rp(args) => rp_cmd::run(args),
        Command::Lp3(args) => lp3_cmd::run(args),
        Command::Report(args) => report_cmd::run(args),
    }
}
