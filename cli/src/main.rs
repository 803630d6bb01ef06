//! nwtunnel: maximum capacity between two points of a tunnel system

use std::io;
use std::process::ExitCode;

use clap::Parser;

use nwtunnel_cli::{run, Cli};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
