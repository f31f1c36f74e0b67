//! zippy - read text one word at a time in the terminal.

use std::process::ExitCode;

use clap::Parser;

use zippy_cli::cli::{Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
