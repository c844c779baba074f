//! `parfind` — benchmark driver for the parfind union-find engines.
//!
//! ```text
//! parfind <impl> <ops_file> <num_runs> [<num_threads>]
//! ```
//!
//! Loads a pre-recorded operation stream, replays it `num_runs` times on a
//! fresh engine instance per run, and prints per-run timings plus a summary
//! to stdout. Diagnostics go to stderr. Exit code 0 on success, 1 on any
//! argument, I/O, or validation failure.

use std::process::ExitCode;

use clap::Parser;

mod bench;
mod cli;
mod error;
mod io;

use crate::cli::Cli;

fn main() -> ExitCode {
    // clap's own exit code for usage errors is 2; this binary promises 1 for
    // every failure, so argument errors are rendered and remapped here.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match bench::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
