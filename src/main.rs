//! duster CLI entry point
//!
//! Exit codes: 0 on success (including gate-refused no-ops), 2 for usage
//! errors, 1 for everything else. Usage and validation messages go to
//! stdout because other tooling parses the `Usage:` / `ERROR:` markers
//! there; diagnostics go through `log` to stderr.

mod cli;
mod commands;

use duster::error::Error;

fn main() {
    match cli::run() {
        Ok(()) => {},
        Err(err) => {
            // Partial failures enumerate every entry before the summary.
            if let Error::Partial(failures) = &err {
                for failure in failures {
                    println!("ERROR: {failure}");
                }
            }
            println!("{err}");
            std::process::exit(err.exit_code());
        },
    }
}
