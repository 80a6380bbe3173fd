//! Hexel - command-line tool for encoding and decoding palette payloads

use std::process::ExitCode;

use hexel::cli;

fn main() -> ExitCode {
    cli::run()
}
