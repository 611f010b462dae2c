//! pixelfx - command-line tool for applying named image transforms

use std::process::ExitCode;

use pixelfx::cli;

fn main() -> ExitCode {
    cli::run()
}
