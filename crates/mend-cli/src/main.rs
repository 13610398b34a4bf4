//! CLI entrypoint for the mend refactoring tool.
//!
//! The binary delegates to [`mend_cli::run`], which owns argument
//! parsing, telemetry, and command dispatch.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    mend_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
