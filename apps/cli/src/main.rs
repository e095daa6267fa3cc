//! # CourseHub CLI Entry Point
//!
//! All setup lives in `lib.rs` so commands can be tested in-process.

use std::process::ExitCode;

fn main() -> ExitCode {
    coursehub_cli::run()
}
