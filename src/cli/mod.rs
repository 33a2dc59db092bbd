//! Command line interface for yarn_release.

mod args;
mod commands;

pub use args::{Args, Command};
pub use commands::execute_command;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
