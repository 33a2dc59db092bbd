//! Command line argument parsing and validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Release preparation and registry authentication checks for yarn packages
#[derive(Parser, Debug)]
#[command(
    name = "yarn_release",
    version,
    about = "Release preparation and registry authentication checks for yarn packages",
    long_about = "Prepare a yarn-managed package for publishing and verify registry credentials.

Usage:
  yarn_release prepare --version 1.2.3 --tarball-dir tarball
  yarn_release verify-auth"
)]
pub struct Args {
    /// Working directory of the package being released
    #[arg(long, global = true, default_value = ".")]
    pub cwd: PathBuf,

    /// Scoped npm config file subprocesses are pointed at (defaults to a
    /// per-process file under the system temp directory)
    #[arg(long, global = true)]
    pub npmrc: Option<PathBuf>,

    /// Workflow to run
    #[command(subcommand)]
    pub command: Command,
}

/// Release workflow steps
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the release version into package.json and optionally stage a tarball
    Prepare {
        /// Release version to write into the manifest
        #[arg(long)]
        version: semver::Version,

        /// Directory to stage the packed tarball into; packing is skipped
        /// when omitted
        #[arg(long)]
        tarball_dir: Option<String>,

        /// Package root holding the manifest, relative to the working directory
        #[arg(long)]
        pkg_root: Option<String>,
    },

    /// Verify registry credentials before publishing is attempted
    VerifyAuth {
        /// Path to package.json (defaults to <cwd>/package.json)
        #[arg(long)]
        package: Option<PathBuf>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
