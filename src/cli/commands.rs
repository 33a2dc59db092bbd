//! Command execution for the CLI driver.
//!
//! The binary is a thin driver around the library workflows; release
//! orchestration, next-version computation, and publishing itself stay with
//! the calling pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::auth;
use crate::cli::{Args, Command};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::manifest::PackageManifest;
use crate::prepare::{self, PrepareOptions};

/// Execute the parsed command, returning the process exit code.
pub async fn execute_command(args: Args) -> Result<i32> {
    let cwd = args
        .cwd
        .canonicalize()
        .with_context(|| format!("working directory {} is not accessible", args.cwd.display()))?;
    let npmrc = args.npmrc.unwrap_or_else(default_npmrc_path);
    let env: HashMap<String, String> = std::env::vars().collect();

    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    match args.command {
        Command::Prepare {
            version,
            tarball_dir,
            pkg_root,
        } => {
            let options = PrepareOptions {
                tarball_dir,
                pkg_root,
            };
            let mut ctx = ExecutionContext {
                cwd,
                env,
                stdout: &mut stdout,
                stderr: &mut stderr,
                release_version: Some(version),
            };
            prepare::prepare(&npmrc, &options, &mut ctx).await?;
        }
        Command::VerifyAuth { package } => {
            let manifest_path = package.unwrap_or_else(|| cwd.join("package.json"));
            let pkg = PackageManifest::load(&manifest_path).await?;
            let mut ctx = ExecutionContext {
                cwd,
                env,
                stdout: &mut stdout,
                stderr: &mut stderr,
                release_version: None,
            };
            auth::verify(&npmrc, &pkg, &mut ctx).await?;
        }
    }

    Ok(0)
}

fn default_npmrc_path() -> PathBuf {
    std::env::temp_dir().join(format!("yarn-release-{}.npmrc", std::process::id()))
}
