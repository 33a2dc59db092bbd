//! Release preparation: manifest version write and optional tarball staging.
//!
//! The manifest rewrite is delegated to `yarn version`, which preserves the
//! file's formatting, indentation, and unrelated fields. When a tarball
//! directory is requested the package is packed and the produced archive is
//! staged there, skipping the move when it already sits at its destination.

mod tarball;

pub use tarball::extract_tarball_path;

use std::collections::HashMap;
use std::path::Path;

use crate::context::ExecutionContext;
use crate::error::{PrepareError, Result};
use crate::process;

/// Caller-supplied options for the prepare step.
#[derive(Debug, Clone, Default)]
pub struct PrepareOptions {
    /// Directory to stage the packed tarball into, resolved against the
    /// working directory; packing is skipped entirely when absent
    pub tarball_dir: Option<String>,
    /// Package root holding the manifest, resolved against the working
    /// directory; defaults to the working directory itself
    pub pkg_root: Option<String>,
}

/// Write the release version into the package manifest and optionally stage
/// a packed tarball.
///
/// `npmrc` is the scoped credential file both subprocesses are pointed at
/// through `NPM_CONFIG_USERCONFIG`; its lifecycle belongs to the caller.
///
/// # Errors
///
/// Propagates subprocess failures unchanged, and fails fatally when the pack
/// output has no parseable tarball location or the tarball cannot be moved
/// into place. Nothing is retried.
pub async fn prepare(
    npmrc: &Path,
    options: &PrepareOptions,
    ctx: &mut ExecutionContext<'_>,
) -> Result<()> {
    let base_path = match options.pkg_root.as_deref() {
        Some(root) => tarball::resolve_against(&ctx.cwd, Path::new(root)),
        None => ctx.cwd.clone(),
    };
    let version = ctx
        .release_version
        .as_ref()
        .ok_or(PrepareError::MissingReleaseVersion)?
        .to_string();

    log::info!(
        "Write version {} to package.json in {}",
        version,
        base_path.display()
    );

    let env = with_userconfig(&ctx.env, npmrc);
    let version_args = [
        "version",
        "--new-version",
        version.as_str(),
        "--no-git-tag-version",
    ];
    process::run("yarn", &version_args, &base_path, &env, ctx.relay_sinks()).await?;

    let Some(tarball_dir) = options.tarball_dir.as_deref() else {
        return Ok(());
    };

    log::info!("Creating yarn package version {}", version);
    let cwd = ctx.cwd.clone();
    let base_str = base_path.display().to_string();
    let pack_args = ["pack", "--cwd", base_str.as_str()];
    let output = process::run("yarn", &pack_args, &cwd, &env, ctx.relay_sinks()).await?;

    let produced =
        extract_tarball_path(&output.stdout).ok_or(PrepareError::TarballPathNotFound)?;
    let source = tarball::resolve_against(&cwd, Path::new(produced));
    let file_name = source
        .file_name()
        .ok_or(PrepareError::TarballPathNotFound)?
        .to_os_string();
    let destination =
        tarball::resolve_against(&cwd, Path::new(tarball_dir.trim())).join(file_name);

    // A tarball already sitting at its destination is left where it is.
    if source != destination {
        tarball::relocate(&source, &destination).await?;
    }

    Ok(())
}

fn with_userconfig(env: &HashMap<String, String>, npmrc: &Path) -> HashMap<String, String> {
    let mut env = env.clone();
    env.insert(
        "NPM_CONFIG_USERCONFIG".to_string(),
        npmrc.display().to_string(),
    );
    env
}
