//! Registry authentication verification.
//!
//! Stages credentials into the scoped config file, then confirms they resolve
//! to an authenticated identity with `npm whoami`. The identity check only
//! runs against the default public registry; private registries skip it,
//! since not all of them implement `whoami` reliably.

use std::path::Path;

use crate::context::ExecutionContext;
use crate::error::{AuthError, Result};
use crate::manifest::PackageManifest;
use crate::npmrc;
use crate::process;
use crate::registry::{self, DEFAULT_REGISTRY};

/// Verify that the current credentials are valid for publishing `pkg`.
///
/// The default registry baseline can be overridden through the
/// `DEFAULT_NPM_REGISTRY` environment variable, which is stripped from the
/// environment handed to the identity-check subprocess.
///
/// # Errors
///
/// Fails with a missing-credentials error when no credential source exists,
/// and with an invalid-token error when the identity check does not confirm
/// an authenticated user. Every identity-check failure mode — non-zero exit,
/// launch failure, or the literal `undefined` some registries answer for an
/// invalid token — collapses into the invalid-token error; the underlying
/// diagnostic is preserved in its detail payload.
pub async fn verify(
    npmrc_path: &Path,
    pkg: &PackageManifest,
    ctx: &mut ExecutionContext<'_>,
) -> Result<()> {
    let mut env = ctx.env.clone();
    let default_registry = env
        .remove("DEFAULT_NPM_REGISTRY")
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_REGISTRY.to_string());

    let registry_url = registry::resolve_registry(pkg, &ctx.cwd, &ctx.env);
    npmrc::set_auth(npmrc_path, &registry_url, &ctx.cwd, &ctx.env).await?;

    if registry::normalize_registry_url(&registry_url)
        != registry::normalize_registry_url(&default_registry)
    {
        log::info!(
            "Skip identity check for non-default registry {}",
            registry_url
        );
        return Ok(());
    }

    let userconfig = npmrc_path.display().to_string();
    let whoami_args = [
        "whoami",
        "--userconfig",
        userconfig.as_str(),
        "--registry",
        registry_url.as_str(),
    ];
    let cwd = ctx.cwd.clone();
    match process::run("npm", &whoami_args, &cwd, &env, ctx.relay_sinks()).await {
        // Verdaccio before v5 reports an invalid token as the literal string
        // `undefined` with a zero exit status.
        Ok(output) if output.stdout.trim() == "undefined" => Err(AuthError::InvalidToken {
            registry: registry_url,
            detail: "registry answered `whoami` with the literal string `undefined`".to_string(),
        }
        .into()),
        Ok(_) => Ok(()),
        Err(source) => Err(AuthError::InvalidToken {
            registry: registry_url,
            detail: source.to_string(),
        }
        .into()),
    }
}
