//! Scoped npm credential file management.
//!
//! Stages registry credentials into the per-release user config file that
//! subprocesses are pointed at through `NPM_CONFIG_USERCONFIG`. Secrets are
//! written as `${NPM_TOKEN}`-style environment references, which the npm CLI
//! expands on read, so the token itself never lands on disk.

use std::collections::HashMap;
use std::path::Path;

use url::Url;

use crate::error::{AuthError, Result};
use crate::registry;

/// Write credentials for `registry_url` into the scoped config file `npmrc`.
///
/// Existing user npm config is carried over first; when it already holds
/// credentials for the registry nothing is appended. Otherwise a legacy
/// `_auth`/`email` pair (from `NPM_USERNAME`, `NPM_PASSWORD` and `NPM_EMAIL`)
/// or an `_authToken` entry (from `NPM_TOKEN`) is added.
///
/// # Errors
///
/// Fails when no credential source is available at all, or when the file
/// cannot be written.
pub async fn set_auth(
    npmrc: &Path,
    registry_url: &str,
    cwd: &Path,
    env: &HashMap<String, String>,
) -> Result<()> {
    log::info!("Verify authentication for registry {}", registry_url);

    let user_config = registry::user_config_path(cwd, env);
    let current = match tokio::fs::read_to_string(&user_config).await {
        Ok(content) => {
            log::info!("Reading npm config from {}", user_config.display());
            content
        }
        Err(_) => String::new(),
    };

    if has_auth_for(&current, registry_url) {
        write_npmrc(npmrc, &current).await?;
        return Ok(());
    }

    let has = |key: &str| env.get(key).is_some_and(|value| !value.is_empty());
    let credentials = if has("NPM_USERNAME") && has("NPM_PASSWORD") && has("NPM_EMAIL") {
        "_auth = ${LEGACY_TOKEN}\nemail = ${NPM_EMAIL}".to_string()
    } else if has("NPM_TOKEN") {
        format!("{}:_authToken = ${{NPM_TOKEN}}", nerf_dart(registry_url))
    } else {
        return Err(AuthError::MissingCredentials {
            registry: registry_url.to_string(),
        }
        .into());
    };

    let content = if current.is_empty() {
        credentials
    } else {
        format!("{}\n{}", current.trim_end(), credentials)
    };
    write_npmrc(npmrc, &content).await?;
    log::info!(
        "Wrote credentials for {} to {}",
        registry_url,
        npmrc.display()
    );
    Ok(())
}

/// Reduce a registry URL to npm's auth-key form: `//host[:port]/path/`.
pub fn nerf_dart(registry_url: &str) -> String {
    match Url::parse(registry_url.trim()) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            let port = url
                .port()
                .map(|port| format!(":{port}"))
                .unwrap_or_default();
            let path = url.path().trim_end_matches('/');
            format!("//{host}{port}{path}/")
        }
        Err(_) => {
            let stripped = registry_url
                .trim()
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            format!("//{stripped}/")
        }
    }
}

fn has_auth_for(content: &str, registry_url: &str) -> bool {
    let dart = nerf_dart(registry_url);
    content.lines().map(str::trim).any(|line| {
        if line.starts_with('#') || line.starts_with(';') {
            return false;
        }
        let Some((key, value)) = line.split_once('=') else {
            return false;
        };
        let key = key.trim();
        if value.trim().is_empty() {
            return false;
        }
        key == "_auth"
            || (key.starts_with(&dart)
                && (key.ends_with(":_authToken")
                    || key.ends_with(":_auth")
                    || key.ends_with(":username")))
    })
}

async fn write_npmrc(npmrc: &Path, content: &str) -> Result<()> {
    if let Some(parent) = npmrc.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(npmrc, content).await?;
    Ok(())
}
