//! Registry resolution and URL normalization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::manifest::PackageManifest;

/// Default public npm registry.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Resolve the registry URL that publishing `pkg` would target.
///
/// Precedence: `publishConfig.registry`, then the `NPM_CONFIG_REGISTRY`
/// environment variable, then a scope-specific or global `registry` entry in
/// the user npm config file, then the public default.
pub fn resolve_registry(
    pkg: &PackageManifest,
    cwd: &Path,
    env: &HashMap<String, String>,
) -> String {
    if let Some(registry) = pkg
        .publish_config
        .as_ref()
        .and_then(|config| config.registry.clone())
    {
        return registry;
    }
    if let Some(registry) = env.get("NPM_CONFIG_REGISTRY").filter(|v| !v.is_empty()) {
        return registry.clone();
    }

    if let Ok(content) = std::fs::read_to_string(user_config_path(cwd, env)) {
        if let Some(scope) = pkg.scope() {
            if let Some(registry) = config_value(&content, &format!("{scope}:registry")) {
                return registry;
            }
        }
        if let Some(registry) = config_value(&content, "registry") {
            return registry;
        }
    }

    DEFAULT_REGISTRY.to_string()
}

/// Path of the user npm config file consulted for registry and credential
/// lookups: `NPM_CONFIG_USERCONFIG` when set, else `<cwd>/.npmrc`.
pub(crate) fn user_config_path(cwd: &Path, env: &HashMap<String, String>) -> PathBuf {
    env.get("NPM_CONFIG_USERCONFIG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.join(".npmrc"))
}

/// Normalize a registry URL for equality comparison.
///
/// Lowercases the scheme and host, elides default ports, and ignores a
/// trailing slash, so `https://x/` and `https://x` compare equal. The
/// normalization is idempotent. Input that does not parse as a URL falls
/// back to the trimmed raw string, degrading the comparison to string
/// equality.
pub fn normalize_registry_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) => url.to_string().trim_end_matches('/').to_string(),
        Err(_) => raw.trim().trim_end_matches('/').to_string(),
    }
}

fn config_value(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .find_map(|line| {
            let (candidate, value) = line.split_once('=')?;
            (candidate.trim() == key).then(|| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn manifest(json: &str) -> PackageManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn trailing_slash_and_case_do_not_matter() {
        assert_eq!(
            normalize_registry_url("https://registry.npmjs.org"),
            normalize_registry_url("https://registry.npmjs.org/")
        );
        assert_eq!(
            normalize_registry_url("HTTPS://Registry.NPMJS.org:443/"),
            "https://registry.npmjs.org"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_registry_url("https://registry.corp.example.com/npm/");
        assert_eq!(normalize_registry_url(&once), once);
    }

    #[test]
    fn distinct_hosts_stay_distinct() {
        assert_ne!(
            normalize_registry_url("https://registry.npmjs.org/"),
            normalize_registry_url("https://registry.corp.example.com/")
        );
    }

    #[test]
    fn publish_config_wins_over_everything() {
        let pkg = manifest(
            r#"{"name": "my-pkg", "publishConfig": {"registry": "https://a.example.com/"}}"#,
        );
        let env = HashMap::from([(
            "NPM_CONFIG_REGISTRY".to_string(),
            "https://b.example.com/".to_string(),
        )]);
        assert_eq!(
            resolve_registry(&pkg, Path::new("/nonexistent"), &env),
            "https://a.example.com/"
        );
    }

    #[test]
    fn environment_wins_over_npmrc_and_default() {
        let pkg = manifest(r#"{"name": "my-pkg"}"#);
        let env = HashMap::from([(
            "NPM_CONFIG_REGISTRY".to_string(),
            "https://b.example.com/".to_string(),
        )]);
        assert_eq!(
            resolve_registry(&pkg, Path::new("/nonexistent"), &env),
            "https://b.example.com/"
        );
    }

    #[test]
    fn scoped_npmrc_entry_wins_over_global_one() {
        let tmp = tempfile::tempdir().unwrap();
        let mut npmrc = std::fs::File::create(tmp.path().join(".npmrc")).unwrap();
        writeln!(npmrc, "registry = https://global.example.com/").unwrap();
        writeln!(npmrc, "@corp:registry = https://scoped.example.com/").unwrap();

        let scoped = manifest(r#"{"name": "@corp/my-pkg"}"#);
        assert_eq!(
            resolve_registry(&scoped, tmp.path(), &HashMap::new()),
            "https://scoped.example.com/"
        );

        let plain = manifest(r#"{"name": "my-pkg"}"#);
        assert_eq!(
            resolve_registry(&plain, tmp.path(), &HashMap::new()),
            "https://global.example.com/"
        );
    }

    #[test]
    fn falls_back_to_the_public_default() {
        let pkg = manifest(r#"{"name": "my-pkg"}"#);
        assert_eq!(
            resolve_registry(&pkg, Path::new("/nonexistent"), &HashMap::new()),
            DEFAULT_REGISTRY
        );
    }
}
