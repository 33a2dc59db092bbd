//! Shared fixtures for the integration suites: stub package-manager
//! executables driven through a controlled PATH.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Stub `yarn` honoring the `version` and `pack` subcommands the way yarn
/// classic behaves: `version` rewrites only the manifest's version field,
/// `pack` drops a tarball named `<name>-v<version>.tgz` into the package
/// directory and reports `Wrote tarball to "<path>"` on stdout.
pub const YARN_STUB: &str = r#"cmd="$1"; shift
case "$cmd" in
  version)
    new=""
    while [ "$#" -gt 0 ]; do
      if [ "$1" = "--new-version" ]; then new="$2"; shift 2; else shift; fi
    done
    sed "s/\"version\": *\"[^\"]*\"/\"version\": \"$new\"/" package.json > package.json.tmp
    mv package.json.tmp package.json
    echo "info New version: $new"
    ;;
  pack)
    dir="$PWD"
    while [ "$#" -gt 0 ]; do
      if [ "$1" = "--cwd" ]; then dir="$2"; shift 2; else shift; fi
    done
    name=$(sed -n 's/.*"name": *"\([^"]*\)".*/\1/p' "$dir/package.json")
    version=$(sed -n 's/.*"version": *"\([^"]*\)".*/\1/p' "$dir/package.json")
    : > "$dir/$name-v$version.tgz"
    echo "success Wrote tarball to \"$dir/$name-v$version.tgz\"."
    ;;
esac"#;

/// Write an executable shell stub named `name` into `bin_dir`.
pub fn write_stub(bin_dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Environment overlay that puts `bin_dir` ahead of the current PATH.
pub fn stub_env(bin_dir: &Path) -> HashMap<String, String> {
    let path = match std::env::var("PATH") {
        Ok(current) => format!("{}:{}", bin_dir.display(), current),
        Err(_) => bin_dir.display().to_string(),
    };
    HashMap::from([("PATH".to_string(), path)])
}

/// The stub PATH value itself, for driving the binary under test.
pub fn stub_path(bin_dir: &Path) -> String {
    stub_env(bin_dir).remove("PATH").unwrap()
}
