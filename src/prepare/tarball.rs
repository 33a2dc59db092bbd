//! Tarball location extraction and relocation for the pack step.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use path_absolutize::Absolutize;
use regex::Regex;

use crate::error::{PrepareError, Result};

/// Extract the produced tarball path from captured `yarn pack` output.
///
/// Finds the line reporting `Wrote tarball to "<path>"` and returns the
/// segment between the first and last double quote on that line, tolerating
/// arbitrary text before and after the quoted path. Returns `None` when no
/// such line exists or the quoted segment cannot be extracted.
pub fn extract_tarball_path(stdout: &str) -> Option<&str> {
    static TARBALL_LINE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"Wrote tarball to").expect("tarball line pattern is valid"));

    let line = stdout.lines().find(|line| TARBALL_LINE_RE.is_match(line))?;
    let first = line.find('"')?;
    let last = line.rfind('"')?;
    if last <= first + 1 {
        return None;
    }
    Some(&line[first + 1..last])
}

/// Lexically resolve `path` against `base`, collapsing `.` and `..` segments
/// so that equivalent locations compare equal.
pub(crate) fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    path.absolutize_from(base)
        .map(|resolved| resolved.into_owned())
        .unwrap_or_else(|_| base.join(path))
}

/// Move the produced tarball into place, creating missing parent directories
/// and falling back to copy-and-delete when rename crosses filesystems.
pub(crate) async fn relocate(from: &Path, to: &Path) -> Result<()> {
    let moved = async {
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        match tokio::fs::rename(from, to).await {
            Ok(()) => Ok(()),
            Err(_) => {
                tokio::fs::copy(from, to).await?;
                tokio::fs::remove_file(from).await
            }
        }
    }
    .await;

    moved.map_err(|source| {
        PrepareError::RelocationFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
        .into()
    })
}
