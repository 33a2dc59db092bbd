//! Subprocess orchestration with live output relaying.
//!
//! Launches the package-manager CLIs as external processes, forwards their
//! stdout/stderr chunk-by-chunk to caller-supplied sinks while accumulating
//! the full capture, and reports non-zero exits as fatal errors. A failed
//! subprocess is never retried here.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

use crate::context::RelaySinks;
use crate::error::{ProcessError, Result};

/// Captured output of a completed subprocess.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Accumulated standard output
    pub stdout: String,
    /// Accumulated standard error
    pub stderr: String,
}

/// Run `program` with `args`, relaying its output live to `sinks`.
///
/// Each chunk is written to the caller's sink as soon as it is read off the
/// pipe, in addition to being accumulated for the returned [`ProcessOutput`].
/// The relay never signals end-of-stream on the sinks when a pipe closes;
/// the sinks stay writable for the next subprocess in the workflow.
///
/// The binary is resolved the way execa's `preferLocal` does it:
/// `<cwd>/node_modules/.bin` is searched ahead of `PATH`, and a `PATH` entry
/// in the env overlay takes precedence over the process one.
///
/// # Errors
///
/// Fails when the binary cannot be found or launched, when relaying to a
/// sink fails, or when the process exits with a non-zero status.
pub async fn run(
    program: &str,
    args: &[&str],
    cwd: &Path,
    env: &HashMap<String, String>,
    sinks: RelaySinks<'_>,
) -> Result<ProcessOutput> {
    let command_line = render_command_line(program, args);
    let binary = resolve_binary(program, cwd, env).ok_or_else(|| ProcessError::NotFound {
        command: program.to_string(),
    })?;

    let mut child = Command::new(&binary)
        .args(args)
        .current_dir(cwd)
        .envs(env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            command: command_line.clone(),
            source,
        })?;

    let stdout_pipe = child.stdout.take().ok_or_else(|| ProcessError::Spawn {
        command: command_line.clone(),
        source: std::io::Error::other("stdout pipe missing"),
    })?;
    let stderr_pipe = child.stderr.take().ok_or_else(|| ProcessError::Spawn {
        command: command_line.clone(),
        source: std::io::Error::other("stderr pipe missing"),
    })?;

    // Both pipes must drain concurrently; a full pipe buffer stalls the child.
    let (stdout, stderr) = tokio::try_join!(
        relay(stdout_pipe, sinks.stdout),
        relay(stderr_pipe, sinks.stderr),
    )?;

    let status = child.wait().await?;
    if !status.success() {
        return Err(ProcessError::Failed {
            command: command_line,
            code: status.code(),
            stderr: stderr.trim().to_string(),
        }
        .into());
    }

    Ok(ProcessOutput { stdout, stderr })
}

/// Forward a pipe to the caller's sink while accumulating the capture.
async fn relay(
    mut pipe: impl AsyncRead + Unpin,
    sink: &mut (dyn AsyncWrite + Send + Unpin),
) -> std::io::Result<String> {
    let mut captured = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let read = pipe.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        sink.write_all(&chunk[..read]).await?;
        sink.flush().await?;
        captured.extend_from_slice(&chunk[..read]);
    }
    // No shutdown: the sink outlives this subprocess.
    Ok(String::from_utf8_lossy(&captured).into_owned())
}

fn render_command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn resolve_binary(program: &str, cwd: &Path, env: &HashMap<String, String>) -> Option<PathBuf> {
    let base_path = env
        .get("PATH")
        .cloned()
        .or_else(|| std::env::var("PATH").ok())
        .unwrap_or_default();
    let mut paths: Vec<PathBuf> = vec![cwd.join("node_modules").join(".bin")];
    paths.extend(std::env::split_paths(&base_path));
    let search_path: OsString = std::env::join_paths(paths).ok()?;
    which::which_in(program, Some(search_path), cwd).ok()
}
