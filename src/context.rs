//! Per-invocation execution context shared by the release workflows.

use std::collections::HashMap;
use std::path::PathBuf;

use semver::Version;
use tokio::io::AsyncWrite;

/// Write-only byte sink subprocess output is relayed into.
pub type OutputSink<'a> = &'a mut (dyn AsyncWrite + Send + Unpin);

/// Scoped execution context for one prepare or verify-auth invocation.
///
/// The caller owns both output sinks; this subsystem borrows them for live
/// relaying and never closes them, so the same pair stays writable across the
/// sequential subprocess calls of one invocation (and across invocations).
pub struct ExecutionContext<'io> {
    /// Absolute working directory used as the default subprocess root
    pub cwd: PathBuf,
    /// Environment overlay merged over the process environment for subprocesses
    pub env: HashMap<String, String>,
    /// Relay sink for subprocess standard output
    pub stdout: OutputSink<'io>,
    /// Relay sink for subprocess standard error
    pub stderr: OutputSink<'io>,
    /// Resolved release version; required by the prepare workflow, unused by
    /// verify-auth (which runs before a version is known)
    pub release_version: Option<Version>,
}

impl ExecutionContext<'_> {
    /// Lend both sinks to a single subprocess invocation.
    ///
    /// The reborrow ends when the subprocess completes, without transferring
    /// stream lifecycle ownership.
    pub fn relay_sinks(&mut self) -> RelaySinks<'_> {
        RelaySinks {
            stdout: &mut *self.stdout,
            stderr: &mut *self.stderr,
        }
    }
}

/// Borrowed stdout/stderr sink pair for one subprocess run.
pub struct RelaySinks<'a> {
    /// Standard output relay target
    pub stdout: &'a mut (dyn AsyncWrite + Send + Unpin),
    /// Standard error relay target
    pub stderr: &'a mut (dyn AsyncWrite + Send + Unpin),
}
