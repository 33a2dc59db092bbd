//! # yarn_release
//!
//! Release preparation and registry authentication checks for yarn-managed
//! packages.
//!
//! Two independent workflows share one execution context:
//!
//! - **prepare** writes the resolved release version into `package.json`
//!   through `yarn version` (preserving the manifest's formatting) and
//!   optionally packs the package and stages the tarball into a target
//!   directory.
//! - **verify-auth** stages registry credentials into a scoped config file
//!   and, only for the default public registry, confirms they resolve to an
//!   authenticated identity with `npm whoami`.
//!
//! Subprocess output is relayed live to caller-supplied sinks while being
//! captured, so an orchestrating release pipeline keeps full visibility into
//! the package-manager CLIs it drives.
//!
//! ## Usage
//!
//! ```bash
//! yarn_release prepare --version 1.2.3 --tarball-dir tarball
//! yarn_release verify-auth
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod auth;
pub mod cli;
pub mod context;
pub mod error;
pub mod manifest;
pub mod npmrc;
pub mod prepare;
pub mod process;
pub mod registry;

// Re-export main types for public API
pub use auth::verify;
pub use context::{ExecutionContext, OutputSink, RelaySinks};
pub use error::{
    AuthError, ManifestError, PrepareError, ProcessError, ReleaseError, Result,
};
pub use manifest::{PackageManifest, PublishConfig};
pub use prepare::{PrepareOptions, extract_tarball_path, prepare};
pub use process::ProcessOutput;
pub use registry::{DEFAULT_REGISTRY, normalize_registry_url, resolve_registry};
