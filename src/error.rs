//! Error types for provisioning operations.
//!
//! This module defines [`ProvisionError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Detection failures never become errors; they fold into "absent"
//! - Every install-phase failure is fatal and propagates to `main`
//! - Use `anyhow::Error` (via `ProvisionError::Other`) for unexpected errors
//! - All errors should provide actionable messages for operators

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Catalogue file not found at the requested location.
    #[error("Catalogue not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the catalogue file.
    #[error("Failed to parse catalogue at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Catalogue parsed but describes something the engine cannot run.
    #[error("Invalid catalogue: {message}")]
    ConfigValidationError { message: String },

    /// A `${name}` reference with no value in the host environment.
    #[error("Undefined variable '{name}' in component '{component}'")]
    UndefinedVariable { component: String, name: String },

    /// An installer needs non-interactive elevated privilege and the process has none.
    #[error("'{component}' requires sudo. Run `sudo -v` and then re-run.")]
    PrivilegeRequired { component: String },

    /// An authenticated fetch was requested but no credential is set.
    #[error("'{component}' fetches private files but {variable} is not set")]
    MissingCredential { component: String, variable: String },

    /// An install-phase command exited non-zero or could not be started.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;
