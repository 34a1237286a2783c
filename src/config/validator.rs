//! Catalogue validation rules.
//!
//! This module validates a parsed catalogue for correctness:
//! - String probes need `shell: true`, argument vectors must not set it
//! - Argument-vector probes must not be empty
//! - Package names, commands, URLs and remotes must not be empty
//! - App-store ids must be numeric
//! - File maps must list at least one file

use crate::config::schema::{CatalogueConfig, ComponentConfig, ProbeCommand};
use crate::error::{ProvisionError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Component the error belongs to
    pub component: String,
}

impl ValidationError {
    fn new(rule: &str, component: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            component: component.to_string(),
        }
    }
}

/// Validate a catalogue and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, so an operator can fix several issues at once.
pub fn validate_catalogue(config: &CatalogueConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, component) in &config.components {
        if id.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-id",
                id,
                "Component ids must not be empty".to_string(),
            ));
        }
        errors.extend(validate_probe(id, component));
        errors.extend(validate_installers(id, component));
    }

    errors
}

fn validate_probe(id: &str, component: &ComponentConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(detect) = &component.detect else {
        return errors;
    };

    match (&detect.command, detect.shell) {
        (ProbeCommand::Script(_), false) => errors.push(ValidationError::new(
            "string-probe-without-shell",
            id,
            format!("Component '{}' has a string probe but 'shell' is not true", id),
        )),
        (ProbeCommand::Argv(_), true) => errors.push(ValidationError::new(
            "argv-probe-with-shell",
            id,
            format!(
                "Component '{}' sets 'shell: true' on an argument-vector probe; use a string instead",
                id
            ),
        )),
        _ => {}
    }

    match &detect.command {
        ProbeCommand::Argv(argv) if argv.is_empty() || argv[0].trim().is_empty() => {
            errors.push(ValidationError::new(
                "empty-probe",
                id,
                format!("Component '{}' has an empty probe command", id),
            ));
        }
        ProbeCommand::Script(script) if script.trim().is_empty() => {
            errors.push(ValidationError::new(
                "empty-probe",
                id,
                format!("Component '{}' has an empty probe command", id),
            ));
        }
        _ => {}
    }

    errors
}

fn validate_installers(id: &str, component: &ComponentConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut require = |rule: &str, value: &str, field: &str| {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(
                rule,
                id,
                format!("Component '{}' has an empty '{}'", id, field),
            ));
        }
    };

    if let Some(package) = &component.package {
        require("empty-package-name", &package.name, "package.name");
    }
    if let Some(script) = &component.script {
        require("empty-url", &script.url, "script.url");
        require("empty-interpreter", &script.interpreter, "script.interpreter");
    }
    if let Some(runtime) = &component.runtime {
        require("empty-version", &runtime.version, "runtime.version");
    }
    if let Some(run) = &component.run {
        require("empty-command", &run.command, "run.command");
    }
    if let Some(pkg) = &component.pkg {
        require("empty-url", &pkg.url, "pkg.url");
    }
    if let Some(dmg) = &component.dmg {
        require("empty-url", &dmg.url, "dmg.url");
        require("empty-volume", &dmg.volume_path, "dmg.volume_path");
    }
    if let Some(git) = &component.git {
        require("empty-repo", &git.repo, "git.repo");
        require("empty-dest", &git.dest, "git.dest");
    }

    if let Some(app_store) = &component.app_store {
        let app = app_store.app.trim();
        if app.is_empty() || !app.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::new(
                "non-numeric-app-id",
                id,
                format!(
                    "Component '{}' has app-store id '{}' which is not numeric",
                    id, app_store.app
                ),
            ));
        }
    }

    if let Some(files) = &component.files {
        if files.map.is_empty() {
            errors.push(ValidationError::new(
                "empty-file-map",
                id,
                format!("Component '{}' declares 'files' without any files", id),
            ));
        }
    }

    errors
}

/// Validate a catalogue, returning the first batch of errors as one.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &CatalogueConfig) -> Result<()> {
    let errors = validate_catalogue(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ProvisionError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
