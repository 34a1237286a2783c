//! Variable interpolation for catalogue values.
//!
//! Catalogue strings may reference host values using `${variable}` syntax.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//!
//! Only lowercase names (`home`, `shell`) are catalogue variables. Anything
//! else inside `${...}`, such as `${HOME}` or `${PATH:-/usr/bin}`, is left
//! for the shell.
//!
//! # Example
//!
//! ```yaml
//! dest: "${home}/.vimrc"
//! # With home="/Users/dev", produces: /Users/dev/.vimrc
//! ```

use crate::config::host::HostEnvironment;
use crate::error::{ProvisionError, Result};
use std::collections::HashMap;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
///
/// Supports:
/// - `${variable_name}` - variable interpolation
/// - `$${escaped}` - literal `${escaped}` in output
///
/// A lone `$` not followed by `{` is kept as-is, so shell fragments such as
/// `"$(curl ...)"` pass through untouched. So does a `${...}` whose body is
/// not a catalogue variable name, or that is never closed.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    // $$ outside of an escape is the shell's PID variable
                    current_literal.push_str("$$");
                }
            }
            Some('{') => {
                chars.next();

                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }

                let name = body.trim();
                if closed && is_variable_name(name) {
                    if !current_literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                    }
                    segments.push(Segment::Variable(name.to_string()));
                } else {
                    current_literal.push_str("${");
                    current_literal.push_str(&body);
                    if closed {
                        current_literal.push('}');
                    }
                }
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// `[a-z][a-z0-9_]*`
fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Variables available while resolving one component's strings.
#[derive(Debug, Default, Clone)]
pub struct InterpolationContext {
    vars: HashMap<String, String>,
}

impl InterpolationContext {
    /// Context exposing the host's catalogue variables.
    pub fn from_host(host: &HostEnvironment) -> Self {
        Self {
            vars: host.variables(),
        }
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Resolve all variables in a string belonging to `component`.
///
/// # Errors
///
/// Returns `UndefinedVariable` if any variable is not found in the context.
pub fn resolve_string(
    input: &str,
    context: &InterpolationContext,
    component: &str,
) -> Result<String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| ProvisionError::UndefinedVariable {
                            component: component.to_string(),
                            name: name.clone(),
                        })?;
                result.push_str(value);
            }
        }
    }

    Ok(result)
}
