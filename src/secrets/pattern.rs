//! Recognising secret-looking environment variable names.

use regex::Regex;

/// Built-in patterns as `(name, regex)`.
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("api_key", r"(?i)^.*_?(API_?KEY|APIKEY)$"),
    ("secret", r"(?i)^.*_?(SECRET|SECRET_KEY)$"),
    ("token", r"(?i)^.*_?(TOKEN|ACCESS_TOKEN|AUTH_TOKEN)$"),
    ("password", r"(?i)^.*_?(PASSWORD|PASSWD|PWD)$"),
    ("credential", r"(?i)^.*_?CREDENTIALS?$"),
    ("private_key", r"(?i)^.*_?PRIVATE_KEY$"),
];

/// A named pattern over variable names.
#[derive(Debug, Clone)]
pub struct SecretPattern {
    pub name: String,
    pub env_pattern: Regex,
}

/// Matches environment variable names against secret patterns.
///
/// Used to decide which script environment overrides to hide when a
/// command line is displayed.
///
/// # Example
///
/// ```
/// use provision::secrets::SecretMatcher;
///
/// let matcher = SecretMatcher::with_builtins();
/// assert!(matcher.is_secret("HOMEBREW_GITHUB_API_TOKEN"));
/// assert!(!matcher.is_secret("NONINTERACTIVE"));
/// ```
#[derive(Debug, Clone)]
pub struct SecretMatcher {
    patterns: Vec<SecretPattern>,
}

impl SecretMatcher {
    /// Create a matcher with built-in patterns.
    pub fn with_builtins() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .filter_map(|(name, pattern)| {
                Regex::new(pattern).ok().map(|env_pattern| SecretPattern {
                    name: name.to_string(),
                    env_pattern,
                })
            })
            .collect();

        Self { patterns }
    }

    /// Check if an environment variable name matches any secret pattern.
    pub fn is_secret(&self, env_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.env_pattern.is_match(env_name))
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}
