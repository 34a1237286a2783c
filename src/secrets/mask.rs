//! Masking secret values in displayed text.

/// Replaces registered secret values with a fixed mask.
///
/// Longer secrets are replaced first, so a secret that contains another
/// is never half-masked.
///
/// # Example
///
/// ```
/// use provision::secrets::OutputMasker;
///
/// let mut masker = OutputMasker::new();
/// masker.add_secret("ghp_abc123");
///
/// let line = masker.mask("curl -H 'Authorization: Bearer ghp_abc123' https://api.github.com");
/// assert_eq!(line, "curl -H 'Authorization: Bearer [REDACTED]' https://api.github.com");
/// ```
#[derive(Debug, Clone)]
pub struct OutputMasker {
    secrets: Vec<String>,
    mask: String,
}

impl OutputMasker {
    /// Create a masker using `[REDACTED]`.
    pub fn new() -> Self {
        Self::with_mask("[REDACTED]")
    }

    /// Create a masker with a custom mask string.
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self {
            secrets: Vec::new(),
            mask: mask.into(),
        }
    }

    /// Register a secret value to be masked.
    ///
    /// Empty strings and duplicates are ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() || self.secrets.contains(&value) {
            return;
        }
        self.secrets.push(value);
        self.secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
    }

    /// Register multiple secret values.
    pub fn add_secrets(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
        for value in values {
            self.add_secret(value);
        }
    }

    /// Mask any secret values in the given string.
    pub fn mask(&self, input: &str) -> String {
        self.secrets
            .iter()
            .fold(input.to_string(), |acc, secret| acc.replace(secret.as_str(), &self.mask))
    }

    /// Get the number of registered secrets.
    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }
}

impl Default for OutputMasker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_single_secret() {
        let mut masker = OutputMasker::new();
        masker.add_secret("super-secret-value");

        let output = masker.mask("The key is super-secret-value here");
        assert_eq!(output, "The key is [REDACTED] here");
    }

    #[test]
    fn ignores_empty_and_duplicate_secrets() {
        let mut masker = OutputMasker::new();
        masker.add_secret("");
        masker.add_secret("real-secret");
        masker.add_secret("real-secret");

        assert_eq!(masker.secret_count(), 1);
        assert_eq!(masker.mask("The real-secret is here"), "The [REDACTED] is here");
    }

    #[test]
    fn longer_secret_wins_over_its_prefix() {
        let mut masker = OutputMasker::with_mask("***");
        masker.add_secret("abc");
        masker.add_secret("abcdef");

        assert_eq!(masker.mask("token=abcdef"), "token=***");
    }

    #[test]
    fn add_secrets_batch() {
        let mut masker = OutputMasker::new();
        masker.add_secrets(["secret1", "secret2"]);

        let output = masker.mask("secret1 and secret2");
        assert_eq!(output, "[REDACTED] and [REDACTED]");
    }

    #[test]
    fn no_masking_without_secrets() {
        let masker = OutputMasker::default();
        let input = "brew install fd jq";
        assert_eq!(masker.mask(input), input);
    }
}
