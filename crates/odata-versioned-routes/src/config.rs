//! Route expansion configuration

use serde::{Deserialize, Serialize};

/// How entity key segments are rendered in route templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UrlKeyDelimiter {
    /// OData parentheses convention: `Orders({id})`,
    /// `Orders(a={a},b={b})` for composite keys.
    #[default]
    Parentheses,
    /// Slash convention: `Orders/{id}`, `Orders/{a}/{b}` for composite
    /// keys.
    Slash,
}

/// Configuration for versioned route expansion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersioningOptions {
    /// Delimiter used when rendering entity key segments
    pub url_key_delimiter: UrlKeyDelimiter,
}

impl VersioningOptions {
    /// Create options with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL key delimiter.
    pub fn url_key_delimiter(mut self, delimiter: UrlKeyDelimiter) -> Self {
        self.url_key_delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiter_is_parentheses() {
        assert_eq!(
            VersioningOptions::new().url_key_delimiter,
            UrlKeyDelimiter::Parentheses
        );
    }

    #[test]
    fn test_builder_overrides_delimiter() {
        let options = VersioningOptions::new().url_key_delimiter(UrlKeyDelimiter::Slash);

        assert_eq!(options.url_key_delimiter, UrlKeyDelimiter::Slash);
    }
}
