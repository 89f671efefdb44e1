//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for document parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Only accept price targets and ratings flagged `priorCurrent="Current"`
    ///
    /// When false, the first TargetPrice / Rating entry is taken regardless
    /// of its currentness flag.
    pub strict_current: bool,

    /// Trim surrounding whitespace from text nodes in the element tree
    ///
    /// Extracted field values are trimmed either way; this only changes the
    /// raw `Element::text` of the parsed tree.
    pub trim_text: bool,

    /// Maximum input document size (bytes)
    pub max_document_bytes: usize,
}

impl Default for ExtractorConfig {
    /// Lenient currentness, trimmed text, 64 MiB document limit
    fn default() -> Self {
        Self {
            strict_current: false,
            trim_text: true,
            max_document_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: only current price targets and ratings
    pub fn strict() -> Self {
        Self {
            strict_current: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.strict_current);
        assert!(config.trim_text);
    }

    #[test]
    fn test_strict_preset() {
        let config = ExtractorConfig::strict();
        assert!(config.strict_current);
        assert_eq!(config.max_document_bytes, ExtractorConfig::default().max_document_bytes);
    }

    #[test]
    fn test_invalid_document_limit() {
        let config = ExtractorConfig {
            max_document_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ExtractorConfig = toml::from_str("strict_current = true").unwrap();
        assert!(config.strict_current);
        assert!(config.trim_text);
        assert_eq!(config.max_document_bytes, 64 * 1024 * 1024);
    }
}
