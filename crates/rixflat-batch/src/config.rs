//! Configuration for batch runs
//!
//! Defines the file filter, worker pool size and per-document parsing options.

use rixflat_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the Batch Runner
///
/// # Examples
///
/// ```
/// use rixflat_batch::BatchConfig;
///
/// // Default: every `.xml` file, one worker per available core
/// let config = BatchConfig::default();
/// assert_eq!(config.extension, "xml");
/// assert_eq!(config.max_workers, 0);
///
/// // Sequential: one file at a time
/// let config = BatchConfig::sequential();
/// assert_eq!(config.worker_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extension to accept, without the dot, compared case-insensitively
    /// Default: "xml"
    pub extension: String,

    /// Maximum number of documents parsed concurrently
    /// Default: 0 (use available parallelism)
    pub max_workers: usize,

    /// Per-document parsing options
    pub extractor: ExtractorConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extension: "xml".to_string(),
            max_workers: 0,
            extractor: ExtractorConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Sequential configuration: a single worker
    ///
    /// Useful when debugging a directory file by file.
    pub fn sequential() -> Self {
        Self {
            max_workers: 1,
            ..Self::default()
        }
    }

    /// Strict configuration: only current price targets and ratings
    pub fn strict() -> Self {
        Self {
            extractor: ExtractorConfig::strict(),
            ..Self::default()
        }
    }

    /// Effective worker count
    pub fn worker_count(&self) -> usize {
        if self.max_workers > 0 {
            return self.max_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    /// Extension with any leading dot removed
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim().trim_start_matches('.')
    }

    /// Whether a file name passes the extension filter
    pub fn accepts(&self, file_name: &str) -> bool {
        let wanted = self.normalized_extension();
        match file_name.rsplit_once('.') {
            Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case(wanted),
            None => false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let ext = self.normalized_extension();
        if ext.is_empty() {
            return Err("extension must not be empty".to_string());
        }
        if ext.contains(['/', '\\']) {
            return Err(format!("extension '{}' must not contain path separators", ext));
        }
        self.extractor.validate()
    }
}
