//! Metrics collection for batch runs

use std::collections::BTreeMap;

/// Metrics collected during one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchMetrics {
    /// Files that passed the extension filter
    pub files_discovered: usize,

    /// Files parsed successfully
    pub files_parsed: usize,

    /// Files excluded because of a read or parse failure
    pub files_failed: usize,

    /// Failures per kind ("structural", "io", ...)
    pub failures_by_kind: BTreeMap<String, usize>,

    /// Issuer records across all parsed documents
    pub issuers_extracted: usize,

    /// Rows emitted
    pub rows_emitted: usize,

    /// Wall-clock runtime in milliseconds
    pub elapsed_ms: u128,
}

impl BatchMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully parsed document
    pub fn record_parsed(&mut self, issuers: usize, rows: usize) {
        self.files_parsed += 1;
        self.issuers_extracted += issuers;
        self.rows_emitted += rows;
    }

    /// Record an excluded document
    pub fn record_failure(&mut self, kind: &str) {
        self.files_failed += 1;
        *self.failures_by_kind.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Whether every discovered file was parsed
    pub fn is_clean(&self) -> bool {
        self.files_failed == 0
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Batch Summary".to_string(),
            "=============".to_string(),
            format!("Files discovered: {}", self.files_discovered),
            format!("Files parsed: {}", self.files_parsed),
            format!("Files failed: {}", self.files_failed),
            format!("Issuers: {}", self.issuers_extracted),
            format!("Rows: {}", self.rows_emitted),
            format!("Elapsed: {}ms", self.elapsed_ms),
        ];

        if !self.failures_by_kind.is_empty() {
            lines.push(String::new());
            lines.push("Failures by kind:".to_string());
            for (kind, count) in &self.failures_by_kind {
                lines.push(format!("  {}: {}", kind, count));
            }
        }

        lines.join("\n")
    }
}
