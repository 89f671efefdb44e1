//! Report module - document-level metadata

use crate::issuer::Issuer;
use std::collections::BTreeSet;

/// An analyst credited on the report
///
/// Absent person data is an empty string; the analyst is never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analyst {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Job title
    pub job_title: String,
}

/// Report-level metadata, one per document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportMetadata {
    /// Source file name (base name only)
    pub filename: String,

    /// Publication timestamp, verbatim
    pub publication_date: Option<String>,

    /// Primary broker organization name
    pub broker_name: Option<String>,

    /// Analysts in document order
    pub analysts: Vec<Analyst>,

    /// Report title
    pub title: Option<String>,

    /// Product-level asset class
    pub product_asset_class: Option<String>,

    /// Report-type labels (deduplicated)
    pub report_types: BTreeSet<String>,

    /// Event-type labels (deduplicated)
    pub event_types: BTreeSet<String>,
}

impl ReportMetadata {
    /// Create empty metadata for a file
    pub fn for_file(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Analyst names joined for display, e.g. `"Jane Roe, John Doe"`
    pub fn analysts_display(&self) -> String {
        self.analysts
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The result of parsing one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Report-level fields
    pub metadata: ReportMetadata,

    /// Issuers in document order
    pub issuers: Vec<Issuer>,
}

impl ParsedDocument {
    /// Number of rows this document flattens into
    pub fn row_count(&self) -> usize {
        if self.issuers.is_empty() {
            1
        } else {
            self.issuers.iter().map(Issuer::row_count).sum()
        }
    }
}

/// Join a label set for display
pub(crate) fn join_labels(labels: &BTreeSet<String>) -> String {
    labels.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysts_display() {
        let mut meta = ReportMetadata::for_file("a.xml");
        meta.analysts.push(Analyst {
            name: "Jane Roe".to_string(),
            ..Default::default()
        });
        meta.analysts.push(Analyst {
            name: "John Doe".to_string(),
            ..Default::default()
        });
        assert_eq!(meta.analysts_display(), "Jane Roe, John Doe");
    }

    #[test]
    fn test_analysts_display_empty() {
        let meta = ReportMetadata::for_file("a.xml");
        assert_eq!(meta.analysts_display(), "");
    }

    #[test]
    fn test_document_without_issuers_has_one_row() {
        let doc = ParsedDocument {
            metadata: ReportMetadata::for_file("macro.xml"),
            issuers: vec![],
        };
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn test_join_labels_is_sorted() {
        let labels: BTreeSet<String> = ["Morning Note", "Company Update"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(join_labels(&labels), "Company Update, Morning Note");
    }
}
