//! Rixflat Extractor
//!
//! Turns research markup documents into typed records and flattened rows.
//!
//! # Overview
//!
//! The extractor is responsible for:
//! - **Tree building**: Parsing a document into an owned element tree with
//!   Clark-notation tags (`{uri}Local`)
//! - **Namespace detection**: Reading the root namespace, absent for older
//!   schema revisions
//! - **Path lookup**: Namespace-tolerant element search with bare-name fallback
//! - **Field extraction**: One rule per semantic field, absence is never fatal
//! - **Flattening**: One row per (document, issuer, ticker)
//!
//! # Architecture
//!
//! ```text
//! text ──► xml::parse_tree ──► Element
//!                                │
//!                  namespace::resolve ──► Locator
//!                                │
//!                 DocumentParser::extract (fields::*)
//!                                │
//!                          ParsedDocument ──► flatten ──► Vec<Row>
//! ```
//!
//! # Usage
//!
//! ```
//! use rixflat_extractor::{flatten, DocumentParser};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = DocumentParser::default();
//! let doc = parser.parse(
//!     "note.xml",
//!     r#"<Research><Product><Content><Title>Morning Note</Title></Content></Product></Research>"#,
//! )?;
//!
//! let rows = flatten(&doc);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(doc.metadata.title.as_deref(), Some("Morning Note"));
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [extractor]
//! strict_current = false
//! trim_text = true
//! max_document_bytes = 67108864
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod fields;
mod flatten;
pub mod locator;
pub mod namespace;
mod parser;
pub mod xml;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use fields::Classification;
pub use flatten::{flatten, flatten_all};
pub use locator::Locator;
pub use parser::{display_name, DocumentParser};
pub use xml::{parse_tree, Element};
