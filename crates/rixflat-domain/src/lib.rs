//! rixflat Domain Layer
//!
//! Typed records produced by the research-report extractor. This crate has
//! no external dependencies and performs no I/O: it only defines what a
//! parsed document looks like and how it projects onto the flat output row.
//!
//! ## Key Concepts
//!
//! - **ReportMetadata**: report-level fields, one per document
//! - **Issuer**: a company the report covers, with its security identifiers
//! - **Ticker**: one security identifier (ISIN, CUSIP, Bloomberg, RIC, ...)
//! - **Row**: the flattened output unit with a fixed column schema
//!
//! ## Architecture
//!
//! ```text
//! ReportMetadata ─┬─ Analyst*
//!                 └─ Issuer* ── Ticker*
//!                        │
//!                        ▼
//!                       Row*   (see `row::COLUMNS`)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod issuer;
pub mod report;
pub mod row;
pub mod ticker;

// Re-exports for convenience
pub use issuer::{Issuer, PriceTarget, SecurityIdentifiers};
pub use report::{Analyst, ParsedDocument, ReportMetadata};
pub use row::{Row, COLUMNS};
pub use ticker::{IdType, Ticker};
