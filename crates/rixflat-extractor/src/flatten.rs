//! Flattener: one document into independent output rows

use rixflat_domain::{ParsedDocument, Row};

/// Flatten a parsed document
///
/// - no issuers → one report-only row
/// - an issuer without tickers → one row with null ticker columns
/// - an issuer with N tickers → N rows, one per ticker
///
/// Rows follow issuer order, then ticker order.
pub fn flatten(doc: &ParsedDocument) -> Vec<Row> {
    let meta = &doc.metadata;
    if doc.issuers.is_empty() {
        return vec![Row::compose(meta, None, None)];
    }

    let mut rows = Vec::with_capacity(doc.row_count());
    for issuer in &doc.issuers {
        if issuer.tickers.is_empty() {
            rows.push(Row::compose(meta, Some(issuer), None));
        } else {
            rows.extend(
                issuer
                    .tickers
                    .iter()
                    .map(|ticker| Row::compose(meta, Some(issuer), Some(ticker))),
            );
        }
    }
    rows
}

/// Flatten several documents, preserving their order
pub fn flatten_all<'a, I>(docs: I) -> Vec<Row>
where
    I: IntoIterator<Item = &'a ParsedDocument>,
{
    docs.into_iter().flat_map(flatten).collect()
}
