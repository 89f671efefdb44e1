//! Issuer module - the companies a report covers

use crate::ticker::Ticker;

/// Price target stated for a security
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTarget {
    /// Target value, verbatim from the document
    pub value: String,

    /// ISO currency code, if stated
    pub currency: Option<String>,
}

/// Identifier columns derived from an issuer's tickers
///
/// `ticker` is the canonical ticker picked by `IdType::TICKER_PREFERENCE`;
/// `isin` and `cusip` are retained whatever the canonical choice was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityIdentifiers {
    /// Canonical ticker value (Bloomberg, else RIC, else PublisherDefined)
    pub ticker: Option<String>,

    /// ISIN value
    pub isin: Option<String>,

    /// CUSIP value
    pub cusip: Option<String>,
}

/// An issuer referenced by a report, scoped to one of its securities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issuer {
    /// Issuer display name
    pub name: Option<String>,

    /// Asset class of the security (e.g. "Equity")
    pub asset_class: Option<String>,

    /// Identifiers in document order
    pub tickers: Vec<Ticker>,

    /// Dedicated identifier columns
    pub identifiers: SecurityIdentifiers,

    /// Price target, if any
    pub price_target: Option<PriceTarget>,

    /// Rating label
    pub rating: Option<String>,

    /// Rating action (e.g. "Upgrade")
    pub rating_action: Option<String>,

    /// Coverage action (e.g. "Initiation")
    pub coverage_action: Option<String>,

    /// Target price action (e.g. "Increase")
    pub target_price_action: Option<String>,
}

impl Issuer {
    /// Create an issuer with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Number of flattened rows this issuer produces
    pub fn row_count(&self) -> usize {
        self.tickers.len().max(1)
    }
}
