//! Ticker module - security identifiers attached to an issuer

use std::fmt;

/// Kind of security identifier carried by a `SecurityID` entry
///
/// Identifier schemes seen in research markup:
/// - ISIN / CUSIP: regulatory identifiers, kept as dedicated columns
/// - Bloomberg / RIC: vendor tickers, preferred for the canonical ticker
/// - PublisherDefined: the broker's own symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdType {
    /// International Securities Identification Number
    Isin,

    /// CUSIP (North American securities)
    Cusip,

    /// Bloomberg ticker
    Bloomberg,

    /// Reuters Instrument Code
    Ric,

    /// Publisher-defined symbol
    PublisherDefined,

    /// Any other scheme, raw attribute value preserved
    Other(String),
}

impl IdType {
    /// Preference order used when choosing the canonical ticker
    pub const TICKER_PREFERENCE: [IdType; 3] =
        [IdType::Bloomberg, IdType::Ric, IdType::PublisherDefined];

    /// Parse an `idType` attribute value (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "isin" => IdType::Isin,
            "cusip" => IdType::Cusip,
            "bloomberg" => IdType::Bloomberg,
            "ric" => IdType::Ric,
            "publisherdefined" => IdType::PublisherDefined,
            _ => IdType::Other(s.trim().to_string()),
        }
    }

    /// Get the identifier type as it appears in the output table
    pub fn as_str(&self) -> &str {
        match self {
            IdType::Isin => "ISIN",
            IdType::Cusip => "CUSIP",
            IdType::Bloomberg => "Bloomberg",
            IdType::Ric => "RIC",
            IdType::PublisherDefined => "PublisherDefined",
            IdType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single security identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    /// Identifier scheme
    pub id_type: IdType,

    /// Identifier value (empty if the entry carried none)
    pub id_value: String,

    /// Trading exchange, if stated
    pub exchange: Option<String>,
}

impl Ticker {
    /// Create a new ticker
    pub fn new(id_type: IdType, id_value: impl Into<String>) -> Self {
        Self {
            id_type,
            id_value: id_value.into(),
            exchange: None,
        }
    }

    /// Set the trading exchange
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }
}
