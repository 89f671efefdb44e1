//! Row module - the flattened output unit

use crate::issuer::Issuer;
use crate::report::{join_labels, ReportMetadata};
use crate::ticker::Ticker;

/// Output column names, in emission order
pub const COLUMNS: [&str; 20] = [
    "filename",
    "publication_date",
    "broker_name",
    "analysts",
    "report_types",
    "event_types",
    "issuer_name",
    "asset_class",
    "ticker_id_type",
    "ticker_id_value",
    "ticker_exchange",
    "isin",
    "cusip",
    "bloomberg",
    "price_target_value",
    "price_target_currency",
    "rating",
    "rating_action",
    "coverage_action",
    "target_price_action",
];

/// One flattened record: report fields, at most one issuer, at most one ticker
///
/// Rows own all of their data; no row shares storage with another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Source file name
    pub filename: String,
    /// Publication timestamp
    pub publication_date: Option<String>,
    /// Broker name
    pub broker_name: Option<String>,
    /// Analyst names joined with ", "
    pub analysts: String,
    /// Report-type labels joined with ", "
    pub report_types: String,
    /// Event-type labels joined with ", "
    pub event_types: String,
    /// Issuer name
    pub issuer_name: Option<String>,
    /// Issuer asset class
    pub asset_class: Option<String>,
    /// Ticker identifier type
    pub ticker_id_type: Option<String>,
    /// Ticker identifier value
    pub ticker_id_value: Option<String>,
    /// Ticker trading exchange
    pub ticker_exchange: Option<String>,
    /// Issuer ISIN
    pub isin: Option<String>,
    /// Issuer CUSIP
    pub cusip: Option<String>,
    /// Issuer canonical ticker (Bloomberg, else RIC, else PublisherDefined)
    pub bloomberg: Option<String>,
    /// Price target value
    pub price_target_value: Option<String>,
    /// Price target currency
    pub price_target_currency: Option<String>,
    /// Rating label
    pub rating: Option<String>,
    /// Rating action
    pub rating_action: Option<String>,
    /// Coverage action
    pub coverage_action: Option<String>,
    /// Target price action
    pub target_price_action: Option<String>,
}

impl Row {
    /// Compose a row from report fields and an optional issuer/ticker pair
    ///
    /// A ticker without an issuer is ignored: ticker columns are only
    /// meaningful within an issuer.
    pub fn compose(
        meta: &ReportMetadata,
        issuer: Option<&Issuer>,
        ticker: Option<&Ticker>,
    ) -> Self {
        let mut row = Row {
            filename: meta.filename.clone(),
            publication_date: meta.publication_date.clone(),
            broker_name: meta.broker_name.clone(),
            analysts: meta.analysts_display(),
            report_types: join_labels(&meta.report_types),
            event_types: join_labels(&meta.event_types),
            ..Default::default()
        };

        let Some(issuer) = issuer else {
            return row;
        };

        row.issuer_name = issuer.name.clone();
        row.asset_class = issuer.asset_class.clone();
        row.isin = issuer.identifiers.isin.clone();
        row.cusip = issuer.identifiers.cusip.clone();
        row.bloomberg = issuer.identifiers.ticker.clone();
        if let Some(pt) = &issuer.price_target {
            row.price_target_value = Some(pt.value.clone());
            row.price_target_currency = pt.currency.clone();
        }
        row.rating = issuer.rating.clone();
        row.rating_action = issuer.rating_action.clone();
        row.coverage_action = issuer.coverage_action.clone();
        row.target_price_action = issuer.target_price_action.clone();

        if let Some(ticker) = ticker {
            row.ticker_id_type = Some(ticker.id_type.to_string());
            row.ticker_id_value = Some(ticker.id_value.clone());
            row.ticker_exchange = ticker.exchange.clone();
        }

        row
    }

    /// Column values in `COLUMNS` order; `None` is a null cell
    pub fn values(&self) -> [Option<&str>; 20] {
        [
            Some(self.filename.as_str()),
            self.publication_date.as_deref(),
            self.broker_name.as_deref(),
            Some(self.analysts.as_str()),
            Some(self.report_types.as_str()),
            Some(self.event_types.as_str()),
            self.issuer_name.as_deref(),
            self.asset_class.as_deref(),
            self.ticker_id_type.as_deref(),
            self.ticker_id_value.as_deref(),
            self.ticker_exchange.as_deref(),
            self.isin.as_deref(),
            self.cusip.as_deref(),
            self.bloomberg.as_deref(),
            self.price_target_value.as_deref(),
            self.price_target_currency.as_deref(),
            self.rating.as_deref(),
            self.rating_action.as_deref(),
            self.coverage_action.as_deref(),
            self.target_price_action.as_deref(),
        ]
    }

    /// Whether every issuer-level column is null
    pub fn has_no_issuer(&self) -> bool {
        self.issuer_name.is_none()
            && self.asset_class.is_none()
            && self.isin.is_none()
            && self.cusip.is_none()
            && self.bloomberg.is_none()
            && self.price_target_value.is_none()
            && self.rating.is_none()
            && !self.has_ticker()
    }

    /// Whether the ticker columns are populated
    pub fn has_ticker(&self) -> bool {
        self.ticker_id_type.is_some()
    }
}
