//! Field extractors, one rule per semantic field
//!
//! Each extractor takes the document's `Locator` and a scoped element
//! (document root, Product, Source, Issuer or Security) and returns a typed
//! optional value. Absence is never an error. Text and attribute values
//! come back trimmed whatever the tree's `trim_text` setting.

use crate::locator::Locator;
use crate::xml::Element;
use rixflat_domain::{Analyst, IdType, PriceTarget, SecurityIdentifiers, Ticker};
use std::collections::BTreeSet;

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::trim).map(str::to_string)
}

/// Whether an entry carries `priorCurrent="Current"`
pub fn is_current(element: &Element) -> bool {
    element
        .attr("priorCurrent")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("current"))
}

// ── Report level ──────────────────────────────────────────────────────────────

/// Publication timestamp from ProductDetails, verbatim
pub fn publication_date(loc: &Locator, product: &Element) -> Option<String> {
    owned(loc.find_attr(product, ".//ProductDetails", "publicationDateTime"))
}

/// Report title
pub fn title(loc: &Locator, product: &Element) -> Option<String> {
    owned(
        loc.find_first_of(product, &["Content/Title", ".//Content/Title", ".//Title"])
            .and_then(Element::text),
    )
}

/// The publishing organization: the primary one, else the first listed
pub fn primary_organization<'a>(loc: &Locator, product: &'a Element) -> Option<&'a Element> {
    loc.find_first_of(
        product,
        &[
            ".//Source/Organization[@primaryIndicator='Yes']",
            ".//Source/Organization",
        ],
    )
}

/// Broker name of an organization
pub fn broker_name(loc: &Locator, organization: &Element) -> Option<String> {
    owned(loc.find_text(organization, "OrganizationName"))
}

/// Analysts under a Source or Organization scope
///
/// Walks PersonGroup → PersonGroupMember → Person. Each person yields one
/// analyst; missing name, title or email become empty strings.
pub fn analysts(loc: &Locator, scope: &Element) -> Vec<Analyst> {
    loc.find_all(scope, ".//PersonGroupMember")
        .into_iter()
        .filter_map(|member| loc.find_first(member, "Person"))
        .map(|person| Analyst {
            name: loc.find_text(person, "DisplayName").unwrap_or_default().to_string(),
            email: loc
                .find_text(person, "ContactInfo/Email")
                .unwrap_or_default()
                .to_string(),
            job_title: loc.find_text(person, "JobTitle").unwrap_or_default().to_string(),
        })
        .collect()
}

/// Asset class (`AssetClass/@assetClass`) anywhere under `scope`
pub fn asset_class(loc: &Locator, scope: &Element) -> Option<String> {
    owned(loc.find_attr(scope, ".//AssetClass", "assetClass"))
}

/// Report-level asset class from ProductClassifications
///
/// Issuer securities also carry AssetClass, so the search stays inside the
/// classification block.
pub fn product_asset_class(loc: &Locator, product: &Element) -> Option<String> {
    owned(loc.find_attr(product, ".//ProductClassifications//AssetClass", "assetClass"))
}

/// Report-type and event-type label sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Report-type labels
    pub report_types: BTreeSet<String>,
    /// Event-type labels
    pub event_types: BTreeSet<String>,
}

/// Classify ProductClassifications into report and event types
///
/// A Subject label containing "event" (any case) is an event type, any
/// other Subject label is a report type. Discipline types are always report
/// types. Duplicates collapse.
pub fn classification(loc: &Locator, product: &Element) -> Classification {
    let mut out = Classification::default();
    let Some(classifications) = loc.find_first(product, ".//ProductClassifications") else {
        return out;
    };

    for subject in loc.find_all(classifications, ".//Subject") {
        let label = subject
            .attr_nonempty("publisherDefinedValue")
            .or_else(|| subject.text())
            .map(str::trim);
        let Some(label) = label.filter(|l| !l.is_empty()) else {
            continue;
        };
        if label.to_lowercase().contains("event") {
            out.event_types.insert(label.to_string());
        } else {
            out.report_types.insert(label.to_string());
        }
    }

    for discipline in loc.find_all(classifications, ".//Discipline") {
        if let Some(kind) = discipline.attr_nonempty("disciplineType") {
            out.report_types.insert(kind.trim().to_string());
        }
    }

    out
}

// ── Issuer / security level ───────────────────────────────────────────────────

/// Issuer display name
pub fn issuer_name(loc: &Locator, issuer: &Element) -> Option<String> {
    owned(
        loc.find_first_of(issuer, &["IssuerName/NameValue", ".//NameValue"])
            .and_then(Element::text),
    )
}

/// All SecurityID entries under a Security, in document order
pub fn tickers(loc: &Locator, security: &Element) -> Vec<Ticker> {
    loc.find_all(security, ".//SecurityID")
        .into_iter()
        .map(|sid| {
            let id_type = IdType::parse(sid.attr("idType").unwrap_or_default());
            let id_value = sid
                .attr("idValue")
                .or_else(|| sid.text())
                .unwrap_or_default()
                .trim();
            let exchange = loc
                .find_text(sid, "TradingExchange")
                .or_else(|| sid.attr_nonempty("tradingExchange"));
            Ticker {
                id_type,
                id_value: id_value.to_string(),
                exchange: owned(exchange),
            }
        })
        .collect()
}

/// Derive the dedicated identifier columns from a ticker list
///
/// The canonical ticker is the first non-empty value of the first type in
/// `IdType::TICKER_PREFERENCE` that is present. ISIN and CUSIP are kept
/// independently of that choice.
pub fn select_identifiers(tickers: &[Ticker]) -> SecurityIdentifiers {
    let first_of = |kind: &IdType| {
        tickers
            .iter()
            .find(|t| &t.id_type == kind && !t.id_value.is_empty())
            .map(|t| t.id_value.clone())
    };

    SecurityIdentifiers {
        ticker: IdType::TICKER_PREFERENCE.iter().find_map(first_of),
        isin: first_of(&IdType::Isin),
        cusip: first_of(&IdType::Cusip),
    }
}

/// The TargetPrice SecurityFinancials entry to report
///
/// With `strict_current`, entries not flagged Current are skipped.
pub fn target_price_entry<'a>(
    loc: &Locator,
    security: &'a Element,
    strict_current: bool,
) -> Option<&'a Element> {
    loc.find_all(security, ".//SecurityFinancials")
        .into_iter()
        .filter(|f| f.attr("securityFinancialsType") == Some("TargetPrice"))
        .find(|f| !strict_current || is_current(f))
}

/// Value and currency of a TargetPrice entry
pub fn price_target(loc: &Locator, entry: &Element) -> Option<PriceTarget> {
    let value_node = loc.find_first(entry, "FinancialValue");
    let value = value_node.and_then(Element::text)?.trim();
    let currency = loc
        .find_text(entry, "Currency")
        .or_else(|| value_node.and_then(|v| v.attr_nonempty("currency")))
        .or_else(|| entry.attr_nonempty("currency"))
        .map(str::trim);

    Some(PriceTarget {
        value: value.to_string(),
        currency: owned(currency),
    })
}

/// The Rating entry to report
///
/// With `strict_current`, entries not flagged Current are skipped.
pub fn rating_entry<'a>(
    loc: &Locator,
    security: &'a Element,
    strict_current: bool,
) -> Option<&'a Element> {
    loc.find_all(security, ".//Rating")
        .into_iter()
        .find(|r| !strict_current || is_current(r))
}

/// Rating label: PublisherDefinedValue text, else the `rating` attribute
pub fn rating(loc: &Locator, entry: &Element) -> Option<String> {
    owned(
        loc.find_text(entry, "PublisherDefinedValue")
            .or_else(|| entry.attr_nonempty("rating"))
            .map(str::trim),
    )
}

/// Coverage action declared on the Security, else on the Issuer
pub fn coverage_action(issuer: &Element, security: Option<&Element>) -> Option<String> {
    owned(
        security
            .and_then(|s| s.attr_nonempty("coverageAction"))
            .or_else(|| issuer.attr_nonempty("coverageAction")),
    )
}
