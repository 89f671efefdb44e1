//! Document Parser: one markup document into metadata plus issuers

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fields;
use crate::locator::Locator;
use crate::xml::{self, Element};
use rixflat_domain::{Issuer, ParsedDocument, ReportMetadata};
use std::path::Path;
use tracing::debug;

/// Parses research documents into typed records
///
/// Only unreadable or malformed input is an error. Missing Product, Source,
/// Context or IssuerDetails structure yields empty fields.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    config: ExtractorConfig,
}

impl DocumentParser {
    /// Create a new parser
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create a parser after validating its configuration
    pub fn try_new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self::new(config))
    }

    /// Parse raw document text
    ///
    /// # Errors
    ///
    /// `ExtractorError::DocumentTooLarge` if the text exceeds the configured
    /// limit, `ExtractorError::Structural` if it is not well-formed markup.
    pub fn parse(&self, filename: &str, text: &str) -> Result<ParsedDocument, ExtractorError> {
        if text.len() > self.config.max_document_bytes {
            return Err(ExtractorError::DocumentTooLarge(
                text.len(),
                self.config.max_document_bytes,
            ));
        }

        let root = xml::parse_tree(text, self.config.trim_text)?;
        let doc = self.extract(filename, &root);

        debug!(
            "Parsed {}: {} issuer(s), {} analyst(s)",
            filename,
            doc.issuers.len(),
            doc.metadata.analysts.len()
        );
        Ok(doc)
    }

    /// Read and parse a document from disk
    pub fn parse_file(&self, path: &Path) -> Result<ParsedDocument, ExtractorError> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        self.parse(&display_name(path), &text)
    }

    /// Extract fields from an already-parsed tree
    pub fn extract(&self, filename: &str, root: &Element) -> ParsedDocument {
        let loc = Locator::for_root(root);
        let product = loc.find_first(root, ".//Product").unwrap_or(root);

        ParsedDocument {
            metadata: self.metadata(&loc, filename, product),
            issuers: self.issuers(&loc, root),
        }
    }

    fn metadata(&self, loc: &Locator, filename: &str, product: &Element) -> ReportMetadata {
        let mut meta = ReportMetadata::for_file(filename);
        meta.publication_date = fields::publication_date(loc, product);
        meta.title = fields::title(loc, product);
        meta.product_asset_class = fields::product_asset_class(loc, product);

        let organization = fields::primary_organization(loc, product);
        meta.broker_name = organization.and_then(|org| fields::broker_name(loc, org));
        if let Some(scope) = organization.or_else(|| loc.find_first(product, ".//Source")) {
            meta.analysts = fields::analysts(loc, scope);
        }

        let classification = fields::classification(loc, product);
        meta.report_types = classification.report_types;
        meta.event_types = classification.event_types;
        meta
    }

    /// One `Issuer` per (Issuer, Security) pair; an Issuer without any
    /// Security still yields one record.
    fn issuers(&self, loc: &Locator, root: &Element) -> Vec<Issuer> {
        let Some(context) = loc.find_first(root, ".//Context") else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for issuer in loc.find_all(context, ".//Issuer") {
            let securities = loc.find_all(issuer, ".//SecurityDetails/Security");
            if securities.is_empty() {
                out.push(self.issuer_record(loc, issuer, None));
            } else {
                out.extend(
                    securities
                        .into_iter()
                        .map(|security| self.issuer_record(loc, issuer, Some(security))),
                );
            }
        }
        out
    }

    fn issuer_record(&self, loc: &Locator, issuer: &Element, security: Option<&Element>) -> Issuer {
        let scope = security.unwrap_or(issuer);
        let strict = self.config.strict_current;

        let tickers = security.map(|s| fields::tickers(loc, s)).unwrap_or_default();
        let identifiers = fields::select_identifiers(&tickers);
        let target_entry = security.and_then(|s| fields::target_price_entry(loc, s, strict));
        let rating_entry = security.and_then(|s| fields::rating_entry(loc, s, strict));

        Issuer {
            name: fields::issuer_name(loc, issuer),
            asset_class: fields::asset_class(loc, scope)
                .or_else(|| fields::asset_class(loc, issuer)),
            tickers,
            identifiers,
            price_target: target_entry.and_then(|e| fields::price_target(loc, e)),
            rating: rating_entry.and_then(|e| fields::rating(loc, e)),
            rating_action: rating_entry
                .and_then(|e| e.attr_nonempty("ratingAction"))
                .map(str::to_string),
            coverage_action: fields::coverage_action(issuer, security),
            target_price_action: target_entry
                .and_then(|e| e.attr_nonempty("targetPriceAction"))
                .map(str::to_string),
        }
    }
}

/// Base name of a path for the `filename` column
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
