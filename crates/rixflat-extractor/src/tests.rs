//! End-to-end extraction tests over complete documents

use crate::{flatten, DocumentParser, ExtractorConfig};
use rixflat_domain::Row;

const RIXML_NS: &str = "http://www.rixml.org/2005/3/RIXML";

fn research(root_attrs: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Research {root_attrs} researchID="R-1">
  <Product productID="P-1">
    <StatusInfo currentStatusIndicator="Yes"/>
    <Source>
      <Organization type="SellSideFirm" primaryIndicator="No">
        <OrganizationName>Distribution Partner</OrganizationName>
      </Organization>
      <Organization type="SellSideFirm" primaryIndicator="Yes">
        <OrganizationName>Example Securities</OrganizationName>
        <PersonGroup>
          <PersonGroupMember primaryIndicator="Yes">
            <Person>
              <DisplayName>Jane Roe</DisplayName>
              <JobTitle>Senior Analyst</JobTitle>
              <ContactInfo><Email>jane.roe@example.com</Email></ContactInfo>
            </Person>
          </PersonGroupMember>
          <PersonGroupMember>
            <Person><DisplayName>John Doe</DisplayName></Person>
          </PersonGroupMember>
        </PersonGroup>
      </Organization>
    </Source>
    <Content>
      <Title>Apple: Services momentum &amp; margin upside</Title>
    </Content>
    <ProductDetails publicationDateTime="2024-06-27T08:00:00Z"/>
    <Context>
      <IssuerDetails>
        <Issuer issuerType="Corporate" coverageAction="Initiation">
          <IssuerName><NameValue>Apple Inc</NameValue></IssuerName>
          <SecurityDetails>
            <Security>
              <SecurityID idType="ISIN" idValue="US0378331005"/>
              <SecurityID idType="Bloomberg" idValue="AAPL US" tradingExchange="NASDAQ"/>
              <AssetClass assetClass="Equity"/>
              <SecurityFinancials securityFinancialsType="TargetPrice" priorCurrent="Prior">
                <FinancialValue currency="USD">180</FinancialValue>
              </SecurityFinancials>
              <SecurityFinancials securityFinancialsType="TargetPrice" priorCurrent="Current" targetPriceAction="Increase">
                <FinancialValue currency="USD">210</FinancialValue>
              </SecurityFinancials>
              <Rating priorCurrent="Prior" rating="Hold"/>
              <Rating priorCurrent="Current" ratingAction="Upgrade">
                <PublisherDefinedValue>Buy</PublisherDefinedValue>
              </Rating>
            </Security>
          </SecurityDetails>
        </Issuer>
        <Issuer issuerType="Sector">
          <IssuerName><NameValue>US Technology</NameValue></IssuerName>
        </Issuer>
      </IssuerDetails>
      <ProductClassifications>
        <AssetClasses><AssetClass assetClass="Equity"/></AssetClasses>
        <Subjects>
          <Subject publisherDefinedValue="Earnings Event"/>
          <Subject publisherDefinedValue="Company Update"/>
          <Subject publisherDefinedValue="Company Update"/>
        </Subjects>
        <Discipline disciplineType="Fundamental"/>
      </ProductClassifications>
    </Context>
  </Product>
</Research>"#
    )
}

fn rows(config: ExtractorConfig, text: &str) -> Vec<Row> {
    let doc = DocumentParser::new(config).parse("apple.xml", text).unwrap();
    flatten(&doc)
}

#[test]
fn test_full_document_metadata() {
    let doc = DocumentParser::default()
        .parse("apple.xml", &research(""))
        .unwrap();
    let meta = &doc.metadata;

    assert_eq!(meta.filename, "apple.xml");
    assert_eq!(meta.publication_date.as_deref(), Some("2024-06-27T08:00:00Z"));
    assert_eq!(meta.broker_name.as_deref(), Some("Example Securities"));
    assert_eq!(
        meta.title.as_deref(),
        Some("Apple: Services momentum & margin upside")
    );
    assert_eq!(meta.product_asset_class.as_deref(), Some("Equity"));
    assert_eq!(meta.analysts_display(), "Jane Roe, John Doe");
    assert_eq!(meta.analysts[0].email, "jane.roe@example.com");
    assert_eq!(meta.analysts[0].job_title, "Senior Analyst");
    assert_eq!(meta.analysts[1].email, "");
    assert_eq!(meta.report_types.len(), 2);
    assert_eq!(meta.event_types.len(), 1);
}

#[test]
fn test_full_document_rows() {
    let rows = rows(ExtractorConfig::default(), &research(""));
    assert_eq!(rows.len(), 3);

    let isin_row = &rows[0];
    assert_eq!(isin_row.issuer_name.as_deref(), Some("Apple Inc"));
    assert_eq!(isin_row.ticker_id_type.as_deref(), Some("ISIN"));
    assert_eq!(isin_row.ticker_id_value.as_deref(), Some("US0378331005"));
    assert_eq!(isin_row.isin.as_deref(), Some("US0378331005"));
    assert_eq!(isin_row.bloomberg.as_deref(), Some("AAPL US"));
    assert_eq!(isin_row.asset_class.as_deref(), Some("Equity"));
    assert_eq!(isin_row.coverage_action.as_deref(), Some("Initiation"));
    assert_eq!(isin_row.report_types, "Company Update, Fundamental");
    assert_eq!(isin_row.event_types, "Earnings Event");

    let bbg_row = &rows[1];
    assert_eq!(bbg_row.ticker_id_type.as_deref(), Some("Bloomberg"));
    assert_eq!(bbg_row.ticker_exchange.as_deref(), Some("NASDAQ"));
    assert_eq!(bbg_row.isin, isin_row.isin);
    assert_eq!(bbg_row.bloomberg, isin_row.bloomberg);

    let sector_row = &rows[2];
    assert_eq!(sector_row.issuer_name.as_deref(), Some("US Technology"));
    assert!(!sector_row.has_ticker());
    assert!(sector_row.isin.is_none());
    assert!(sector_row.price_target_value.is_none());
    assert!(sector_row.rating.is_none());
    assert_eq!(sector_row.broker_name.as_deref(), Some("Example Securities"));
}

#[test]
fn test_namespaced_and_bare_documents_agree() {
    let bare = rows(ExtractorConfig::default(), &research(""));
    let namespaced = rows(
        ExtractorConfig::default(),
        &research(&format!(r#"xmlns="{RIXML_NS}""#)),
    );
    assert_eq!(bare, namespaced);
}

#[test]
fn test_prefixed_namespace_document() {
    let text = format!(
        r#"<rx:Research xmlns:rx="{RIXML_NS}">
             <rx:Product><rx:Content><rx:Title>Prefixed</rx:Title></rx:Content></rx:Product>
           </rx:Research>"#
    );
    let doc = DocumentParser::default().parse("p.xml", &text).unwrap();
    assert_eq!(doc.metadata.title.as_deref(), Some("Prefixed"));
}

#[test]
fn test_lenient_mode_takes_first_entries() {
    let rows = rows(ExtractorConfig::default(), &research(""));
    let row = &rows[0];
    assert_eq!(row.price_target_value.as_deref(), Some("180"));
    assert_eq!(row.price_target_currency.as_deref(), Some("USD"));
    assert_eq!(row.rating.as_deref(), Some("Hold"));
    assert!(row.rating_action.is_none());
    assert!(row.target_price_action.is_none());
}

#[test]
fn test_strict_mode_takes_current_entries() {
    let rows = rows(ExtractorConfig::strict(), &research(""));
    let row = &rows[0];
    assert_eq!(row.price_target_value.as_deref(), Some("210"));
    assert_eq!(row.rating.as_deref(), Some("Buy"));
    assert_eq!(row.rating_action.as_deref(), Some("Upgrade"));
    assert_eq!(row.target_price_action.as_deref(), Some("Increase"));
}

#[test]
fn test_document_without_context_is_one_row() {
    let text = r#"<Research><Product>
                    <Source><Organization><OrganizationName>Solo</OrganizationName></Organization></Source>
                  </Product></Research>"#;
    let rows = rows(ExtractorConfig::default(), text);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].has_no_issuer());
    assert_eq!(rows[0].broker_name.as_deref(), Some("Solo"));
    assert_eq!(rows[0].analysts, "");
}

#[test]
fn test_empty_root_is_one_blank_row() {
    let rows = rows(ExtractorConfig::default(), "<Research/>");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].filename, "apple.xml");
    assert!(rows[0].publication_date.is_none());
    assert!(rows[0].broker_name.is_none());
    assert!(rows[0].analysts.is_empty());
}

#[test]
fn test_malformed_document_is_structural() {
    let err = DocumentParser::default()
        .parse("bad.xml", "<Research><Product></Research>")
        .unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_text_rather_than_attributes() {
    let text = r#"<Research><Context><IssuerDetails><Issuer>
                    <IssuerName><NameValue>Text Corp</NameValue></IssuerName>
                    <SecurityDetails><Security>
                      <SecurityID idType="RIC">TXT.N<TradingExchange>NYSE</TradingExchange></SecurityID>
                    </Security></SecurityDetails>
                  </Issuer></IssuerDetails></Context></Research>"#;
    let rows = rows(ExtractorConfig::default(), text);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ticker_id_value.as_deref(), Some("TXT.N"));
    assert_eq!(rows[0].ticker_exchange.as_deref(), Some("NYSE"));
    assert_eq!(rows[0].bloomberg.as_deref(), Some("TXT.N"));
}

#[test]
fn test_internal_dtd_entities_are_expanded() {
    let text = r#"<!DOCTYPE Research [<!ENTITY co "Acme">]>
<Research><Product>
  <Source><Organization><OrganizationName>&co; Securities</OrganizationName></Organization></Source>
  <Content><Title>&co; note</Title></Content>
</Product></Research>"#;
    let doc = DocumentParser::default().parse("dtd.xml", text).unwrap();
    assert_eq!(doc.metadata.title.as_deref(), Some("Acme note"));
    assert_eq!(doc.metadata.broker_name.as_deref(), Some("Acme Securities"));
}

#[test]
fn test_untrimmed_tree_still_yields_trimmed_values() {
    let config = ExtractorConfig {
        trim_text: false,
        ..Default::default()
    };
    let trimmed = rows(ExtractorConfig::default(), &research(""));
    let untrimmed = rows(config, &research(""));
    assert_eq!(trimmed, untrimmed);

    let text = "<Research><Context><IssuerDetails><Issuer>\n  <IssuerName><NameValue>\n  Acme\n</NameValue></IssuerName>\n</Issuer></IssuerDetails></Context></Research>";
    let rows = rows(
        ExtractorConfig {
            trim_text: false,
            ..Default::default()
        },
        text,
    );
    assert_eq!(rows[0].issuer_name.as_deref(), Some("Acme"));
}
