//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::{Color, Colorize};
use rixflat_batch::BatchReport;
use rixflat_domain::{Issuer, ParsedDocument, Row, COLUMNS};
use serde_json::{json, Map, Value};
use std::io::Write;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Columns shown by the terminal table, as indices into `COLUMNS`
const TABLE_COLUMNS: [usize; 9] = [0, 2, 6, 8, 9, 13, 14, 15, 16];

/// Write rows as CSV with a header row; absent values are empty cells.
pub fn write_csv<W: Write>(writer: W, rows: &[Row]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(COLUMNS)?;
    for row in rows {
        out.write_record(row.values().iter().map(|v| v.unwrap_or("")))?;
    }
    out.flush()?;
    Ok(())
}

/// One row as a JSON object keyed by column name; absent values are `null`.
pub fn row_to_json(row: &Row) -> Value {
    let mut object = Map::new();
    for (column, value) in COLUMNS.iter().zip(row.values()) {
        let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
        object.insert((*column).to_string(), value);
    }
    Value::Object(object)
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format rows output.
    pub fn format_rows(&self, rows: &[Row]) -> Result<String> {
        match self.format {
            OutputFormat::Csv => {
                let mut buffer = Vec::new();
                write_csv(&mut buffer, rows)?;
                Ok(String::from_utf8_lossy(&buffer).into_owned())
            }
            OutputFormat::Json => {
                let values: Vec<Value> = rows.iter().map(row_to_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => Ok(self.format_rows_table(rows)),
            OutputFormat::Quiet => Ok(String::new()),
        }
    }

    fn format_rows_table(&self, rows: &[Row]) -> String {
        if rows.is_empty() {
            return self.paint("No rows.", Color::Yellow);
        }

        let mut builder = Builder::default();
        builder.push_record(TABLE_COLUMNS.iter().map(|&i| COLUMNS[i]));
        for row in rows {
            let values = row.values();
            builder.push_record(TABLE_COLUMNS.iter().map(|&i| values[i].unwrap_or("-")));
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a single parsed document.
    pub fn format_document(&self, doc: &ParsedDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&document_to_json(doc))?),
            OutputFormat::Quiet => Ok(format!(
                "{}: {} issuer(s), {} row(s)",
                doc.metadata.filename,
                doc.issuers.len(),
                doc.row_count()
            )),
            OutputFormat::Csv => {
                let mut buffer = Vec::new();
                write_csv(&mut buffer, &rixflat_extractor::flatten(doc))?;
                Ok(String::from_utf8_lossy(&buffer).into_owned())
            }
            OutputFormat::Table => Ok(self.format_document_text(doc)),
        }
    }

    fn format_document_text(&self, doc: &ParsedDocument) -> String {
        let meta = &doc.metadata;
        let field = |v: Option<&str>| v.unwrap_or("-").to_string();
        let labels = |set: &std::collections::BTreeSet<String>| {
            if set.is_empty() {
                "-".to_string()
            } else {
                set.iter().cloned().collect::<Vec<_>>().join(", ")
            }
        };

        let mut lines = vec![
            self.paint(&meta.filename, Color::Cyan),
            format!("  Title:        {}", field(meta.title.as_deref())),
            format!("  Published:    {}", field(meta.publication_date.as_deref())),
            format!("  Broker:       {}", field(meta.broker_name.as_deref())),
            format!("  Asset class:  {}", field(meta.product_asset_class.as_deref())),
            format!("  Report types: {}", labels(&meta.report_types)),
            format!("  Event types:  {}", labels(&meta.event_types)),
        ];

        if meta.analysts.is_empty() {
            lines.push("  Analysts:     -".to_string());
        } else {
            lines.push("  Analysts:".to_string());
            for analyst in &meta.analysts {
                let mut detail = Vec::new();
                if !analyst.job_title.is_empty() {
                    detail.push(analyst.job_title.as_str());
                }
                if !analyst.email.is_empty() {
                    detail.push(analyst.email.as_str());
                }
                if detail.is_empty() {
                    lines.push(format!("    {}", analyst.name));
                } else {
                    lines.push(format!("    {} ({})", analyst.name, detail.join(", ")));
                }
            }
        }

        lines.push(String::new());
        lines.push(self.issuers_table(&doc.issuers));
        lines.join("\n")
    }

    fn issuers_table(&self, issuers: &[Issuer]) -> String {
        if issuers.is_empty() {
            return self.paint("No issuers.", Color::Yellow);
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Issuer",
            "Asset Class",
            "Tickers",
            "ISIN",
            "CUSIP",
            "Ticker",
            "Target",
            "Rating",
            "Coverage",
        ]);
        for issuer in issuers {
            let tickers = issuer
                .tickers
                .iter()
                .map(|t| match &t.exchange {
                    Some(exchange) => format!("{}:{}@{}", t.id_type, t.id_value, exchange),
                    None => format!("{}:{}", t.id_type, t.id_value),
                })
                .collect::<Vec<_>>()
                .join("\n");
            let target = issuer.price_target.as_ref().map(|p| match &p.currency {
                Some(currency) => format!("{} {}", p.value, currency),
                None => p.value.clone(),
            });
            let ids = &issuer.identifiers;

            builder.push_record([
                issuer.name.as_deref().unwrap_or("-"),
                issuer.asset_class.as_deref().unwrap_or("-"),
                if tickers.is_empty() { "-" } else { tickers.as_str() },
                ids.isin.as_deref().unwrap_or("-"),
                ids.cusip.as_deref().unwrap_or("-"),
                ids.ticker.as_deref().unwrap_or("-"),
                target.as_deref().unwrap_or("-"),
                issuer.rating.as_deref().unwrap_or("-"),
                issuer.coverage_action.as_deref().unwrap_or("-"),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format the end-of-batch summary with one line per excluded file.
    pub fn batch_summary(&self, report: &BatchReport) -> String {
        let metrics = &report.metrics;
        let headline = format!(
            "{} row(s) from {} of {} file(s) in {}ms",
            metrics.rows_emitted, metrics.files_parsed, metrics.files_discovered, metrics.elapsed_ms
        );

        let mut lines = Vec::with_capacity(report.failures.len() + 1);
        if report.failures.is_empty() {
            lines.push(self.success(&headline));
        } else {
            lines.push(self.warning(&format!("{}, {} skipped", headline, metrics.files_failed)));
            for failure in &report.failures {
                lines.push(self.error(&format!(
                    "{} [{}]: {}",
                    failure.filename, failure.kind, failure.reason
                )));
            }
        }
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.paint(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.paint(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.paint(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.paint(&format!("⚠ {}", message), Color::Yellow)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

/// A parsed document as nested JSON.
pub fn document_to_json(doc: &ParsedDocument) -> Value {
    let meta = &doc.metadata;
    let analysts: Vec<Value> = meta
        .analysts
        .iter()
        .map(|a| json!({ "name": a.name, "email": a.email, "job_title": a.job_title }))
        .collect();
    let issuers: Vec<Value> = doc
        .issuers
        .iter()
        .map(|issuer| {
            let tickers: Vec<Value> = issuer
                .tickers
                .iter()
                .map(|t| {
                    json!({
                        "id_type": t.id_type.as_str(),
                        "id_value": t.id_value,
                        "exchange": t.exchange,
                    })
                })
                .collect();
            json!({
                "name": issuer.name,
                "asset_class": issuer.asset_class,
                "tickers": tickers,
                "isin": issuer.identifiers.isin,
                "cusip": issuer.identifiers.cusip,
                "ticker": issuer.identifiers.ticker,
                "price_target": issuer.price_target.as_ref().map(|p| json!({
                    "value": p.value,
                    "currency": p.currency
                })),
                "rating": issuer.rating,
                "rating_action": issuer.rating_action,
                "coverage_action": issuer.coverage_action,
                "target_price_action": issuer.target_price_action
            })
        })
        .collect();

    json!({
        "filename": meta.filename,
        "publication_date": meta.publication_date,
        "broker_name": meta.broker_name,
        "title": meta.title,
        "asset_class": meta.product_asset_class,
        "analysts": analysts,
        "report_types": meta.report_types,
        "event_types": meta.event_types,
        "issuers": issuers
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rixflat_batch::{BatchMetrics, FileFailure};
    use rixflat_domain::{IdType, ReportMetadata, Ticker};

    fn sample_doc() -> ParsedDocument {
        let mut meta = ReportMetadata::for_file("note.xml");
        meta.broker_name = Some("Example, Securities".to_string());
        let mut issuer = Issuer::named("Acme");
        issuer.tickers.push(Ticker::new(IdType::Bloomberg, "ACME US"));
        issuer.identifiers.ticker = Some("ACME US".to_string());
        ParsedDocument {
            metadata: meta,
            issuers: vec![issuer],
        }
    }

    fn sample_rows() -> Vec<Row> {
        rixflat_extractor::flatten(&sample_doc())
    }

    #[test]
    fn test_csv_format() {
        let formatter = Formatter::new(OutputFormat::Csv, false);
        let output = formatter.format_rows(&sample_rows()).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        let record = lines.next().unwrap();
        assert!(record.starts_with("note.xml,,\"Example, Securities\","));
        assert!(record.contains("ACME US"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_header_without_rows() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_json_format_uses_null() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_rows(&sample_rows()).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        let row = &parsed[0];
        assert_eq!(row["issuer_name"], "Acme");
        assert_eq!(row["bloomberg"], "ACME US");
        assert!(row["isin"].is_null());
        assert_eq!(row.as_object().unwrap().len(), COLUMNS.len());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rows(&sample_rows()).unwrap();
        assert!(output.contains("issuer_name"));
        assert!(output.contains("Acme"));
        assert!(formatter.format_rows(&[]).unwrap().contains("No rows"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(formatter.format_rows(&sample_rows()).unwrap().is_empty());
    }

    #[test]
    fn test_document_views() {
        let doc = sample_doc();
        let text = Formatter::new(OutputFormat::Table, false).format_document(&doc).unwrap();
        assert!(text.contains("Broker:       Example, Securities"));
        assert!(text.contains("Bloomberg:ACME US"));

        let json = document_to_json(&doc);
        assert_eq!(json["issuers"][0]["tickers"][0]["id_type"], "Bloomberg");
        assert!(json["issuers"][0]["price_target"].is_null());
    }

    #[test]
    fn test_batch_summary_lists_failures() {
        let report = BatchReport {
            rows: sample_rows(),
            failures: vec![FileFailure {
                filename: "2.xml".to_string(),
                kind: "structural".to_string(),
                reason: "Malformed markup".to_string(),
            }],
            metrics: BatchMetrics {
                files_discovered: 2,
                files_parsed: 1,
                files_failed: 1,
                rows_emitted: 1,
                ..Default::default()
            },
        };
        let summary = Formatter::new(OutputFormat::Csv, false).batch_summary(&report);
        assert!(summary.contains("1 row(s) from 1 of 2 file(s)"));
        assert!(summary.contains("✗ 2.xml [structural]: Malformed markup"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
    }
}
