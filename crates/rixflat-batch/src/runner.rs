//! Batch Runner: a directory of documents into one row table

use crate::{BatchConfig, BatchError, BatchMetrics};
use rixflat_domain::{ParsedDocument, Row};
use rixflat_extractor::{display_name, flatten, DocumentParser, ExtractorError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A document excluded from the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// File name (no directory)
    pub filename: String,
    /// Failure category ("structural", "io", "encoding", "panic", ...)
    pub kind: String,
    /// Human-readable reason
    pub reason: String,
}

/// Result of a batch run
///
/// Rows appear in file enumeration order, then issuer and ticker order
/// within each file.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Aggregated rows from every parsed document
    pub rows: Vec<Row>,
    /// Documents that were excluded, in enumeration order
    pub failures: Vec<FileFailure>,
    /// Counters for the run
    pub metrics: BatchMetrics,
}

type Outcome = Result<ParsedDocument, FileFailure>;

/// List the files in `dir` accepted by the extension filter
///
/// Non-recursive. Sorted by file name so output order does not depend on the
/// platform's directory order.
///
/// # Errors
///
/// `BatchError::Directory` if the directory is missing or unreadable.
pub fn discover_files(dir: &Path, config: &BatchConfig) -> Result<Vec<PathBuf>, BatchError> {
    let directory_error = |source| BatchError::Directory {
        path: dir.display().to_string(),
        source,
    };

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(directory_error)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| config.accepts(&display_name(path)))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Runs a bounded pool of document parsers over a directory
///
/// # Examples
///
/// ```no_run
/// use rixflat_batch::{BatchConfig, BatchRunner};
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let runner = BatchRunner::new(BatchConfig::default())?;
///     let report = runner.run(Path::new("./research")).await?;
///     println!("{}", report.metrics.summary());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: BatchConfig,
    parser: Arc<DocumentParser>,
}

impl BatchRunner {
    /// Create a runner after validating the batch and extractor configuration
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::Config)?;
        let parser = DocumentParser::new(config.extractor.clone());
        Ok(Self {
            config,
            parser: Arc::new(parser),
        })
    }

    /// Create a runner with default configuration
    pub fn default_config() -> Self {
        Self {
            config: BatchConfig::default(),
            parser: Arc::new(DocumentParser::default()),
        }
    }

    /// Parse every matching file in `dir`
    ///
    /// Only a missing or unreadable directory is an error. Per-file failures
    /// are logged and listed in the report.
    pub async fn run(&self, dir: &Path) -> Result<BatchReport, BatchError> {
        let files = discover_files(dir, &self.config)?;
        info!(
            "Batch started: {} file(s) in {} ({} worker(s))",
            files.len(),
            dir.display(),
            self.config.worker_count()
        );
        Ok(self.run_files(files).await)
    }

    /// Parse an explicit list of files, in the given order
    pub async fn run_files(&self, files: Vec<PathBuf>) -> BatchReport {
        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.worker_count()));

        // One slot per input index; every task is awaited before emitting
        let handles: Vec<(String, JoinHandle<Outcome>)> = files
            .into_iter()
            .map(|path| {
                let parser = Arc::clone(&self.parser);
                let semaphore = Arc::clone(&semaphore);
                let filename = display_name(&path);
                let handle = tokio::spawn(parse_one(parser, semaphore, path));
                (filename, handle)
            })
            .collect();

        let mut report = BatchReport::default();
        report.metrics.files_discovered = handles.len();

        for (filename, handle) in handles {
            let outcome = handle.await.unwrap_or_else(|e| {
                Err(FileFailure {
                    filename: filename.clone(),
                    kind: "panic".to_string(),
                    reason: format!("worker failed: {}", e),
                })
            });

            match outcome {
                Ok(doc) => {
                    let rows = flatten(&doc);
                    report.metrics.record_parsed(doc.issuers.len(), rows.len());
                    report.rows.extend(rows);
                }
                Err(failure) => {
                    warn!("Skipping {}: {}", failure.filename, failure.reason);
                    report.metrics.record_failure(&failure.kind);
                    report.failures.push(failure);
                }
            }
        }

        report.metrics.elapsed_ms = started.elapsed().as_millis();
        info!(
            "Batch finished: {} parsed, {} failed, {} row(s) in {}ms",
            report.metrics.files_parsed,
            report.metrics.files_failed,
            report.metrics.rows_emitted,
            report.metrics.elapsed_ms
        );
        report
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Read one file and parse it on the blocking pool
async fn parse_one(
    parser: Arc<DocumentParser>,
    semaphore: Arc<Semaphore>,
    path: PathBuf,
) -> Outcome {
    let filename = display_name(&path);
    let failure = |kind: &str, reason: String| FileFailure {
        filename: filename.clone(),
        kind: kind.to_string(),
        reason,
    };
    let from_extractor = |e: ExtractorError| failure(e.kind(), e.to_string());

    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| failure("worker", e.to_string()))?;

    debug!("Parsing {}", path.display());
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| from_extractor(ExtractorError::Io(e)))?;
    let text = String::from_utf8(bytes).map_err(|e| from_extractor(e.into()))?;

    let name = filename.clone();
    tokio::task::spawn_blocking(move || parser.parse(&name, &text))
        .await
        .map_err(|e| failure("panic", format!("parser failed: {}", e)))?
        .map_err(from_extractor)
}
