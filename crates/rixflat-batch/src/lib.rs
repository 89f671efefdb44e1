//! Rixflat Batch
//!
//! Directory-level driver that parses many research documents concurrently
//! and aggregates their rows into one table.
//!
//! # Overview
//!
//! The Batch Runner is responsible for:
//! - **Enumeration**: Non-recursive directory listing with a case-insensitive
//!   extension filter, sorted by file name
//! - **Bounded parallelism**: A semaphore-limited pool of tokio tasks, parsing
//!   on the blocking pool
//! - **Failure isolation**: A file that cannot be read or parsed is logged,
//!   listed in the report and excluded; its siblings are unaffected
//! - **Metrics collection**: Counters per run and failure kind
//!
//! Rows are emitted in enumeration order only after every task has settled.
//!
//! # Usage
//!
//! ```no_run
//! use rixflat_batch::{BatchConfig, BatchRunner};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = BatchRunner::new(BatchConfig::strict())?;
//!     let report = runner.run(Path::new("./research")).await?;
//!
//!     for failure in &report.failures {
//!         eprintln!("{}: {}", failure.filename, failure.reason);
//!     }
//!     println!("{}", report.metrics.summary());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [batch]
//! extension = "xml"
//! max_workers = 0      # 0 = available parallelism
//!
//! [batch.extractor]
//! strict_current = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod runner;

pub use config::BatchConfig;
pub use error::BatchError;
pub use metrics::BatchMetrics;
pub use runner::{discover_files, BatchReport, BatchRunner, FileFailure};
