//! Renovate log report engine: deterministic, rule-based reduction of debug logs.
//!
//! Reads a newline-delimited JSON log, strips logger metadata, reduces
//! failures to one summary per repository, and derives cross-repository
//! statistics (noisy repositories, merge-request activity, package-manager
//! usage, dependencies that could not be found).
//!
//! No DB, no network; pure computation over the buffered log.

pub mod classify;
pub mod collate;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod managers;
pub mod merge_requests;
pub mod missing_deps;
pub mod noisy;
pub mod normalize;
pub mod render;
pub mod repositories;
pub mod source;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::ReportError;
pub use source::{parse_log, read_log, LogInput};
pub use types::{ErrorSummary, NormalizedRecord, ReportData, ReportSummary};
