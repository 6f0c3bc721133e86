//! Output generation module
//!
//! Provides builders for the supported output formats:
//! - Full envelope with every resolution
//! - Summary (counts only)
//! - Query strings for the report fetch endpoint
//! - Console (human-readable)

mod console;
mod full;
mod query;
mod summary;

pub use console::{print_progress_record, print_results};
pub use full::build_full;
pub use query::build_queries;
pub use summary::build_summary;

use locator_kit::tree::MatchStrategy;

use crate::config::OutputFormat;
use crate::resolver::ResolutionRecord;

/// Rendered for a container without a report; an empty state, never an
/// error banner.
pub const EMPTY_STATE: &str = "no report found for this container";

/// Build output in the specified format
pub fn build_output(
    records: &[ResolutionRecord],
    format: OutputFormat,
) -> Result<String, OutputError> {
    let rendered = match format {
        OutputFormat::Full => serde_json::to_string_pretty(&build_full(records))
            .map_err(|e| OutputError::Serialization(e.to_string()))?,
        OutputFormat::Summary => serde_json::to_string_pretty(&build_summary(records))
            .map_err(|e| OutputError::Serialization(e.to_string()))?,
        OutputFormat::Query => build_queries(records),
    };
    Ok(rendered)
}

/// Stable label for a match strategy
pub(crate) fn strategy_label(strategy: MatchStrategy) -> &'static str {
    match strategy {
        MatchStrategy::Deterministic => "deterministic",
        MatchStrategy::TreeMatch => "tree-match",
        MatchStrategy::TreeFallback => "tree-fallback",
    }
}

/// Errors that can occur during output generation
#[derive(Debug)]
pub enum OutputError {
    /// Failed to serialize result
    Serialization(String),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Serialization(msg) => write!(f, "Failed to serialize output: {}", msg),
        }
    }
}

impl std::error::Error for OutputError {}
