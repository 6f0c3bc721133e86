//! Query-string builder
//!
//! Emits one report-fetch query string per resolved container, ready to
//! append to `GET /api/v1/applications/{app}/resource`.

use crate::resolver::{ResolutionOutcome, ResolutionRecord};

/// Build the query-string listing from all resolution records
///
/// Records without a locator are skipped; the console and summary
/// formats are the place for empty states.
pub fn build_queries(records: &[ResolutionRecord]) -> String {
    let mut lines = String::new();

    for record in records {
        if let ResolutionOutcome::Resolved { locator, .. } = &record.outcome {
            lines.push_str(&locator.resource_query());
            lines.push('\n');
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator_kit::resolve::ReportLocator;
    use locator_kit::tree::MatchStrategy;
    use std::path::PathBuf;

    #[test]
    fn test_build_queries_skips_unresolved() {
        let records = vec![
            ResolutionRecord {
                source: PathBuf::from("a.json"),
                kind: "CronJob".to_string(),
                workload: "nightly".to_string(),
                namespace: "ops".to_string(),
                container: "app".to_string(),
                outcome: ResolutionOutcome::Resolved {
                    locator: ReportLocator::new(
                        "cronjob-nightly-app".to_string(),
                        "ops".to_string(),
                    ),
                    strategy: MatchStrategy::TreeMatch,
                },
            },
            ResolutionRecord {
                source: PathBuf::from("a.json"),
                kind: "CronJob".to_string(),
                workload: "nightly".to_string(),
                namespace: "ops".to_string(),
                container: "sidecar".to_string(),
                outcome: ResolutionOutcome::NotFound,
            },
        ];

        let listing = build_queries(&records);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("name=cronjob-nightly-app&namespace=ops"));
        assert!(lines[0].ends_with("&group=aquasecurity.github.io"));
    }
}
