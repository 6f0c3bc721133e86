//! Summary builder
//!
//! Builds minimal summary output with resolved/missing counts only.

use crate::resolver::{ResolutionOutcome, ResolutionRecord};

/// Build a counts-only summary JSON from all resolution records
pub fn build_summary(records: &[ResolutionRecord]) -> serde_json::Value {
    let mut resolved = 0;
    let mut missing = 0;
    let mut errors = 0;
    let mut containers = Vec::new();

    for record in records {
        let status = match &record.outcome {
            ResolutionOutcome::Resolved { .. } => {
                resolved += 1;
                "resolved"
            }
            ResolutionOutcome::NotFound => {
                missing += 1;
                "not_found"
            }
            ResolutionOutcome::Error(_) => {
                errors += 1;
                "error"
            }
        };

        containers.push(serde_json::json!({
            "workload": record.workload,
            "namespace": record.namespace,
            "container": record.container,
            "status": status
        }));
    }

    serde_json::json!({
        "agent": {
            "id": "report-agent",
            "name": "report-agent",
            "version": env!("CARGO_PKG_VERSION")
        },
        "summary": {
            "total": records.len(),
            "resolved": resolved,
            "not_found": missing,
            "errors": errors
        },
        "containers": containers
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_summary_counts() {
        let records = vec![
            ResolutionRecord {
                source: PathBuf::from("a.json"),
                kind: "CronJob".to_string(),
                workload: "nightly".to_string(),
                namespace: "ops".to_string(),
                container: "app".to_string(),
                outcome: ResolutionOutcome::NotFound,
            },
            ResolutionRecord {
                source: PathBuf::from("b.json"),
                kind: String::new(),
                workload: String::new(),
                namespace: String::new(),
                container: String::new(),
                outcome: ResolutionOutcome::Error("unreadable".to_string()),
            },
        ];

        let summary = build_summary(&records);
        assert_eq!(summary["summary"]["total"], 2);
        assert_eq!(summary["summary"]["resolved"], 0);
        assert_eq!(summary["summary"]["not_found"], 1);
        assert_eq!(summary["summary"]["errors"], 1);
        assert_eq!(summary["containers"][0]["status"], "not_found");
    }
}
