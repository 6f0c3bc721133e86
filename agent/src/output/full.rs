//! Full output builder
//!
//! Builds the complete JSON envelope with one entry per resolution.

use crate::resolver::{ResolutionOutcome, ResolutionRecord};

use super::{strategy_label, EMPTY_STATE};

/// Build the full JSON envelope from all resolution records
pub fn build_full(records: &[ResolutionRecord]) -> serde_json::Value {
    let results: Vec<serde_json::Value> = records.iter().map(build_record).collect();

    serde_json::json!({
        "agent": {
            "id": "report-agent",
            "name": "report-agent",
            "version": env!("CARGO_PKG_VERSION")
        },
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "results": results
    })
}

/// Build the JSON entry for a single record
fn build_record(record: &ResolutionRecord) -> serde_json::Value {
    let mut entry = serde_json::json!({
        "source": record.source.display().to_string(),
        "workload": {
            "kind": record.kind,
            "name": record.workload,
            "namespace": record.namespace
        },
        "container": record.container
    });

    let fields = match &record.outcome {
        ResolutionOutcome::Resolved { locator, strategy } => serde_json::json!({
            "status": "resolved",
            "strategy": strategy_label(*strategy),
            "locator": locator,
            "resource_query": locator.resource_query()
        }),
        ResolutionOutcome::NotFound => serde_json::json!({
            "status": "not_found",
            "message": EMPTY_STATE
        }),
        ResolutionOutcome::Error(message) => serde_json::json!({
            "status": "error",
            "message": message
        }),
    };

    if let (Some(entry), Some(extra)) = (entry.as_object_mut(), fields.as_object()) {
        for (key, value) in extra {
            entry.insert(key.clone(), value.clone());
        }
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator_kit::resolve::ReportLocator;
    use locator_kit::tree::MatchStrategy;
    use std::path::PathBuf;

    fn resolved_record() -> ResolutionRecord {
        ResolutionRecord {
            source: PathBuf::from("cronjob.json"),
            kind: "CronJob".to_string(),
            workload: "nightly-backup".to_string(),
            namespace: "ops".to_string(),
            container: "app".to_string(),
            outcome: ResolutionOutcome::Resolved {
                locator: ReportLocator::new(
                    "cronjob-nightly-backup-app".to_string(),
                    "ops".to_string(),
                ),
                strategy: MatchStrategy::Deterministic,
            },
        }
    }

    #[test]
    fn test_build_full_envelope() {
        let envelope = build_full(&[resolved_record()]);
        assert_eq!(envelope["agent"]["id"], "report-agent");
        assert_eq!(envelope["results"][0]["status"], "resolved");
        assert_eq!(envelope["results"][0]["strategy"], "deterministic");
        assert_eq!(
            envelope["results"][0]["locator"]["group"],
            "aquasecurity.github.io"
        );
    }

    #[test]
    fn test_build_record_not_found_is_empty_state() {
        let record = ResolutionRecord {
            outcome: ResolutionOutcome::NotFound,
            ..resolved_record()
        };
        let entry = build_record(&record);
        assert_eq!(entry["status"], "not_found");
        assert_eq!(entry["message"], EMPTY_STATE);
    }
}
