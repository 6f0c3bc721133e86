//! Resource-tree discovery of report nodes
//!
//! Queries the live resource tree under a workload for report-kind
//! nodes and disambiguates them by the scanner's container label. The
//! "first candidate when no label matches" fallback is observed
//! behavior; for multi-container workloads it can be imprecise, and it
//! is kept as-is for compatibility.

use std::collections::HashMap;

use serde::Deserialize;

/// API group of report objects.
pub const REPORT_GROUP: &str = "aquasecurity.github.io";
/// Kind of report objects.
pub const REPORT_KIND: &str = "VulnerabilityReport";
/// Label the scanner stamps a report with to record its container.
pub const CONTAINER_LABEL: &str = "trivy-operator.container.name";

/// A node of the resource tree, as returned by the tree query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceNode {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// How a report candidate was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Name reconstructed from the naming convention
    Deterministic,
    /// Tree node whose container label matched exactly
    TreeMatch,
    /// First report node in tree order, no exact label match
    TreeFallback,
}

/// Outcome of a tree lookup for one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCandidate {
    Found { name: String, strategy: MatchStrategy },
    NotFound,
}

/// Source of resource-tree nodes for a workload root.
///
/// Implementations own the network call; a failed query must surface as
/// an empty node list, since absence of reports is an expected steady
/// state, not an error.
pub trait TreeQuery: std::fmt::Debug {
    fn nodes(&self, namespace: &str, kind: &str, name: &str) -> Vec<ResourceNode>;
}

/// A query that serves a fixed node list; the degenerate case doubles
/// as the offline no-op query.
#[derive(Debug, Clone, Default)]
pub struct StaticTree(pub Vec<ResourceNode>);

impl TreeQuery for StaticTree {
    fn nodes(&self, _namespace: &str, _kind: &str, _name: &str) -> Vec<ResourceNode> {
        self.0.clone()
    }
}

/// Pick the report node for `container` from a queried node sequence.
///
/// Filters to report-kind nodes in `namespace`, prefers an exact
/// container-label match, then falls back to the first candidate in the
/// sequence's original order.
pub fn find_report(nodes: &[ResourceNode], namespace: &str, container: &str) -> ReportCandidate {
    let mut candidates = nodes.iter().filter(|node| {
        node.kind == REPORT_KIND && node.group == REPORT_GROUP && node.namespace == namespace
    });

    let mut first = None;
    for node in candidates.by_ref() {
        if node.labels.get(CONTAINER_LABEL).map(String::as_str) == Some(container) {
            return ReportCandidate::Found {
                name: node.name.clone(),
                strategy: MatchStrategy::TreeMatch,
            };
        }
        first.get_or_insert(node);
    }

    match first {
        Some(node) => ReportCandidate::Found {
            name: node.name.clone(),
            strategy: MatchStrategy::TreeFallback,
        },
        None => ReportCandidate::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_node(name: &str, namespace: &str, container: &str) -> ResourceNode {
        ResourceNode {
            kind: REPORT_KIND.to_string(),
            group: REPORT_GROUP.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            labels: HashMap::from([(CONTAINER_LABEL.to_string(), container.to_string())]),
        }
    }

    fn sample_nodes() -> Vec<ResourceNode> {
        vec![
            report_node("r1", "ns", "app"),
            report_node("r2", "ns", "sidecar"),
        ]
    }

    #[test]
    fn test_find_report_label_match() {
        let candidate = find_report(&sample_nodes(), "ns", "sidecar");
        assert_eq!(
            candidate,
            ReportCandidate::Found {
                name: "r2".to_string(),
                strategy: MatchStrategy::TreeMatch,
            }
        );
    }

    #[test]
    fn test_find_report_falls_back_to_first() {
        let candidate = find_report(&sample_nodes(), "ns", "missing");
        assert_eq!(
            candidate,
            ReportCandidate::Found {
                name: "r1".to_string(),
                strategy: MatchStrategy::TreeFallback,
            }
        );
    }

    #[test]
    fn test_find_report_empty_tree() {
        assert_eq!(find_report(&[], "ns", "app"), ReportCandidate::NotFound);
    }

    #[test]
    fn test_find_report_filters_namespace_and_kind() {
        let mut nodes = sample_nodes();
        nodes[0].namespace = "other".to_string();
        nodes[1].kind = "ConfigAuditReport".to_string();
        assert_eq!(find_report(&nodes, "ns", "app"), ReportCandidate::NotFound);
    }

    #[test]
    fn test_find_report_ignores_foreign_group() {
        let mut node = report_node("r1", "ns", "app");
        node.group = "apps".to_string();
        assert_eq!(find_report(&[node], "ns", "app"), ReportCandidate::NotFound);
    }

    #[test]
    fn test_resource_node_deserializes_with_missing_fields() {
        let node: ResourceNode = serde_json::from_str(r#"{"kind": "Pod", "name": "p"}"#).unwrap();
        assert_eq!(node.kind, "Pod");
        assert!(node.labels.is_empty());
    }
}
