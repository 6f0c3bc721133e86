//! Resolution orchestration
//!
//! Reconciles the two resolution strategies: deterministic name
//! reconstruction and discovery through the live resource tree. The
//! result is a [`ReportLocator`] that downstream fetch/render
//! collaborators can use verbatim, or [`Resolution::NotFound`], which
//! is a legitimate terminal outcome rather than an error.

use serde::Serialize;

use crate::naming::NamingPolicy;
use crate::tree::{self, MatchStrategy, ReportCandidate, ResourceNode, TreeQuery};
use crate::workload::WorkloadDescriptor;

/// API version of report objects.
pub const REPORT_VERSION: &str = "v1alpha1";

/// Which strategy (or combination) a resolution uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Trust the naming convention, never query the tree
    DeterministicOnly,
    /// Always query the tree, never guess the name
    TreeOnly,
    /// Reconstruct the name, confirm or override via the tree
    DeterministicThenTree,
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupMode::DeterministicOnly => write!(f, "deterministic"),
            LookupMode::TreeOnly => write!(f, "tree"),
            LookupMode::DeterministicThenTree => write!(f, "auto"),
        }
    }
}

/// Minimal addressable reference to a report object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLocator {
    pub name: String,
    pub namespace: String,
    pub version: &'static str,
    pub kind: &'static str,
    pub group: &'static str,
}

impl ReportLocator {
    pub fn new(name: String, namespace: String) -> Self {
        Self {
            name,
            namespace,
            version: REPORT_VERSION,
            kind: tree::REPORT_KIND,
            group: tree::REPORT_GROUP,
        }
    }

    /// Query string for the application resource fetch endpoint.
    pub fn resource_query(&self) -> String {
        format!(
            "name={name}&namespace={ns}&resourceName={name}&version={version}&kind={kind}&group={group}",
            name = self.name,
            ns = self.namespace,
            version = self.version,
            kind = self.kind,
            group = self.group,
        )
    }
}

/// Terminal outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found {
        locator: ReportLocator,
        strategy: MatchStrategy,
    },
    NotFound,
}

/// Resolves report locators for (workload, container) pairs.
///
/// Stateless per call; every invocation is independent and idempotent.
#[derive(Debug, Clone, Default)]
pub struct ReportResolver {
    policy: NamingPolicy,
}

impl ReportResolver {
    pub fn new(policy: NamingPolicy) -> Self {
        Self { policy }
    }

    /// The deterministic candidate name for a container, per the
    /// configured naming policy.
    pub fn deterministic_name(&self, workload: &WorkloadDescriptor, container: &str) -> String {
        self.policy.report_name(
            &workload.kind,
            &workload.name,
            container,
            workload.pod_hash.as_deref(),
        )
    }

    /// Resolve the report locator for one container of a workload.
    pub fn resolve(
        &self,
        workload: &WorkloadDescriptor,
        container: &str,
        mode: LookupMode,
        query: &dyn TreeQuery,
    ) -> Resolution {
        match mode {
            LookupMode::DeterministicOnly => Resolution::Found {
                locator: self.deterministic_locator(workload, container),
                strategy: MatchStrategy::Deterministic,
            },
            LookupMode::TreeOnly => {
                let nodes = self.query_tree(workload, query);
                self.from_candidate(
                    tree::find_report(&nodes, &workload.namespace, container),
                    workload,
                )
            }
            LookupMode::DeterministicThenTree => {
                let deterministic = self.deterministic_locator(workload, container);
                let nodes = self.query_tree(workload, query);

                if self.name_exists(&nodes, workload, &deterministic.name) {
                    return Resolution::Found {
                        locator: deterministic,
                        strategy: MatchStrategy::Deterministic,
                    };
                }

                // Name drift: prefer whatever the tree actually holds.
                // An empty tree cannot disprove the convention, so the
                // deterministic locator still wins there.
                match tree::find_report(&nodes, &workload.namespace, container) {
                    ReportCandidate::Found { name, strategy } => Resolution::Found {
                        locator: ReportLocator::new(name, workload.namespace.clone()),
                        strategy,
                    },
                    ReportCandidate::NotFound => Resolution::Found {
                        locator: deterministic,
                        strategy: MatchStrategy::Deterministic,
                    },
                }
            }
        }
    }

    fn deterministic_locator(
        &self,
        workload: &WorkloadDescriptor,
        container: &str,
    ) -> ReportLocator {
        ReportLocator::new(
            self.deterministic_name(workload, container),
            workload.namespace.clone(),
        )
    }

    fn query_tree(&self, workload: &WorkloadDescriptor, query: &dyn TreeQuery) -> Vec<ResourceNode> {
        query.nodes(&workload.namespace, &workload.kind, &workload.name)
    }

    fn name_exists(
        &self,
        nodes: &[ResourceNode],
        workload: &WorkloadDescriptor,
        name: &str,
    ) -> bool {
        nodes.iter().any(|node| {
            node.kind == tree::REPORT_KIND
                && node.group == tree::REPORT_GROUP
                && node.namespace == workload.namespace
                && node.name == name
        })
    }

    fn from_candidate(
        &self,
        candidate: ReportCandidate,
        workload: &WorkloadDescriptor,
    ) -> Resolution {
        match candidate {
            ReportCandidate::Found { name, strategy } => Resolution::Found {
                locator: ReportLocator::new(name, workload.namespace.clone()),
                strategy,
            },
            ReportCandidate::NotFound => Resolution::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{StaticTree, CONTAINER_LABEL, REPORT_GROUP, REPORT_KIND};
    use crate::workload::{ContainerSpec, WorkloadDescriptor};
    use std::collections::HashMap;

    fn cronjob_workload() -> WorkloadDescriptor {
        WorkloadDescriptor {
            kind: "CronJob".to_string(),
            name: "nightly-backup".to_string(),
            namespace: "ops".to_string(),
            pod_hash: None,
            containers: vec![
                ContainerSpec {
                    name: "app".to_string(),
                    image: "registry.local/backup:3".to_string(),
                },
                ContainerSpec {
                    name: "sidecar".to_string(),
                    image: "registry.local/upload:1".to_string(),
                },
            ],
        }
    }

    fn report_node(name: &str, container: &str) -> ResourceNode {
        ResourceNode {
            kind: REPORT_KIND.to_string(),
            group: REPORT_GROUP.to_string(),
            namespace: "ops".to_string(),
            name: name.to_string(),
            labels: HashMap::from([(CONTAINER_LABEL.to_string(), container.to_string())]),
        }
    }

    #[test]
    fn test_deterministic_only_never_not_found() {
        let resolver = ReportResolver::default();
        let resolution = resolver.resolve(
            &cronjob_workload(),
            "app",
            LookupMode::DeterministicOnly,
            &StaticTree::default(),
        );
        match resolution {
            Resolution::Found { locator, strategy } => {
                assert_eq!(locator.name, "cronjob-nightly-backup-app");
                assert_eq!(locator.namespace, "ops");
                assert_eq!(strategy, MatchStrategy::Deterministic);
            }
            Resolution::NotFound => panic!("deterministic mode must always produce a locator"),
        }
    }

    #[test]
    fn test_tree_only_empty_tree_is_not_found() {
        let resolver = ReportResolver::default();
        let resolution = resolver.resolve(
            &cronjob_workload(),
            "app",
            LookupMode::TreeOnly,
            &StaticTree::default(),
        );
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[test]
    fn test_tree_only_uses_label_match() {
        let resolver = ReportResolver::default();
        let tree = StaticTree(vec![
            report_node("cronjob-nightly-backup-app", "app"),
            report_node("cronjob-nightly-backup-sidecar", "sidecar"),
        ]);
        let resolution =
            resolver.resolve(&cronjob_workload(), "sidecar", LookupMode::TreeOnly, &tree);
        match resolution {
            Resolution::Found { locator, strategy } => {
                assert_eq!(locator.name, "cronjob-nightly-backup-sidecar");
                assert_eq!(strategy, MatchStrategy::TreeMatch);
            }
            Resolution::NotFound => panic!("expected a tree match"),
        }
    }

    #[test]
    fn test_auto_confirms_deterministic_name() {
        let resolver = ReportResolver::default();
        // Label is stale but the deterministic name exists live.
        let tree = StaticTree(vec![report_node("cronjob-nightly-backup-app", "old-container")]);
        let resolution = resolver.resolve(
            &cronjob_workload(),
            "app",
            LookupMode::DeterministicThenTree,
            &tree,
        );
        match resolution {
            Resolution::Found { locator, strategy } => {
                assert_eq!(locator.name, "cronjob-nightly-backup-app");
                assert_eq!(strategy, MatchStrategy::Deterministic);
            }
            Resolution::NotFound => panic!("expected the deterministic candidate"),
        }
    }

    #[test]
    fn test_auto_overrides_on_name_drift() {
        let resolver = ReportResolver::default();
        // Scanner renamed the report; only the label still matches.
        let tree = StaticTree(vec![report_node("cronjob-backup-app-drifted", "app")]);
        let resolution = resolver.resolve(
            &cronjob_workload(),
            "app",
            LookupMode::DeterministicThenTree,
            &tree,
        );
        match resolution {
            Resolution::Found { locator, strategy } => {
                assert_eq!(locator.name, "cronjob-backup-app-drifted");
                assert_eq!(strategy, MatchStrategy::TreeMatch);
            }
            Resolution::NotFound => panic!("expected the drifted tree node"),
        }
    }

    #[test]
    fn test_auto_degrades_to_deterministic_on_empty_tree() {
        let resolver = ReportResolver::default();
        let resolution = resolver.resolve(
            &cronjob_workload(),
            "sidecar",
            LookupMode::DeterministicThenTree,
            &StaticTree::default(),
        );
        match resolution {
            Resolution::Found { locator, strategy } => {
                assert_eq!(locator.name, "cronjob-nightly-backup-sidecar");
                assert_eq!(strategy, MatchStrategy::Deterministic);
            }
            Resolution::NotFound => panic!("empty tree must degrade to the deterministic name"),
        }
    }

    #[test]
    fn test_deterministic_name_includes_pod_hash() {
        let resolver = ReportResolver::default();
        let workload = WorkloadDescriptor {
            kind: "ReplicaSet".to_string(),
            name: "myapp-7d4b8c9f9b".to_string(),
            namespace: "shop".to_string(),
            pod_hash: Some("x2k7q9w8r4".to_string()),
            containers: Vec::new(),
        };
        assert_eq!(
            resolver.deterministic_name(&workload, "app"),
            "replicaset-myapp-7d4b8c9f9b-x2k7q9w8r4-app"
        );
    }

    #[test]
    fn test_resource_query_format() {
        let locator = ReportLocator::new("replicaset-myapp-app".to_string(), "shop".to_string());
        assert_eq!(
            locator.resource_query(),
            "name=replicaset-myapp-app&namespace=shop&resourceName=replicaset-myapp-app\
             &version=v1alpha1&kind=VulnerabilityReport&group=aquasecurity.github.io"
        );
    }
}
