//! Deterministic report-name construction
//!
//! Rebuilds the name the scanner gives a vulnerability report from
//! workload and container identity, including the length-bounded hash
//! fallback. Two generations of the convention exist in the wild
//! (kind casing, pod-hash slice length); `NamingPolicy` selects between
//! them instead of hard-coding one.

use crate::hash::digest;

/// Kubernetes identifier length ceiling.
pub const MAX_NAME_LEN: usize = 63;

/// Convention knobs that differ between scanner generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Lowercase the workload kind before composing the name.
    pub lowercase_kind: bool,
    /// How many characters of the extracted pod hash are used.
    pub pod_hash_len: usize,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            lowercase_kind: true,
            pod_hash_len: 10,
        }
    }
}

impl NamingPolicy {
    /// Compose the report name for a workload/container pair under this
    /// policy. `pod_hash` is the full extracted suffix; the policy
    /// decides how much of it participates.
    pub fn report_name(
        &self,
        kind: &str,
        name: &str,
        container: &str,
        pod_hash: Option<&str>,
    ) -> String {
        let kind = if self.lowercase_kind {
            kind.to_lowercase()
        } else {
            kind.to_string()
        };

        let hash = pod_hash
            .map(|h| &h[..self.pod_hash_len.min(h.len())])
            .unwrap_or("");

        build(&kind, name, container, hash)
    }
}

/// Build a candidate report name from pre-lowercased parts.
///
/// The candidate is `{kind}-{name}[-{pod_hash}]-{container}`. When that
/// exceeds [`MAX_NAME_LEN`], the scanner instead emits
/// `{kind}-{digest("{name}-{container}")}`. The pod hash is excluded
/// from the fallback input; that asymmetry is the upstream convention
/// and must be preserved for compatibility.
pub fn build(kind: &str, name: &str, container: &str, pod_hash: &str) -> String {
    let mut candidate = format!("{}-{}", kind, name);
    if !pod_hash.is_empty() {
        candidate.push('-');
        candidate.push_str(pod_hash);
    }
    candidate.push('-');
    candidate.push_str(container);

    if candidate.len() > MAX_NAME_LEN {
        return format!("{}-{}", kind, digest(&format!("{}-{}", name, container)));
    }

    candidate
}
