//! Workload manifest normalization
//!
//! Turns a raw Kubernetes manifest (as `kubectl get -o json` emits it)
//! into a uniform [`WorkloadDescriptor`]. A Pod deliberately takes on
//! the identity of its first owner reference; a CronJob's containers
//! live under the nested job template.

use serde_json::Value;
use thiserror::Error;

/// A container entry from a workload spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
}

/// Normalized workload identity plus its container list.
///
/// For Pods, `kind` and `name` reflect the owning controller, not the
/// Pod itself. `containers` is spec containers followed by init
/// containers; duplicate names are a data-quality issue upstream and
/// are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadDescriptor {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub pod_hash: Option<String>,
    pub containers: Vec<ContainerSpec>,
}

/// Errors for manifests the descriptor cannot be derived from.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Manifest is missing a field the descriptor requires
    #[error("workload is missing required field '{0}'")]
    MissingField(&'static str),
    /// A Pod must carry at least one owner reference
    #[error("Pod '{0}' has no owner references")]
    PodWithoutOwner(String),
    /// A CronJob must carry a job template with a container spec
    #[error("CronJob '{0}' has no job template container spec")]
    MissingJobTemplate(String),
}

/// Container-path shape of a workload manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkloadShape {
    Pod,
    CronJobTemplate,
    GenericTemplate,
}

impl WorkloadShape {
    fn of(kind: &str) -> Self {
        match kind {
            "Pod" => WorkloadShape::Pod,
            "CronJob" => WorkloadShape::CronJobTemplate,
            _ => WorkloadShape::GenericTemplate,
        }
    }
}

/// Derive a [`WorkloadDescriptor`] from a raw workload manifest.
pub fn describe(resource: &Value) -> Result<WorkloadDescriptor, WorkloadError> {
    let own_kind = resource
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(WorkloadError::MissingField("kind"))?;

    let own_name = resource
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .ok_or(WorkloadError::MissingField("metadata.name"))?;

    // Manifests read from files may omit the namespace; the API server
    // would place them in "default".
    let namespace = resource
        .pointer("/metadata/namespace")
        .and_then(Value::as_str)
        .unwrap_or("default")
        .to_string();

    let shape = WorkloadShape::of(own_kind);

    let (kind, name, pod_hash) = match shape {
        WorkloadShape::Pod => {
            // Identity substitution: the report is keyed by the owning
            // controller, so the Pod hands over its first owner's
            // kind/name. Multiple owners are not disambiguated.
            let (owner_kind, owner_name) = owner_of(resource)
                .ok_or_else(|| WorkloadError::PodWithoutOwner(own_name.to_string()))?;
            (owner_kind, owner_name, extract_pod_hash(own_name))
        }
        _ => (own_kind.to_string(), own_name.to_string(), None),
    };

    let containers = collect_containers(resource, shape, own_name)?;

    Ok(WorkloadDescriptor {
        kind,
        name,
        namespace,
        pod_hash,
        containers,
    })
}

/// Resolve the first owner reference of a resource, if any.
///
/// The descriptor stores the resolved kind/name pair rather than a
/// handle to the owner object.
pub fn owner_of(resource: &Value) -> Option<(String, String)> {
    let owner = resource
        .pointer("/metadata/ownerReferences")
        .and_then(Value::as_array)?
        .first()?;

    let kind = owner.get("kind").and_then(Value::as_str)?;
    let name = owner.get("name").and_then(Value::as_str)?;
    Some((kind.to_string(), name.to_string()))
}

/// Extract the generated pod-hash suffix from a Pod name.
///
/// Matches a 10-character lowercase-alphanumeric suffix preceded by a
/// hyphen; anything else (including a shorter final segment) yields
/// `None`.
pub fn extract_pod_hash(pod_name: &str) -> Option<String> {
    let bytes = pod_name.as_bytes();
    if bytes.len() < 11 || bytes[bytes.len() - 11] != b'-' {
        return None;
    }
    let tail = &bytes[bytes.len() - 10..];
    if tail
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        std::str::from_utf8(tail).ok().map(str::to_string)
    } else {
        None
    }
}

/// Read the combined container list for the given workload shape.
fn collect_containers(
    resource: &Value,
    shape: WorkloadShape,
    own_name: &str,
) -> Result<Vec<ContainerSpec>, WorkloadError> {
    let spec_path = match shape {
        WorkloadShape::Pod => "/spec",
        WorkloadShape::CronJobTemplate => "/spec/jobTemplate/spec/template/spec",
        WorkloadShape::GenericTemplate => "/spec/template/spec",
    };

    let spec = match resource.pointer(spec_path) {
        Some(spec) => spec,
        None if shape == WorkloadShape::CronJobTemplate => {
            return Err(WorkloadError::MissingJobTemplate(own_name.to_string()));
        }
        None => return Ok(Vec::new()),
    };

    // Regular containers precede init containers.
    let mut containers = read_container_array(spec, "containers");
    containers.extend(read_container_array(spec, "initContainers"));
    Ok(containers)
}

fn read_container_array(spec: &Value, field: &str) -> Vec<ContainerSpec> {
    spec.get(field)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let name = entry.get("name").and_then(Value::as_str)?;
                    let image = entry.get("image").and_then(Value::as_str).unwrap_or("");
                    Some(ContainerSpec {
                        name: name.to_string(),
                        image: image.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
