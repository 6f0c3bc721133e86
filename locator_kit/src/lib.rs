//! # Report Locator Kit
//!
//! Resolves the identity of the vulnerability report stored for a
//! specific container of a Kubernetes workload, without requiring the
//! caller to know the scanner's naming scheme or to have list access to
//! report objects.
//!
//! ## Modules
//!
//! - `hash` - Bounded-length digest used by the name-fallback rule
//! - `naming` - Deterministic report-name construction
//! - `workload` - Workload manifest normalization (Pod/CronJob/controller)
//! - `tree` - Resource-tree node model and container disambiguation
//! - `client` - Argo CD resource-tree query client
//! - `resolve` - Resolution orchestration and the report locator
//! - `session` - Stale-selection guard for interactive callers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use locator_kit::client::ArgoClient;
//! use locator_kit::resolve::{LookupMode, ReportResolver, Resolution};
//! use locator_kit::workload::describe;
//!
//! let manifest: serde_json::Value = serde_json::from_str(&raw)?;
//! let workload = describe(&manifest)?;
//! let client = ArgoClient::new("https://argocd.example.com", "my-app");
//! let resolver = ReportResolver::default();
//!
//! match resolver.resolve(&workload, "app", LookupMode::TreeOnly, &client) {
//!     Resolution::Found { locator, .. } => println!("{}", locator.resource_query()),
//!     Resolution::NotFound => println!("no report found for this container"),
//! }
//! ```

pub mod client;
pub mod hash;
pub mod naming;
pub mod resolve;
pub mod session;
pub mod tree;
pub mod workload;
