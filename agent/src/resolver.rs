//! Core resolution loop
//!
//! Walks the discovered workload manifests, derives a descriptor for
//! each, and resolves a report locator per container.

use std::path::{Path, PathBuf};
use std::time::Instant;

use locator_kit::client::ArgoClient;
use locator_kit::resolve::{LookupMode, ReportLocator, ReportResolver, Resolution};
use locator_kit::tree::{MatchStrategy, StaticTree, TreeQuery};
use locator_kit::workload::describe;

use crate::config::{AgentConfig, ConfigError, RunConfig, RunSummary};
use crate::output;

/// One resolved (workload, container) pair
#[derive(Debug)]
pub struct ResolutionRecord {
    pub source: PathBuf,
    pub kind: String,
    pub workload: String,
    pub namespace: String,
    pub container: String,
    pub outcome: ResolutionOutcome,
}

/// Terminal outcome for one record
#[derive(Debug)]
pub enum ResolutionOutcome {
    Resolved {
        locator: ReportLocator,
        strategy: MatchStrategy,
    },
    /// A legitimate empty state, not an error
    NotFound,
    Error(String),
}

/// Run resolution over all discovered manifests
pub fn run(config: &RunConfig, manifests: &[PathBuf]) -> Result<i32, ResolveError> {
    let start = Instant::now();

    let agent_config = load_agent_config(config)?;
    let resolver = ReportResolver::new(agent_config.naming.policy());
    let query = build_query(config, &agent_config)?;

    log::info!(
        "starting resolution: {} manifest(s), mode {}",
        manifests.len(),
        config.mode
    );
    if !config.quiet {
        println!();
        println!("Report Locator Agent v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Resolving {} workload manifest(s) in {} mode...",
            manifests.len(),
            config.mode
        );
        println!();
    }

    let (records, mut summary) = resolve_manifests(manifests, &resolver, config, query.as_ref());
    summary.duration = start.elapsed();

    if !config.quiet {
        output::print_results(&records);
        print_execution_info(&summary, config);
    }

    // Build and save output file only if explicitly requested
    if let Some(output_path) = &config.output_file {
        if !records.is_empty() {
            save_output(&records, config)?;
        }

        if !config.quiet {
            println!("Results saved to: {}", output_path.display());
            println!();
        }
    }

    log::info!(
        "resolution finished: {} container(s), {} resolved, {} missing, {} errors",
        summary.total,
        summary.resolved,
        summary.missing,
        summary.errors
    );

    Ok(summary.exit_code())
}

/// Resolve every selected container of every manifest
fn resolve_manifests(
    manifests: &[PathBuf],
    resolver: &ReportResolver,
    config: &RunConfig,
    query: &dyn TreeQuery,
) -> (Vec<ResolutionRecord>, RunSummary) {
    let mut records = Vec::new();
    let mut summary = RunSummary::new();

    for (index, manifest) in manifests.iter().enumerate() {
        let file_num = index + 1;

        let descriptor = match load_workload(manifest) {
            Ok(descriptor) => descriptor,
            Err(message) => {
                summary.errors += 1;
                if !config.quiet {
                    println!(
                        "[{}/{}] \x1b[31m✗\x1b[0m {} (ERROR: {})",
                        file_num,
                        manifests.len(),
                        manifest.display(),
                        message
                    );
                }
                log::error!("cannot resolve {}: {}", manifest.display(), message);
                records.push(ResolutionRecord {
                    source: manifest.clone(),
                    kind: String::new(),
                    workload: String::new(),
                    namespace: String::new(),
                    container: String::new(),
                    outcome: ResolutionOutcome::Error(message),
                });
                continue;
            }
        };

        let selected: Vec<String> = match &config.container {
            Some(wanted) => descriptor
                .containers
                .iter()
                .filter(|c| &c.name == wanted)
                .map(|c| c.name.clone())
                .collect(),
            None => descriptor.containers.iter().map(|c| c.name.clone()).collect(),
        };

        if selected.is_empty() {
            let message = match &config.container {
                Some(wanted) => format!("container '{}' not found in workload", wanted),
                None => "workload has no containers".to_string(),
            };
            summary.errors += 1;
            if !config.quiet {
                println!(
                    "[{}/{}] \x1b[31m✗\x1b[0m {} (ERROR: {})",
                    file_num,
                    manifests.len(),
                    manifest.display(),
                    message
                );
            }
            records.push(ResolutionRecord {
                source: manifest.clone(),
                kind: descriptor.kind.clone(),
                workload: descriptor.name.clone(),
                namespace: descriptor.namespace.clone(),
                container: config.container.clone().unwrap_or_default(),
                outcome: ResolutionOutcome::Error(message),
            });
            continue;
        }

        for container in selected {
            summary.total += 1;

            let outcome = match resolver.resolve(&descriptor, &container, config.mode, query) {
                Resolution::Found { locator, strategy } => {
                    summary.resolved += 1;
                    ResolutionOutcome::Resolved { locator, strategy }
                }
                Resolution::NotFound => {
                    summary.missing += 1;
                    ResolutionOutcome::NotFound
                }
            };

            let record = ResolutionRecord {
                source: manifest.clone(),
                kind: descriptor.kind.clone(),
                workload: descriptor.name.clone(),
                namespace: descriptor.namespace.clone(),
                container,
                outcome,
            };

            if !config.quiet {
                output::print_progress_record(file_num, manifests.len(), &record);
            }

            records.push(record);
        }
    }

    (records, summary)
}

/// Read and normalize one workload manifest
fn load_workload(path: &Path) -> Result<locator_kit::workload::WorkloadDescriptor, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let manifest: serde_json::Value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    describe(&manifest).map_err(|e| e.to_string())
}

/// Load the optional TOML config file
fn load_agent_config(config: &RunConfig) -> Result<AgentConfig, ResolveError> {
    match &config.config_file {
        Some(path) => AgentConfig::load(path).map_err(ResolveError::Config),
        None => Ok(AgentConfig::default()),
    }
}

/// Build the tree-query implementation for the selected mode
///
/// Deterministic-only runs never touch the network, so they get a
/// query that always reports an empty tree.
fn build_query(
    config: &RunConfig,
    agent_config: &AgentConfig,
) -> Result<Box<dyn TreeQuery>, ResolveError> {
    if config.mode == LookupMode::DeterministicOnly {
        return Ok(Box::new(StaticTree::default()));
    }

    let server = config
        .server
        .clone()
        .or_else(|| agent_config.server.url.clone())
        .ok_or(ResolveError::MissingServer)?;
    let app = config.app.clone().ok_or(ResolveError::MissingApp)?;

    let timeout = std::time::Duration::from_secs(agent_config.server.timeout_secs);
    let mut client = ArgoClient::with_timeout(server, app, timeout);

    if let Some(token_env) = &agent_config.server.token_env {
        match std::env::var(token_env) {
            Ok(token) => client = client.with_token(token),
            Err(_) => log::warn!("token variable {} is not set; querying anonymously", token_env),
        }
    }

    Ok(Box::new(client))
}

/// Save output to file
fn save_output(records: &[ResolutionRecord], config: &RunConfig) -> Result<(), ResolveError> {
    let output_path = match &config.output_file {
        Some(path) => path,
        None => return Ok(()), // No output file specified, nothing to do
    };

    let rendered =
        output::build_output(records, config.output_format).map_err(ResolveError::Output)?;

    std::fs::write(output_path, &rendered)
        .map_err(|e| ResolveError::WriteFile(output_path.display().to_string(), e))?;

    Ok(())
}

/// Print execution information
fn print_execution_info(summary: &RunSummary, config: &RunConfig) {
    println!("────────────────────────────────────────────────────────────────────────────────");
    println!("  Duration:     {:.2}s", summary.duration.as_secs_f64());
    println!(
        "  Containers:   {} total, {} resolved, {} missing",
        summary.total, summary.resolved, summary.missing
    );
    if let Some(output_path) = &config.output_file {
        println!(
            "  Output:       {} ({})",
            output_path.display(),
            config.output_format
        );
    }
    println!("────────────────────────────────────────────────────────────────────────────────");
    println!();
}

/// Errors that can occur during a resolution run
#[derive(Debug)]
pub enum ResolveError {
    /// Failed to load the config file
    Config(ConfigError),
    /// tree/auto mode without a server URL
    MissingServer,
    /// tree/auto mode without an application name
    MissingApp,
    /// Failed to generate output
    Output(output::OutputError),
    /// Failed to write output file
    WriteFile(String, std::io::Error),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Config(e) => write!(f, "Config loading failed: {}", e),
            ResolveError::MissingServer => {
                write!(f, "tree lookup needs --server (or [server].url in the config file)")
            }
            ResolveError::MissingApp => write!(f, "tree lookup needs --app"),
            ResolveError::Output(e) => write!(f, "Output generation failed: {}", e),
            ResolveError::WriteFile(path, e) => write!(f, "Failed to write {}: {}", path, e),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Config(e) => Some(e),
            ResolveError::Output(e) => Some(e),
            ResolveError::WriteFile(_, e) => Some(e),
            ResolveError::MissingServer | ResolveError::MissingApp => None,
        }
    }
}
