//! # Report Locator Agent
//!
//! Resolves vulnerability-report locators for the containers of
//! Kubernetes workloads managed by an Argo CD application.
//!
//! ## Usage
//!
//! ```bash
//! # Resolve every container of one workload manifest
//! report_agent --server https://argocd.example.com --app shop workload.json
//!
//! # Resolve a directory of manifests without touching the network
//! report_agent --mode deterministic /path/to/manifests/
//!
//! # Emit fetch query strings for the resolved reports
//! report_agent -a shop -s https://argocd.example.com -f query -o queries.txt workload.json
//! ```
//!
//! ## Output Formats
//!
//! - **full** (default): one JSON envelope with every resolution
//! - **summary**: resolved/missing counts only
//! - **query**: one report-fetch query string per resolved container

mod cli;
mod config;
mod discovery;
mod output;
mod resolver;

use cli::{parse_args, print_help, CliResult};

fn main() {
    // Initialize logging
    if let Err(e) = env_logger::try_init() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("report-agent");

    let exit_code = match parse_args(&args) {
        CliResult::Help => {
            print_help(program_name);
            0
        }
        CliResult::Error(msg) => {
            eprintln!("Error: {}", msg);
            2
        }
        CliResult::Run(config) => match run(config) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
    };

    std::process::exit(exit_code);
}

/// Run a resolution pass with the given configuration
fn run(config: config::RunConfig) -> Result<i32, Box<dyn std::error::Error>> {
    // Discover workload manifests
    let manifests = discovery::discover_workload_files(&config.input_path)?;

    if manifests.is_empty() {
        if !config.quiet {
            println!("No workload manifests found in: {}", config.input_path.display());
        }
        return Ok(0);
    }

    let exit_code = resolver::run(&config, &manifests)?;

    Ok(exit_code)
}
