//! Command-line interface parsing
//!
//! Handles argument parsing, validation, and help text generation.

use std::path::PathBuf;

use locator_kit::resolve::LookupMode;

use crate::config::{OutputFormat, RunConfig};

/// CLI parsing result
pub enum CliResult {
    /// Run resolution with this configuration
    Run(RunConfig),
    /// Show help and exit
    Help,
    /// Error with message
    Error(String),
}

/// Parse command-line arguments
pub fn parse_args(args: &[String]) -> CliResult {
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("report-agent");

    let mut input_path: Option<&str> = None;
    let mut output_file: Option<PathBuf> = None;
    let mut output_format = OutputFormat::Full;
    let mut server: Option<String> = None;
    let mut app: Option<String> = None;
    let mut container: Option<String> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut mode = LookupMode::DeterministicThenTree;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args.get(i).map(|s| s.as_str()) {
            Some("--help" | "-h") => {
                return CliResult::Help;
            }
            Some("--quiet" | "-q") => {
                quiet = true;
            }
            Some("--server" | "-s") => {
                i += 1;
                match args.get(i) {
                    Some(val) => server = Some(val.clone()),
                    None => return CliResult::Error("--server requires a URL".to_string()),
                }
            }
            Some("--app" | "-a") => {
                i += 1;
                match args.get(i) {
                    Some(val) => app = Some(val.clone()),
                    None => return CliResult::Error("--app requires a name".to_string()),
                }
            }
            Some("--container" | "-c") => {
                i += 1;
                match args.get(i) {
                    Some(val) => container = Some(val.clone()),
                    None => return CliResult::Error("--container requires a name".to_string()),
                }
            }
            Some("--config") => {
                i += 1;
                match args.get(i) {
                    Some(val) => config_file = Some(PathBuf::from(val)),
                    None => return CliResult::Error("--config requires a filename".to_string()),
                }
            }
            Some("--mode" | "-m") => {
                i += 1;
                match args.get(i).map(|s| s.as_str()) {
                    Some("deterministic") => mode = LookupMode::DeterministicOnly,
                    Some("tree") => mode = LookupMode::TreeOnly,
                    Some("auto") => mode = LookupMode::DeterministicThenTree,
                    Some(other) => {
                        return CliResult::Error(format!(
                            "Unknown mode '{}'. Use: deterministic, tree, auto",
                            other
                        ));
                    }
                    None => return CliResult::Error("--mode requires a value".to_string()),
                }
            }
            Some("--output" | "-o") => {
                i += 1;
                match args.get(i) {
                    Some(val) => output_file = Some(PathBuf::from(val)),
                    None => return CliResult::Error("--output requires a filename".to_string()),
                }
            }
            Some("--format" | "-f") => {
                i += 1;
                match args.get(i).map(|s| s.as_str()) {
                    Some("full") => output_format = OutputFormat::Full,
                    Some("summary") => output_format = OutputFormat::Summary,
                    Some("query") => output_format = OutputFormat::Query,
                    Some(other) => {
                        return CliResult::Error(format!(
                            "Unknown format '{}'. Use: full, summary, query",
                            other
                        ));
                    }
                    None => return CliResult::Error("--format requires a value".to_string()),
                }
            }
            Some(arg) if !arg.starts_with('-') => {
                input_path = Some(arg);
            }
            Some(arg) => {
                return CliResult::Error(format!("Unknown option: {}", arg));
            }
            None => break,
        }
        i += 1;
    }

    // Validate input path
    let input_path = match input_path {
        Some(p) => PathBuf::from(p),
        None => {
            return CliResult::Error(format!(
                "Missing input path\nUsage: {} [OPTIONS] <workload.json|directory>",
                program_name
            ));
        }
    };

    if !input_path.exists() {
        return CliResult::Error(format!("Path not found: {}", input_path.display()));
    }

    CliResult::Run(RunConfig {
        input_path,
        output_file,
        output_format,
        server,
        app,
        container,
        mode,
        config_file,
        quiet,
    })
}

/// Print full help text
pub fn print_help(program_name: &str) {
    println!("Report Locator Agent v{}", env!("CARGO_PKG_VERSION"));
    println!("Resolves vulnerability-report locators for workload containers\n");

    println!("USAGE:");
    println!(
        "    {} [OPTIONS] <workload.json>   Resolve one workload manifest",
        program_name
    );
    println!(
        "    {} [OPTIONS] <directory>       Resolve all .json manifests in directory",
        program_name
    );
    println!(
        "    {} --help                      Show this help message\n",
        program_name
    );

    println!("OPTIONS:");
    println!("    -h, --help                  Show this help message");
    println!("    -q, --quiet                 Suppress console output");
    println!("    -s, --server <url>          Argo CD server URL");
    println!("    -a, --app <name>            Argo CD application name");
    println!("    -c, --container <name>      Resolve only this container");
    println!("    -m, --mode <mode>           Lookup mode: auto (default), deterministic, tree");
    println!("        --config <file>         TOML config file (server, naming policy)");
    println!("    -o, --output <file>         Write results to a file (optional)");
    println!("    -f, --format <format>       Output format: full (default), summary, query");
    println!();

    println!("LOOKUP MODES:");
    println!("    deterministic   Reconstruct report names, never query the server");
    println!("    tree            Always query the live resource tree, never guess");
    println!("    auto            Reconstruct, then confirm or override via the tree");
    println!();

    println!("BEHAVIOR:");
    println!("    Results are always printed to the console (unless --quiet is set).");
    println!("    Use --output to additionally save results to a file.");
    println!("    tree and auto modes need --server and --app (or a config file).");
    println!();

    println!("EXIT CODES:");
    println!("    0    Every container resolved to a report locator");
    println!("    1    No report found for one or more containers");
    println!("    2    Execution error");
    println!();

    println!("EXAMPLES:");
    println!(
        "    {} -m deterministic workload.json              # Offline resolution",
        program_name
    );
    println!(
        "    {} -s https://argocd.local -a shop workload.json",
        program_name
    );
    println!(
        "    {} -a shop -s https://argocd.local -c sidecar -m tree workload.json",
        program_name
    );
    println!(
        "    {} --quiet -f query -o queries.txt /path/to/manifests/",
        program_name
    );
}
