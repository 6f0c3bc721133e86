//! Console output formatting
//!
//! Provides formatted console output for resolution results.

use crate::resolver::{ResolutionOutcome, ResolutionRecord};

use super::{strategy_label, EMPTY_STATE};

/// Print a one-line progress indicator for a freshly resolved record
pub fn print_progress_record(file_num: usize, total_files: usize, record: &ResolutionRecord) {
    match &record.outcome {
        ResolutionOutcome::Resolved { locator, .. } => {
            println!(
                "[{}/{}] \x1b[32m✓\x1b[0m {} :: {} -> {}",
                file_num,
                total_files,
                record.source.display(),
                record.container,
                locator.name
            );
        }
        ResolutionOutcome::NotFound => {
            println!(
                "[{}/{}] \x1b[33m○\x1b[0m {} :: {} ({})",
                file_num,
                total_files,
                record.source.display(),
                record.container,
                EMPTY_STATE
            );
        }
        ResolutionOutcome::Error(message) => {
            println!(
                "[{}/{}] \x1b[31m✗\x1b[0m {} :: {} (ERROR: {})",
                file_num,
                total_files,
                record.source.display(),
                record.container,
                message
            );
        }
    }
}

/// Print resolution results to console in a human-readable format
pub fn print_results(records: &[ResolutionRecord]) {
    if records.is_empty() {
        return;
    }

    println!();
    println!("╔═══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                           RESOLUTION RESULTS                                  ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════════╝");
    println!();

    for (index, record) in records.iter().enumerate() {
        print_record(index + 1, records.len(), record);
    }

    print_summary_table(records);
}

/// Print a single resolution record
fn print_record(num: usize, total: usize, record: &ResolutionRecord) {
    println!("┌───────────────────────────────────────────────────────────────────────────────┐");
    println!(
        "│ Resolution {}/{}: {} {}/{}",
        num, total, record.kind, record.namespace, record.workload
    );
    println!("├───────────────────────────────────────────────────────────────────────────────┤");
    println!("│ Container:   {}", record.container);

    match &record.outcome {
        ResolutionOutcome::Resolved { locator, strategy } => {
            println!("│ Status:      \x1b[32m✓ RESOLVED\x1b[0m ({})", strategy_label(*strategy));
            println!("│ Report:      {}", locator.name);
            println!("│ Query:       {}", locator.resource_query());
        }
        ResolutionOutcome::NotFound => {
            println!("│ Status:      \x1b[33m○ NOT FOUND\x1b[0m");
            println!("│ Note:        {}", EMPTY_STATE);
        }
        ResolutionOutcome::Error(message) => {
            println!("│ Status:      \x1b[31m✗ ERROR\x1b[0m");
            println!("│ Reason:      {}", message);
        }
    }

    println!("└───────────────────────────────────────────────────────────────────────────────┘");
    println!();
}

/// Print summary table
fn print_summary_table(records: &[ResolutionRecord]) {
    let total = records.len();
    let resolved = records
        .iter()
        .filter(|r| matches!(r.outcome, ResolutionOutcome::Resolved { .. }))
        .count();
    let missing = records
        .iter()
        .filter(|r| matches!(r.outcome, ResolutionOutcome::NotFound))
        .count();
    let errors = total - resolved - missing;

    println!("  SUMMARY");
    println!("  ───────────────────────────────");
    println!("  Total:      {}", total);
    println!("  Resolved:   \x1b[32m{}\x1b[0m", resolved);
    println!("  Not found:  \x1b[33m{}\x1b[0m", missing);
    println!("  Errors:     \x1b[31m{}\x1b[0m", errors);
    println!();
}
