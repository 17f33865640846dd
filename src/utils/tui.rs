//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use terminal_size::{terminal_size, Width};

use crate::registry::{AlgorithmRunner, BenchmarkResult};
use crate::utils::bench::{format_measurement, format_throughput};
use crate::utils::runner::ScenarioReport;

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Sorting priority of an implementation variant.
/// Order: original (0), other Rust (1), C (2), ASM (3)
fn variant_sort_key(result: &BenchmarkResult) -> (u8, String) {
    let name = result.name.to_lowercase();
    let group = if name == "original" {
        0
    } else if name.contains("asm") {
        3
    } else if name.starts_with("c-") {
        2
    } else {
        1
    };
    (group, name)
}

/// Sort variants: original first, then grouped by language (Rust, C, ASM)
pub fn sort_variants(results: &mut [BenchmarkResult]) {
    results.sort_by_key(variant_sort_key);
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Compare a variant's accumulator against the baseline's, bit for bit.
fn result_status(result: Option<u64>, baseline: Option<u64>) -> &'static str {
    match (result, baseline) {
        (Some(res), Some(base)) if res == base => "ok",
        (Some(_), Some(_)) => "MISMATCH",
        _ => "-",
    }
}

/// Print the scenario info box
pub fn print_scenario_info_box(algo: &dyn AlgorithmRunner) {
    let max_content_width = get_term_width().saturating_sub(4).max(40);

    let lines = [
        format!("Scenario: {}", algo.name()),
        format!("Kernel:   {}", algo.category()),
        algo.description().to_string(),
        format!("Variants: {}", algo.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);

    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == 3 {
            println!("├{}┤", border);
        }
        println!(
            "│ {:<width$} │",
            truncate(line, content_width),
            width = content_width
        );
    }
    println!("└{}┘", border);
    println!();
}

/// Print the results table of one scenario at one size
pub fn print_results_table(report: &ScenarioReport) {
    if report.results.is_empty() {
        return;
    }

    let mut results = report.results.clone();
    sort_variants(&mut results);

    let term_width = get_term_width();
    // 12+12+12+12+9+9+10 columns plus separators and indent
    let fixed_width = 86;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 76 + 7;

    let baseline_time = results[0].avg_time.as_nanos() as f64;
    let baseline_result = results[0].result_sample;

    println!(
        "  Size: {} ({} runs)",
        report.size,
        results[0].runs
    );
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>12} {:>9} {:>9} {:>10}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Throughput",
        "Speedup",
        "CV",
        "Result",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in &results {
        let speedup = baseline_time / result.avg_time.as_nanos().max(1) as f64;

        let status = result_status(result.result_sample, baseline_result);

        let display_name = match (result.name.starts_with("c-"), crate::utils::C_COMPILER_NAME) {
            (true, Some(c)) => format!("{} ({})", result.name, c),
            _ => result.name.clone(),
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>10}",
            truncate(&display_name, variant_col_width),
            format_measurement(result.avg_time),
            format_measurement(result.min_time),
            format_measurement(result.max_time),
            format_throughput(report.size, result.avg_time),
            speedup,
            result.cv() * 100.0,
            status,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print one line per scenario and size, comparing the reference
/// implementations against the first scenario.
pub fn print_summary(reports: &[ScenarioReport]) {
    let rows: Vec<(&ScenarioReport, &BenchmarkResult)> = reports
        .iter()
        .filter_map(|r| r.reference().map(|res| (r, res)))
        .collect();
    let Some((_, first)) = rows.first() else {
        return;
    };
    let baseline_time = first.avg_time.as_nanos() as f64;

    let name_width = rows
        .iter()
        .map(|(r, _)| r.scenario.len())
        .max()
        .unwrap_or(20);
    let table_width = name_width + 12 + 10 + 12 + 12 + 9 + 5;

    println!("  Summary (reference implementations)");
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<n_width$} {:>12} {:>10} {:>12} {:>12} {:>9}",
        "Scenario",
        "Kernel",
        "Size",
        "Average",
        "Throughput",
        "Speedup",
        n_width = name_width
    );
    println!("  {}", "─".repeat(table_width));
    for (report, result) in rows {
        println!(
            "  {:<n_width$} {:>12} {:>10} {:>12} {:>12} {:>8.2}x",
            report.scenario,
            report.kernel,
            report.size,
            format_measurement(result.avg_time),
            format_throughput(report.size, result.avg_time),
            baseline_time / result.avg_time.as_nanos().max(1) as f64,
            n_width = name_width
        );
    }
    println!();
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Branch Prediction Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the list of available scenarios
pub fn print_available_scenarios(algorithms: &[&dyn AlgorithmRunner]) {
    println!("Available scenarios:");
    println!();
    for algo in algorithms {
        println!(
            "  {:<38} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
    }
}
