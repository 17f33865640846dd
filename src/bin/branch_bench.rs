//! CLI for running the branch prediction scenarios.
//!
//! Usage:
//!   branch-bench                      # Run all scenarios
//!   branch-bench --list               # List scenarios
//!   branch-bench branchless           # Run scenarios whose name contains "branchless"
//!   branch-bench --kernel branching   # Run only the branching kernel
//!   branch-bench --sizes 65536,1048576 --runs 50

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use branch_prediction_bench::control_flow::branch_prediction::DEFAULT_INPUT_SIZE;
use branch_prediction_bench::registry::build_registry;
use branch_prediction_bench::utils::runner::{check_run_args, export_csv, run_scenarios};
use branch_prediction_bench::utils::timer::{PinStrategy, TimingConfig};
use branch_prediction_bench::utils::tui;

const DEFAULT_TRACE_FILTER: &str = "branch_prediction_bench=info,branch_bench=info";

#[derive(Debug, Parser)]
#[command(
    name = "branch-bench",
    version,
    about = "Branching vs branchless accumulation under different decision distributions"
)]
struct CliArgs {
    /// Only run scenarios whose name contains this string
    #[arg(value_name = "FILTER")]
    filter: Option<String>,

    /// List all available scenarios and exit
    #[arg(short, long)]
    list: bool,

    /// Only run scenarios measuring this kernel
    #[arg(long, value_enum)]
    kernel: Option<KernelArg>,

    /// Comma-separated input sizes (elements per sequence)
    #[arg(long, value_delimiter = ',', default_values_t = [DEFAULT_INPUT_SIZE])]
    sizes: Vec<usize>,

    /// Measured runs per implementation variant
    #[arg(short, long, default_value_t = 30)]
    runs: usize,

    /// Unmeasured warmup runs per implementation variant
    #[arg(long, default_value_t = 3)]
    warmup: usize,

    /// Seed for the randomized execution schedule (default: time-based)
    #[arg(long)]
    seed: Option<u64>,

    /// CPU pinning strategy
    #[arg(long, value_enum, default_value_t = PinArg::PerExecution)]
    pin: PinArg,

    /// Export per-variant statistics to a CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Skip the correctness check that runs before measuring
    #[arg(long)]
    skip_verify: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KernelArg {
    Branching,
    Branchless,
}

impl KernelArg {
    fn category(self) -> &'static str {
        match self {
            KernelArg::Branching => "branching",
            KernelArg::Branchless => "branchless",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PinArg {
    Global,
    PerExecution,
}

impl From<PinArg> for PinStrategy {
    fn from(arg: PinArg) -> Self {
        match arg {
            PinArg::Global => PinStrategy::Global,
            PinArg::PerExecution => PinStrategy::PerExecution,
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_FILTER));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let registry = build_registry();

    let pattern = args.filter.as_deref().unwrap_or("");
    let selected = registry
        .select(args.kernel.map(KernelArg::category), pattern)
        .map_err(anyhow::Error::msg)?;

    if args.list {
        tui::print_available_scenarios(&selected);
        return Ok(());
    }

    let config = TimingConfig {
        runs_per_variant: args.runs,
        warmup_iterations: args.warmup,
        pin_strategy: args.pin.into(),
        seed: args.seed,
    };
    check_run_args(&args.sizes, &config).map_err(anyhow::Error::msg)?;

    if args.skip_verify {
        warn!("correctness check skipped");
    } else {
        for algo in &selected {
            algo.verify()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("scenario '{}' failed verification", algo.name()))?;
        }
        info!(scenarios = selected.len(), "all implementation variants verified");
    }

    tui::print_header();

    let reports = run_scenarios(&selected, &args.sizes, &config);

    for algo in &selected {
        tui::print_scenario_info_box(*algo);
        for report in reports.iter().filter(|r| r.scenario == algo.name()) {
            tui::print_results_table(report);
        }
    }
    tui::print_summary(&reports);

    if let Some(path) = &args.csv {
        export_csv(path, &reports)
            .with_context(|| format!("failed to export CSV to {}", path.display()))?;
        println!("  Raw data exported to: {}", path.display());
        println!();
    }

    println!("Note: Speedup is relative to the first variant (usually 'original').");
    Ok(())
}
