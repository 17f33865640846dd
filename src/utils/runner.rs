//! Sequential execution of registered scenarios and CSV export.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::registry::{AlgorithmRunner, BenchmarkResult};
use crate::utils::bench::items_per_second;
use crate::utils::timer::{measure_variants, TimingConfig};

/// Results of one scenario at one input size
#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub scenario: &'static str,
    pub kernel: &'static str,
    pub size: usize,
    pub results: Vec<BenchmarkResult>,
}

impl ScenarioReport {
    /// The reference ("original") result, or the first one measured.
    pub fn reference(&self) -> Option<&BenchmarkResult> {
        self.results
            .iter()
            .find(|r| r.name == "original")
            .or_else(|| self.results.first())
    }
}

/// Reject run parameters that would produce no measurement.
pub fn check_run_args(sizes: &[usize], config: &TimingConfig) -> Result<(), String> {
    if sizes.is_empty() || sizes.contains(&0) {
        return Err("input sizes must be positive".to_string());
    }
    if config.runs_per_variant == 0 {
        return Err("--runs must be at least 1".to_string());
    }
    Ok(())
}

/// Run every scenario for every size, one after the other.
///
/// Inputs are generated per scenario and size and dropped before the next
/// one starts, so at most one input triple is alive at a time.
pub fn run_scenarios(
    algorithms: &[&dyn AlgorithmRunner],
    sizes: &[usize],
    config: &TimingConfig,
) -> Vec<ScenarioReport> {
    let mut reports = Vec::with_capacity(algorithms.len() * sizes.len());

    for algo in algorithms {
        for &size in sizes {
            debug!(scenario = algo.name(), size, "measuring");
            let variants = algo.get_variant_closures(size);
            let results = measure_variants(variants, size, config);
            reports.push(ScenarioReport {
                scenario: algo.name(),
                kernel: algo.category(),
                size,
                results,
            });
        }
    }

    reports
}

/// Export per-variant statistics to a CSV file
pub fn export_csv(path: &Path, reports: &[ScenarioReport]) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(
        file,
        "scenario,kernel,variant,compiler,input_size,runs,avg_ns,median_ns,min_ns,max_ns,std_dev_ns,items_per_sec,result"
    )?;

    let mut rows = 0usize;
    for report in reports {
        for r in &report.results {
            let compiler = if r.name.starts_with("c-") {
                crate::utils::C_COMPILER_NAME.unwrap_or("Unknown")
            } else {
                ""
            };

            writeln!(
                file,
                "{},{},{},{},{},{},{:.1},{},{},{},{},{},{}",
                report.scenario,
                report.kernel,
                r.name,
                compiler,
                report.size,
                r.runs,
                r.avg_nanos_f64,
                r.median_time.as_nanos(),
                r.min_time.as_nanos(),
                r.max_time.as_nanos(),
                r.std_dev.as_nanos(),
                items_per_second(report.size, r.avg_time)
                    .map(|v| format!("{:.0}", v))
                    .unwrap_or_default(),
                r.result_sample.map(|v| v.to_string()).unwrap_or_default()
            )?;
            rows += 1;
        }
    }

    file.flush()?;
    info!(path = %path.display(), rows, "raw timings exported");
    Ok(())
}
