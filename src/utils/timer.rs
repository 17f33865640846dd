//! Timing loop shared by every scenario.
//!
//! - wall-clock time or CPU cycles (via the `cpu_cycles` feature)
//! - CPU core pinning for stable measurements
//! - randomized variant execution to avoid ordering bias
//!
//! The body of a [`Variant`] is one full kernel pass over the scenario
//! inputs; the timed region lives inside the closure so the dynamic call
//! is not part of the measurement.

use std::hint::black_box;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::bench::{time_seed, to_nanos, Measurement};
use super::cpu_affinity::CpuPinGuard;

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinStrategy {
    /// Pin once before all measurements of a scenario
    Global,
    /// Pin/unpin around each execution
    #[default]
    PerExecution,
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of measured runs per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of unmeasured runs per variant before measuring (default: 3)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Seed of the execution schedule; `None` draws one from the clock
    pub seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 3,
            pin_strategy: PinStrategy::default(),
            seed: None,
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    pub name: &'static str,
    pub description: &'static str,
    /// One timed execution: returns (measurement, optional result value).
    pub run: Box<dyn FnMut() -> (Measurement, Option<u64>) + 'a>,
}

/// Result from measuring a single variant
#[derive(Clone, Debug)]
pub struct VariantResult {
    pub name: String,
    pub description: String,
    /// Average measurement (cycles are stored as nanoseconds)
    pub avg_time: Duration,
    /// Precise average in nanoseconds/cycles
    pub avg_nanos_f64: f64,
    pub median_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub std_dev: Duration,
    /// Number of measured runs
    pub runs: usize,
    /// Items processed by one run
    pub items: usize,
    /// Result of the last run, for cross-variant comparison
    pub result_sample: Option<u64>,
}

impl VariantResult {
    /// Coefficient of variation of the measured runs.
    pub fn cv(&self) -> f64 {
        let avg = self.avg_time.as_nanos() as f64;
        if avg > 0.0 {
            self.std_dev.as_nanos() as f64 / avg
        } else {
            0.0
        }
    }
}

/// Measure multiple variants with randomized execution order.
///
/// 1. Warms up all variants
/// 2. Shuffles a (variant, run) schedule
/// 3. Executes the schedule under the configured pinning strategy
/// 4. Reduces the raw samples to a [`VariantResult`] per variant
pub fn measure_variants(
    mut variants: Vec<Variant>,
    items: usize,
    config: &TimingConfig,
) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let runs = config.runs_per_variant;

    for variant in &mut variants {
        for _ in 0..config.warmup_iterations {
            black_box((variant.run)());
        }
    }

    let seed = config.seed.unwrap_or_else(time_seed);
    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(runs))
        .collect();
    tasks.shuffle(&mut StdRng::seed_from_u64(seed));
    debug!(seed, tasks = tasks.len(), "execution schedule shuffled");

    let mut measurements: Vec<Vec<Measurement>> = (0..variants.len())
        .map(|_| Vec::with_capacity(runs))
        .collect();
    let mut result_samples: Vec<Option<u64>> = vec![None; variants.len()];

    let _global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];
        let _per_exec_pin =
            (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        let (elapsed_time, result) = (variant.run)();

        measurements[variant_idx].push(elapsed_time);
        result_samples[variant_idx] = result;
    }

    variants
        .into_iter()
        .enumerate()
        .map(|(idx, variant)| {
            let times = std::mem::take(&mut measurements[idx]);
            compute_variant_result(
                variant.name,
                variant.description,
                &times,
                items,
                result_samples[idx].take(),
            )
        })
        .collect()
}

/// Compute statistics from raw measurements
fn compute_variant_result(
    name: &'static str,
    description: &'static str,
    measurements: &[Measurement],
    items: usize,
    result_sample: Option<u64>,
) -> VariantResult {
    if measurements.is_empty() {
        return VariantResult {
            name: name.to_string(),
            description: description.to_string(),
            avg_time: Duration::ZERO,
            avg_nanos_f64: 0.0,
            median_time: Duration::ZERO,
            min_time: Duration::ZERO,
            max_time: Duration::ZERO,
            std_dev: Duration::ZERO,
            runs: 0,
            items,
            result_sample: None,
        };
    }

    let mut nanos: Vec<u64> = measurements.iter().map(|m| to_nanos(*m)).collect();
    nanos.sort_unstable();

    let min_ns = nanos[0];
    let max_ns = nanos[nanos.len() - 1];
    let median_ns = nanos[nanos.len() / 2];

    let sum: u64 = nanos.iter().sum();
    let avg_nanos_f64 = sum as f64 / nanos.len() as f64;

    let variance: f64 = nanos
        .iter()
        .map(|&n| {
            let diff = n as f64 - avg_nanos_f64;
            diff * diff
        })
        .sum::<f64>()
        / (nanos.len() - 1).max(1) as f64;

    VariantResult {
        name: name.to_string(),
        description: description.to_string(),
        avg_time: Duration::from_nanos(avg_nanos_f64 as u64),
        avg_nanos_f64,
        median_time: Duration::from_nanos(median_ns),
        min_time: Duration::from_nanos(min_ns),
        max_time: Duration::from_nanos(max_ns),
        std_dev: Duration::from_nanos(variance.sqrt() as u64),
        runs: nanos.len(),
        items,
        result_sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure;

    #[test]
    fn test_measure_variants_empty() {
        let results = measure_variants(vec![], 1000, &TimingConfig::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_measure_variants_single() {
        let variants = vec![Variant {
            name: "test",
            description: "Test variant",
            run: Box::new(|| {
                let (elapsed, _) = measure!(42);
                (elapsed, Some(42))
            }),
        }];

        let config = TimingConfig {
            runs_per_variant: 5,
            warmup_iterations: 2,
            pin_strategy: PinStrategy::Global,
            seed: Some(7),
        };

        let results = measure_variants(variants, 100, &config);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "test");
        assert_eq!(results[0].runs, 5);
        assert_eq!(results[0].items, 100);
        assert_eq!(results[0].result_sample, Some(42));
        assert!(results[0].min_time <= results[0].median_time);
        assert!(results[0].median_time <= results[0].max_time);
    }

    #[test]
    fn test_measure_variants_runs_each_variant_exactly() {
        use std::cell::Cell;

        let fast_calls = Cell::new(0usize);
        let slow_calls = Cell::new(0usize);

        let variants = vec![
            Variant {
                name: "fast",
                description: "Fast variant",
                run: Box::new(|| {
                    fast_calls.set(fast_calls.get() + 1);
                    let (elapsed, _) = measure!(1);
                    (elapsed, Some(1))
                }),
            },
            Variant {
                name: "slow",
                description: "Slow variant",
                run: Box::new(|| {
                    slow_calls.set(slow_calls.get() + 1);
                    let (elapsed, _) = measure!(vec![0u8; 1000]);
                    (elapsed, Some(2))
                }),
            },
        ];

        let config = TimingConfig {
            runs_per_variant: 5,
            warmup_iterations: 2,
            pin_strategy: PinStrategy::PerExecution,
            seed: Some(7),
        };

        let results = measure_variants(variants, 100, &config);
        assert_eq!(results.len(), 2);
        assert_eq!(fast_calls.get(), 7);
        assert_eq!(slow_calls.get(), 7);

        let fast = results.iter().find(|r| r.name == "fast").unwrap();
        let slow = results.iter().find(|r| r.name == "slow").unwrap();
        assert_eq!(fast.result_sample, Some(1));
        assert_eq!(slow.result_sample, Some(2));
    }

    #[test]
    fn test_zero_runs_reports_empty_result() {
        let variants = vec![Variant {
            name: "idle",
            description: "Never measured",
            run: Box::new(|| {
                let (elapsed, _) = measure!(0);
                (elapsed, Some(0))
            }),
        }];
        let config = TimingConfig {
            runs_per_variant: 0,
            warmup_iterations: 0,
            pin_strategy: PinStrategy::Global,
            seed: Some(1),
        };

        let results = measure_variants(variants, 10, &config);
        assert_eq!(results[0].runs, 0);
        assert_eq!(results[0].avg_time, Duration::ZERO);
        assert_eq!(results[0].cv(), 0.0);
    }
}
