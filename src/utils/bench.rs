//! Shared benchmark utilities.
//!
//! By default measurements use wall-clock time so throughput can be reported
//! in items per second. The `cpu_cycles` feature switches every measurement
//! to the CPU cycle counter.

use std::hint::black_box;
use std::sync::atomic::{compiler_fence, Ordering};
use std::time::Duration;

use tracing::debug;

// ============================================================================
// Measurement abstraction: cycles or time depending on feature flags
// ============================================================================

/// Measurement value type - cycles (u64) or Duration depending on feature
#[cfg(feature = "cpu_cycles")]
pub type Measurement = u64;

#[cfg(not(feature = "cpu_cycles"))]
pub type Measurement = Duration;

/// Opaque start point returned by [`now`]
#[cfg(feature = "cpu_cycles")]
pub type Instant = u64;

#[cfg(not(feature = "cpu_cycles"))]
pub type Instant = std::time::Instant;

/// Read current measurement (cycles or time)
#[cfg(feature = "cpu_cycles")]
#[inline(always)]
pub fn now() -> Instant {
    crate::utils::cycles::read_cycles()
}

#[cfg(not(feature = "cpu_cycles"))]
#[inline(always)]
pub fn now() -> Instant {
    std::time::Instant::now()
}

/// Calculate elapsed measurement
#[cfg(feature = "cpu_cycles")]
#[inline(always)]
pub fn elapsed(start: Instant) -> Measurement {
    crate::utils::cycles::read_cycles().saturating_sub(start)
}

#[cfg(not(feature = "cpu_cycles"))]
#[inline(always)]
pub fn elapsed(start: Instant) -> Measurement {
    start.elapsed()
}

/// Convert a measurement to raw units (nanoseconds or cycles)
#[cfg(feature = "cpu_cycles")]
pub fn to_nanos(m: Measurement) -> u64 {
    m
}

#[cfg(not(feature = "cpu_cycles"))]
pub fn to_nanos(m: Measurement) -> u64 {
    m.as_nanos() as u64
}

/// Get the measurement unit name
#[cfg(feature = "cpu_cycles")]
pub const fn unit_name() -> &'static str {
    #[cfg(target_arch = "aarch64")]
    {
        "ticks"
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        "cycles"
    }
}

#[cfg(not(feature = "cpu_cycles"))]
pub const fn unit_name() -> &'static str {
    "ns"
}

/// Time a block with the active measurement source.
///
/// Evaluates to `(Measurement, value)`.
#[macro_export]
macro_rules! measure {
    ($body:expr) => {{
        let start = $crate::utils::bench::now();
        let value = $body;
        let spent = $crate::utils::bench::elapsed(start);
        (spent, value)
    }};
}

// ============================================================================
// Optimization barriers
// ============================================================================

/// Keeps `value` observable to the optimizer and forbids moving memory
/// accesses across this point.
///
/// Equivalent of `DoNotOptimize` followed by `ClobberMemory`: without it the
/// accumulator of a kernel is dead and the whole loop can be deleted.
#[inline(always)]
pub fn consume<T>(value: T) -> T {
    let value = black_box(value);
    compiler_fence(Ordering::SeqCst);
    value
}

// ============================================================================
// Display helpers
// ============================================================================

/// Format a statistic stored as `Duration` (nanoseconds, or raw cycles when
/// `cpu_cycles` is enabled).
#[cfg(feature = "cpu_cycles")]
pub fn format_measurement(d: Duration) -> String {
    format!("{} {}", d.as_nanos(), unit_name())
}

#[cfg(not(feature = "cpu_cycles"))]
pub fn format_measurement(d: Duration) -> String {
    format!("{:.3?}", d)
}

/// Format the throughput of a run over `items` elements.
#[cfg(feature = "cpu_cycles")]
pub fn format_throughput(items: usize, avg: Duration) -> String {
    if items == 0 {
        return "-".to_string();
    }
    format!("{:.3} {}/item", avg.as_nanos() as f64 / items as f64, unit_name())
}

#[cfg(not(feature = "cpu_cycles"))]
pub fn format_throughput(items: usize, avg: Duration) -> String {
    match items_per_second(items, avg) {
        Some(rate) if rate >= 1e9 => format!("{:.2} G/s", rate / 1e9),
        Some(rate) if rate >= 1e6 => format!("{:.2} M/s", rate / 1e6),
        Some(rate) if rate >= 1e3 => format!("{:.2} K/s", rate / 1e3),
        Some(rate) => format!("{:.2} /s", rate),
        None => "-".to_string(),
    }
}

/// Items processed per second, `None` when nothing was measured.
pub fn items_per_second(items: usize, avg: Duration) -> Option<f64> {
    let secs = avg.as_secs_f64();
    if secs > 0.0 && items > 0 {
        Some(items as f64 / secs)
    } else {
        None
    }
}

// ============================================================================
// Scheduling
// ============================================================================

/// Seed used when the system clock reads before the Unix epoch
pub const FALLBACK_SEED: u64 = 0x1234_5678;

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as u64,
        Err(err) => {
            debug!(
                seed = FALLBACK_SEED,
                %err,
                "clock before epoch, using fallback schedule seed"
            );
            FALLBACK_SEED
        }
    }
}
