//! Timed closures for one scenario.

use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::code::KernelFn;
use super::input::InputTriple;
use super::scenario::Scenario;
use crate::registry::VariantClosure;
use crate::utils::bench::consume;

/// One full kernel pass inside the timed region.
///
/// The input slices go through `black_box` first, so nothing computed in a
/// previous run can be reused; the accumulator goes through [`consume`]
/// before the clock stops.
#[inline(always)]
pub fn timed_pass(func: KernelFn, inputs: &InputTriple) -> (crate::utils::Measurement, u64) {
    crate::measure!({
        let (a, b, d) = black_box(inputs.as_slices());
        consume(func(a, b, d))
    })
}

/// Generate the scenario inputs once and wrap every implementation of its
/// kernel in a timed closure sharing them.
pub fn variant_closures<'a>(scenario: &Scenario, size: usize) -> Vec<VariantClosure<'a>> {
    let started = Instant::now();
    let inputs = Arc::new(scenario.generate_inputs(size));
    debug!(
        scenario = scenario.name,
        size,
        true_ratio = inputs.true_ratio(),
        elapsed = ?started.elapsed(),
        "inputs generated"
    );

    scenario
        .kernel
        .implementations()
        .into_iter()
        .map(|v| {
            let inputs = Arc::clone(&inputs);
            let func = v.function;

            VariantClosure {
                name: v.name,
                description: v.description,
                run: Box::new(move || {
                    let (elapsed, calc) = timed_pass(func, &inputs);
                    (elapsed, Some(calc))
                }),
            }
        })
        .collect()
}
