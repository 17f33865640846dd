//! Criterion harness for the seven branch prediction scenarios.
//!
//! Each scenario is registered under its own name with the input size as
//! parameter and reports elements per second.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use branch_prediction_bench::control_flow::branch_prediction::{scenarios, DEFAULT_INPUT_SIZE};
use branch_prediction_bench::utils::consume;

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("branch_prediction");
    group
        .sample_size(20)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5));

    for scenario in scenarios() {
        let n = DEFAULT_INPUT_SIZE;
        // Generated once, outside of the measured closure.
        let inputs = scenario.generate_inputs(n);
        let kernel = scenario.kernel.reference();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new(scenario.name, n), &inputs, |b, inputs| {
            b.iter(|| {
                let (a, v, d) = black_box(inputs.as_slices());
                consume(kernel(a, v, d))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scenarios);
criterion_main!(benches);
