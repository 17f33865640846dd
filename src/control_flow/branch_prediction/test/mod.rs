//! Correctness checks for the accumulation kernels.

use super::code::branching_kernel;
use super::scenario::Scenario;

/// Non-power-of-two size so no implementation gets away with assuming
/// whole blocks.
const VERIFY_SIZE: usize = 1023;

/// Check every implementation of the scenario's kernel against the
/// branching reference on the scenario's own inputs.
pub fn verify_scenario(scenario: &Scenario) -> Result<(), String> {
    let inputs = scenario.generate_inputs(VERIFY_SIZE);
    let (a, b, d) = inputs.as_slices();
    let expected = branching_kernel(a, b, d);

    for variant in scenario.kernel.implementations() {
        let actual = (variant.function)(a, b, d);
        if actual != expected {
            return Err(format!(
                "Variant '{}' of {} failed on {} elements: expected {}, got {}",
                variant.name, scenario.name, VERIFY_SIZE, expected, actual
            ));
        }

        let empty = (variant.function)(&[], &[], &[]);
        if empty != 0 {
            return Err(format!(
                "Variant '{}' of {} returned {} on empty input",
                variant.name, scenario.name, empty
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_flow::branch_prediction::input::InputTriple;
    use crate::control_flow::branch_prediction::code::{branchless_kernel, Kernel, KernelFn};
    use crate::control_flow::branch_prediction::scenario::scenarios;

    /// Every implementation of both kernels.
    fn all_implementations() -> Vec<(&'static str, KernelFn)> {
        [Kernel::Branching, Kernel::Branchless]
            .into_iter()
            .flat_map(|k| {
                k.implementations()
                    .into_iter()
                    .map(move |v| (k.name(), v.function))
            })
            .collect()
    }

    fn run(func: KernelFn, inputs: &InputTriple) -> u64 {
        let (a, b, d) = inputs.as_slices();
        func(a, b, d)
    }

    #[test]
    fn test_all_scenarios_verify() {
        for scenario in scenarios() {
            verify_scenario(&scenario).expect("all variants should match the reference");
        }
    }

    #[test]
    fn test_worked_example() {
        // 0 -> +1 = 1 -> *10 = 10 -> +3 = 13 -> *10 = 130
        let inputs =
            InputTriple::new(vec![1, 2, 3, 4], vec![10, 10, 10, 10], vec![1, 0, 1, 0]).unwrap();
        for (kernel, func) in all_implementations() {
            assert_eq!(run(func, &inputs), 130, "{} implementation", kernel);
        }
    }

    #[test]
    fn test_empty_input_is_zero() {
        for (kernel, func) in all_implementations() {
            assert_eq!(func(&[], &[], &[]), 0, "{} implementation", kernel);
        }
    }

    #[test]
    fn test_all_true_is_sum_of_a() {
        let inputs = InputTriple::generate(5000, 42, |_| true);
        let sum = inputs.values_a.iter().fold(0u64, |acc, &v| acc.wrapping_add(v));
        for (kernel, func) in all_implementations() {
            assert_eq!(run(func, &inputs), sum, "{} implementation", kernel);
        }
    }

    #[test]
    fn test_all_false_is_zero() {
        let inputs = InputTriple::generate(5000, 42, |_| false);
        for (kernel, func) in all_implementations() {
            assert_eq!(run(func, &inputs), 0, "{} implementation", kernel);
        }
    }

    #[test]
    fn test_nonzero_decisions_take_add_path() {
        let inputs =
            InputTriple::new(vec![5, 6, 7], vec![3, 3, 3], vec![7, 0, 255]).unwrap();
        // 0 + 5 = 5 -> 5 * 3 = 15 -> 15 + 7 = 22
        for (kernel, func) in all_implementations() {
            assert_eq!(run(func, &inputs), 22, "{} implementation", kernel);
        }
    }

    #[test]
    fn test_kernels_agree_on_random_inputs() {
        for seed in 0..32u64 {
            let inputs = InputTriple::generate(777, seed, |rng| {
                crate::control_flow::branch_prediction::input::draw(rng) % 5 != 0
            });
            let expected = run(branching_kernel, &inputs);
            assert_eq!(run(branchless_kernel, &inputs), expected, "seed {}", seed);
        }
    }

    #[test]
    fn test_wrapping_arithmetic() {
        let inputs = InputTriple::new(
            vec![u64::MAX, 2, 0],
            vec![0, u64::MAX, 3],
            vec![1, 1, 0],
        )
        .unwrap();
        // MAX + 2 wraps to 1, then 1 * 3 = 3
        for (kernel, func) in all_implementations() {
            assert_eq!(run(func, &inputs), 3, "{} implementation", kernel);
        }
    }
}
