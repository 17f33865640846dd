//! The benchmark scenarios: which kernel, under which decision policy.

use super::code::Kernel;
use super::input::{InputTriple, GENERATOR_SEED};
use super::policy::DecisionPolicy;

/// Elements per input sequence: 2^22, large enough that the decisions
/// cannot be memorized by the predictor and small enough to generate fast.
pub const DEFAULT_INPUT_SIZE: usize = 1 << 22;

/// A named (kernel, policy) pair, run at a given input size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub kernel: Kernel,
    pub policy: DecisionPolicy,
}

impl Scenario {
    /// Fresh inputs for this scenario, from a generator reseeded with
    /// [`GENERATOR_SEED`].
    pub fn generate_inputs(&self, n: usize) -> InputTriple {
        let policy = self.policy;
        InputTriple::generate(n, GENERATOR_SEED, |rng| policy.decide(rng))
    }

    /// Run the reference implementation of this scenario's kernel.
    pub fn run_reference(&self, inputs: &InputTriple) -> u64 {
        let (a, b, d) = inputs.as_slices();
        (self.kernel.reference())(a, b, d)
    }
}

/// All scenarios, in reporting order.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "branch_prediction_random_vals",
            description: "Branching, decisions random: the predictor is right about half the time",
            kernel: Kernel::Branching,
            policy: DecisionPolicy::Uniform,
        },
        Scenario {
            name: "branch_prediction_30_percent_true",
            description: "Branching, decisions true 30% of the time: ~70% predicted correctly",
            kernel: Kernel::Branching,
            policy: DecisionPolicy::ThirtyPercent,
        },
        Scenario {
            name: "branch_prediction_70_percent_true",
            description: "Branching, decisions true 70% of the time: still ~70% predicted correctly",
            kernel: Kernel::Branching,
            policy: DecisionPolicy::SeventyPercent,
        },
        Scenario {
            name: "branch_prediction_almost_always_true",
            description: "Branching, decisions true unless a draw is exactly zero",
            kernel: Kernel::Branching,
            policy: DecisionPolicy::AlmostAlways,
        },
        Scenario {
            name: "branch_prediction_always_true",
            description: "Branching, decisions always true: predicted once the pattern is learned",
            kernel: Kernel::Branching,
            policy: DecisionPolicy::Always,
        },
        Scenario {
            name: "branchless_random_vals",
            description: "Branchless, decisions random: both paths computed every element",
            kernel: Kernel::Branchless,
            policy: DecisionPolicy::Uniform,
        },
        Scenario {
            name: "branchless_always_true",
            description: "Branchless, decisions always true: cost independent of the pattern",
            kernel: Kernel::Branchless,
            policy: DecisionPolicy::Always,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seven_unique_scenarios() {
        let all = scenarios();
        assert_eq!(all.len(), 7);
        let names: HashSet<_> = all.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_scenario_kernels_and_policies() {
        let all = scenarios();
        let pairs: Vec<_> = all.iter().map(|s| (s.kernel, s.policy)).collect();
        assert_eq!(
            pairs,
            [
                (Kernel::Branching, DecisionPolicy::Uniform),
                (Kernel::Branching, DecisionPolicy::ThirtyPercent),
                (Kernel::Branching, DecisionPolicy::SeventyPercent),
                (Kernel::Branching, DecisionPolicy::AlmostAlways),
                (Kernel::Branching, DecisionPolicy::Always),
                (Kernel::Branchless, DecisionPolicy::Uniform),
                (Kernel::Branchless, DecisionPolicy::Always),
            ]
        );
    }

    #[test]
    fn test_generate_inputs_is_reproducible() {
        for scenario in scenarios() {
            assert_eq!(scenario.generate_inputs(512), scenario.generate_inputs(512));
        }
    }

    #[test]
    fn test_random_scenarios_share_inputs_across_kernels() {
        let all = scenarios();
        let branching = all.iter().find(|s| s.name == "branch_prediction_random_vals").unwrap();
        let branchless = all.iter().find(|s| s.name == "branchless_random_vals").unwrap();
        let inputs = branching.generate_inputs(4096);
        assert_eq!(inputs, branchless.generate_inputs(4096));
        assert_eq!(branching.run_reference(&inputs), branchless.run_reference(&inputs));
    }

    #[test]
    fn test_default_size() {
        assert_eq!(DEFAULT_INPUT_SIZE, 4_194_304);
    }
}
