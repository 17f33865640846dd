//! # Branch Prediction: Branching vs Branchless Accumulation
//!
//! Both kernels compute the same value:
//!
//! ```text
//! calc = 0
//! for i in 0..n:
//!     calc = decisions[i] ? calc + values_a[i] : calc * values_b[i]
//! ```
//!
//! ## Key Concepts
//!
//! - **Branching**: a conditional jump per element. Cheap when the predictor
//!   guesses right, 15-20 cycles lost on every miss.
//! - **Branchless**: both candidates computed, the decision indexes a
//!   two-element array. No misses, but the multiply is always paid.
//!
//! ## Scenarios
//!
//! The branching kernel is run under five decision distributions (random,
//! 30% true, 70% true, almost always true, always true) and the branchless
//! kernel under two (random, always true). All inputs come from a generator
//! reseeded with the same constant, so runs are reproducible.

pub mod bench;
pub mod code;
pub mod input;
pub mod policy;
pub mod scenario;
pub mod test;

pub use code::{branching_kernel, branchless_kernel, Kernel, KernelFn};
pub use input::{InputTriple, DRAW_MAX, GENERATOR_SEED};
pub use policy::DecisionPolicy;
pub use scenario::{scenarios, Scenario, DEFAULT_INPUT_SIZE};

use crate::registry::{AlgorithmRunner, VariantClosure};

/// Registry entry for one [`Scenario`]
pub struct ScenarioRunner {
    scenario: Scenario,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }
}

impl AlgorithmRunner for ScenarioRunner {
    fn name(&self) -> &'static str {
        self.scenario.name
    }

    fn description(&self) -> &'static str {
        self.scenario.description
    }

    fn category(&self) -> &'static str {
        self.scenario.kernel.name()
    }

    fn available_variants(&self) -> Vec<&'static str> {
        self.scenario
            .kernel
            .implementations()
            .iter()
            .map(|v| v.name)
            .collect()
    }

    fn get_variant_closures<'a>(&'a self, size: usize) -> Vec<VariantClosure<'a>> {
        bench::variant_closures(&self.scenario, size)
    }

    fn verify(&self) -> Result<(), String> {
        test::verify_scenario(&self.scenario)
    }
}
