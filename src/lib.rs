//! # Branch-Prediction-Bench
//!
//! Measures what a mispredicted branch costs by timing a branching and a
//! branchless version of the same accumulation loop under several decision
//! distributions.

pub mod control_flow;
pub mod registry;
pub mod utils;

pub use utils::runner::run_scenarios;
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::control_flow::branch_prediction::{
        scenarios, DecisionPolicy, InputTriple, Kernel, Scenario, DEFAULT_INPUT_SIZE,
    };
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
    pub use crate::utils::timer::{PinStrategy, TimingConfig};
}
