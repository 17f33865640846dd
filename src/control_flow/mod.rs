//! Control-flow micro-benchmarks.

pub mod branch_prediction;
