//! Decision policies: how often the kernel takes the "add" path.

use std::fmt;

use rand::Rng;

use super::input::{draw, DRAW_MAX};

/// Threshold shared by the 30% and 70% policies.
const SKEW: f64 = 0.7;

/// Distribution of the decision variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionPolicy {
    /// Low bit of a raw draw: true half of the time, no pattern to learn.
    Uniform,
    /// Normalized draw above 0.7: true ~30% of the time.
    ThirtyPercent,
    /// Normalized draw above 0.3: true ~70% of the time.
    SeventyPercent,
    /// Raw draw strictly positive: false only on an exact zero draw.
    AlmostAlways,
    /// Constant true. Consumes no randomness.
    Always,
}

impl DecisionPolicy {
    /// Pick the next decision, drawing from `rng` unless the policy is
    /// constant.
    pub fn decide<R: Rng>(self, rng: &mut R) -> bool {
        match self {
            DecisionPolicy::Uniform => draw(rng) & 0x1 == 1,
            DecisionPolicy::ThirtyPercent => normalized(draw(rng)) > SKEW,
            DecisionPolicy::SeventyPercent => normalized(draw(rng)) > 1.0 - SKEW,
            DecisionPolicy::AlmostAlways => draw(rng) > 0,
            DecisionPolicy::Always => true,
        }
    }

    /// Nominal probability of a true decision.
    pub fn expected_true_ratio(self) -> f64 {
        match self {
            DecisionPolicy::Uniform => 0.5,
            DecisionPolicy::ThirtyPercent => 1.0 - SKEW,
            DecisionPolicy::SeventyPercent => SKEW,
            DecisionPolicy::AlmostAlways => 1.0 - 1.0 / (f64::from(DRAW_MAX) + 1.0),
            DecisionPolicy::Always => 1.0,
        }
    }

    /// Whether `decide` advances the generator.
    pub fn consumes_randomness(self) -> bool {
        !matches!(self, DecisionPolicy::Always)
    }
}

impl fmt::Display for DecisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecisionPolicy::Uniform => "uniform 50%",
            DecisionPolicy::ThirtyPercent => "30% true",
            DecisionPolicy::SeventyPercent => "70% true",
            DecisionPolicy::AlmostAlways => "almost always true",
            DecisionPolicy::Always => "always true",
        };
        f.write_str(label)
    }
}

#[inline]
fn normalized(raw: u32) -> f64 {
    f64::from(raw) / f64::from(DRAW_MAX)
}
