//! Scenario registry.
//!
//! Every benchmark scenario is registered once under its name and run by
//! the generic harness in [`crate::utils`]; the CLI never needs to know
//! which kernel or decision policy a scenario uses.

use crate::utils::timer::{Variant, VariantResult};

/// Result from running a variant benchmark
pub type BenchmarkResult = VariantResult;

/// A timed closure for one implementation variant
pub type VariantClosure<'a> = Variant<'a>;

/// Trait that all registered scenarios implement
pub trait AlgorithmRunner: Send + Sync {
    /// Name of the scenario (e.g., "branch_prediction_random_vals")
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Category: the kernel under test ("branching" or "branchless")
    fn category(&self) -> &'static str;

    /// Names of the implementation variants that will be measured
    fn available_variants(&self) -> Vec<&'static str>;

    /// Generate inputs of `size` elements and return one timed closure per
    /// implementation variant. Input generation happens here, outside of
    /// any timed region.
    fn get_variant_closures<'a>(&'a self, size: usize) -> Vec<VariantClosure<'a>>;

    /// Verify every implementation variant against the reference kernel
    fn verify(&self) -> Result<(), String>;
}

/// Registry of all scenarios, in registration order
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn AlgorithmRunner>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    pub fn register<A: AlgorithmRunner + 'static>(&mut self, algo: A) {
        self.algorithms.push(Box::new(algo));
    }

    pub fn all(&self) -> &[Box<dyn AlgorithmRunner>] {
        &self.algorithms
    }

    /// Find a scenario by exact name
    pub fn find(&self, name: &str) -> Option<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
    }

    /// Scenarios whose name contains `pattern` (all when `pattern` is empty)
    pub fn matching(&self, pattern: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.name().contains(pattern))
            .map(|a| a.as_ref())
            .collect()
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    /// Scenarios measuring the given kernel
    pub fn by_category(&self, category: &str) -> Vec<&dyn AlgorithmRunner> {
        self.algorithms
            .iter()
            .filter(|a| a.category() == category)
            .map(|a| a.as_ref())
            .collect()
    }

    /// Scenarios measuring `kernel` (any kernel when `None`) whose name
    /// contains `pattern`, in registration order.
    ///
    /// Fails when nothing is left, listing every registered name.
    pub fn select(
        &self,
        kernel: Option<&str>,
        pattern: &str,
    ) -> Result<Vec<&dyn AlgorithmRunner>, String> {
        let selected: Vec<&dyn AlgorithmRunner> = self
            .algorithms
            .iter()
            .filter(|a| kernel.map_or(true, |k| a.category() == k))
            .filter(|a| a.name().contains(pattern))
            .map(|a| a.as_ref())
            .collect();

        if selected.is_empty() {
            return Err(format!(
                "no scenario matches the filter; available: {}",
                self.list_names().join(", ")
            ));
        }
        Ok(selected)
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all scenarios
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    for scenario in crate::control_flow::branch_prediction::scenarios() {
        registry.register(crate::control_flow::branch_prediction::ScenarioRunner::new(scenario));
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_seven_scenarios_in_order() {
        let registry = build_registry();
        assert_eq!(
            registry.list_names(),
            [
                "branch_prediction_random_vals",
                "branch_prediction_30_percent_true",
                "branch_prediction_70_percent_true",
                "branch_prediction_almost_always_true",
                "branch_prediction_always_true",
                "branchless_random_vals",
                "branchless_always_true",
            ]
        );
    }

    #[test]
    fn test_find_and_filter() {
        let registry = build_registry();
        assert!(registry.find("branchless_random_vals").is_some());
        assert!(registry.find("branchless").is_none());

        assert_eq!(registry.matching("always_true").len(), 3);
        assert_eq!(registry.matching("").len(), 7);
        assert!(registry.matching("no_such_scenario").is_empty());
    }

    fn names(selected: &[&dyn AlgorithmRunner]) -> Vec<&'static str> {
        selected.iter().map(|a| a.name()).collect()
    }

    #[test]
    fn test_select_by_filter_only() {
        let registry = build_registry();
        let selected = registry.select(None, "random_vals").unwrap();
        assert_eq!(
            names(&selected),
            ["branch_prediction_random_vals", "branchless_random_vals"]
        );
        assert_eq!(registry.select(None, "").unwrap().len(), 7);
    }

    #[test]
    fn test_select_by_kernel_only() {
        let registry = build_registry();
        let selected = registry.select(Some("branchless"), "").unwrap();
        assert_eq!(
            names(&selected),
            ["branchless_random_vals", "branchless_always_true"]
        );
        assert_eq!(registry.select(Some("branching"), "").unwrap().len(), 5);
    }

    #[test]
    fn test_select_kernel_and_filter_intersect() {
        let registry = build_registry();
        let selected = registry.select(Some("branching"), "always_true").unwrap();
        assert_eq!(
            names(&selected),
            [
                "branch_prediction_almost_always_true",
                "branch_prediction_always_true",
            ]
        );
    }

    #[test]
    fn test_select_without_match_fails() {
        let registry = build_registry();
        let err = registry.select(None, "no_such_scenario").err().unwrap();
        assert!(err.contains("branchless_always_true"), "{err}");

        // Filter matches, but only scenarios of the other kernel
        assert!(registry.select(Some("branchless"), "30_percent").is_err());
    }

    #[test]
    fn test_by_category() {
        let registry = build_registry();
        assert_eq!(registry.by_category("branching").len(), 5);
        assert_eq!(registry.by_category("branchless").len(), 2);
    }
}
