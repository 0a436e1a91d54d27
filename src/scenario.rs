//! Scenario runner for batch projections
//!
//! Each scenario is collected and projected from its own owned copy of the
//! inputs, so concurrent sessions never share state.

use rayon::prelude::*;

use crate::inputs::{collect, CollectedInputs, RawInputs};
use crate::projection::{project, ProjectionResult};

/// A scenario after collection and projection
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub inputs: CollectedInputs,
    pub result: ProjectionResult,
}

/// Runs projections for raw inputs that share a common base
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(base_inputs);
///
/// for yrs in [3, 5, 10] {
///     let outcome = runner.run(&RawInputs { yrs: Some(yrs), ..Default::default() });
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    /// Values applied wherever a scenario leaves a field unset
    base: RawInputs,
}

impl ScenarioRunner {
    pub fn new(base: RawInputs) -> Self {
        Self { base }
    }

    /// Run a single scenario layered over the base inputs
    pub fn run(&self, overrides: &RawInputs) -> ScenarioOutcome {
        let raw = self.base.clone().merge(overrides.clone());
        let inputs = collect(&raw);
        let result = project(&inputs);
        ScenarioOutcome { inputs, result }
    }

    /// Run many scenarios in parallel; results keep the input order
    pub fn run_batch(&self, scenarios: &[RawInputs]) -> Vec<ScenarioOutcome> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    pub fn base(&self) -> &RawInputs {
        &self.base
    }
}
