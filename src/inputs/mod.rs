//! Input collection: form values, validation, and scenario files

mod data;
mod collector;
pub mod loader;

pub use data::{
    CollectedInputs, CostDelta, HistoricalBudget, PopulationMode, TargetPopulation,
    UptakeSchedule, DEFAULT_UPTAKE_PCT, HISTORY_YEARS,
};
pub use collector::{collect, RawInputs, DEFAULT_PREVALENCE_PCT, MAX_HORIZON_YEARS};
pub use loader::{load_scenario, load_scenario_from_reader, load_scenarios};
