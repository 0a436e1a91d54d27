//! Projection engine for budget impact over a multi-year horizon

mod growth;
mod engine;
mod records;

pub use growth::{average_growth, growth_rates};
pub use engine::{new_intervention_cases, project};
pub use records::{ProjectionResult, ProjectionSummary, YearRecord};
