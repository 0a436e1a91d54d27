//! Budget Impact - projection of the budget effect of adopting a new intervention
//!
//! This library provides:
//! - Input collection with widget-style defaults and range clamping
//! - Yearly projection of cases, incremental cost, cumulative cost, and budget
//! - Text table, SVG chart, and CSV renderings of the result
//! - Batch evaluation of independent scenarios

pub mod error;
pub mod inputs;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{BiaError, Result};
pub use inputs::{collect, CollectedInputs, RawInputs};
pub use projection::{project, ProjectionResult, YearRecord};
pub use scenario::ScenarioRunner;
