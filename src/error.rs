//! Error types for the budget impact library
//!
//! The projection itself never fails; only the file boundaries
//! (scenario loading, CSV export) can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading scenarios or exporting results
#[derive(Debug, Error)]
pub enum BiaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed export file: {0}")]
    InvalidExport(String),

    #[error("No scenario files found in {}", .0.display())]
    NoScenarios(PathBuf),
}

pub type Result<T> = std::result::Result<T, BiaError>;
