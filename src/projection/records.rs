//! Year-by-year output structures for budget impact projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Projection year (1-indexed, "Año 1" is the current year)
    pub year: u32,

    // Cases
    pub casos_actual: u64,
    pub casos_nueva: u64,

    // Costs (U.M.)
    pub costo_incremental: f64,
    pub acumulado: f64,

    /// Projected budget including this year's incremental cost
    pub pim_proyectado: f64,

    /// Cumulative cost over projected budget; `None` when the budget is not positive
    pub impacto_pim: Option<f64>,
}

impl YearRecord {
    /// Display label, e.g. "Año 3"
    pub fn label(&self) -> String {
        format!("Año {}", self.year)
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Cost difference per treated case
    pub delta: f64,

    /// Eligible cases per year
    pub casos_anio: u64,

    /// Mean annual growth of the historical budget (3 decimals)
    pub avg_growth: f64,

    /// Yearly rows, one per horizon year
    pub years: Vec<YearRecord>,
}

impl ProjectionResult {
    pub fn new(delta: f64, casos_anio: u64, avg_growth: f64) -> Self {
        Self {
            delta,
            casos_anio,
            avg_growth,
            years: Vec::new(),
        }
    }

    /// Add a year row
    pub fn add_row(&mut self, row: YearRecord) {
        self.years.push(row);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn year_labels(&self) -> Vec<String> {
        self.years.iter().map(YearRecord::label).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_casos_nueva = self
            .years
            .iter()
            .map(|r| r.casos_nueva)
            .fold(0u64, u64::saturating_add);
        let final_acumulado = self.years.last().map(|r| r.acumulado).unwrap_or(0.0);
        let final_impacto = self.years.last().and_then(|r| r.impacto_pim);

        ProjectionSummary {
            years: self.years.len() as u32,
            total_casos_nueva,
            final_acumulado,
            final_impacto,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_casos_nueva: u64,
    pub final_acumulado: f64,
    pub final_impacto: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: u32, acumulado: f64, impacto_pim: Option<f64>) -> YearRecord {
        YearRecord {
            year,
            casos_actual: 0,
            casos_nueva: 10,
            costo_incremental: 0.0,
            acumulado,
            pim_proyectado: 0.0,
            impacto_pim,
        }
    }

    #[test]
    fn test_summary_of_empty_result() {
        let summary = ProjectionResult::new(0.0, 0, 0.0).summary();
        assert_eq!(summary.years, 0);
        assert_eq!(summary.final_acumulado, 0.0);
        assert_eq!(summary.final_impacto, None);
    }

    #[test]
    fn test_summary_uses_last_year() {
        let mut result = ProjectionResult::new(5.0, 10, 0.0);
        result.add_row(row(1, 50.0, Some(0.5)));
        result.add_row(row(2, 100.0, None));

        let summary = result.summary();
        assert_eq!(summary.years, 2);
        assert_eq!(summary.total_casos_nueva, 20);
        assert_eq!(summary.final_acumulado, 100.0);
        assert_eq!(summary.final_impacto, None);
        assert_eq!(result.year_labels(), ["Año 1", "Año 2"]);
    }

    #[test]
    fn test_summary_total_cases_saturates() {
        let mut result = ProjectionResult::new(1.0, u64::MAX, 0.0);
        for year in 1..=3 {
            let mut huge = row(year, 0.0, None);
            huge.casos_nueva = u64::MAX;
            result.add_row(huge);
        }
        assert_eq!(result.summary().total_casos_nueva, u64::MAX);
    }
}
