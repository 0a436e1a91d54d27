//! Validated input data for a budget impact run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of historical budget (PIM) years supplied, oldest first
pub const HISTORY_YEARS: usize = 5;

/// Uptake percentage a year takes when the user leaves its slider untouched
pub const DEFAULT_UPTAKE_PCT: u8 = 100;

/// Per-case costs of the current and the new intervention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDelta {
    /// Cost of the current intervention per treated case (U.M.)
    pub costo_actual: f64,

    /// Cost of the new intervention per treated case (U.M.)
    pub costo_nueva: f64,
}

impl CostDelta {
    pub fn new(costo_actual: f64, costo_nueva: f64) -> Self {
        Self { costo_actual, costo_nueva }
    }

    /// Cost difference per treated case (new minus current); may be negative
    pub fn delta(&self) -> f64 {
        self.costo_nueva - self.costo_actual
    }
}

/// How the yearly target population is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PopulationMode {
    /// Total population times prevalence
    #[default]
    #[serde(rename = "prevalence-and-total")]
    Prevalence,
    /// Annual referred cases entered directly
    #[serde(rename = "direct-case-count")]
    DirectCases,
}

impl fmt::Display for PopulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulationMode::Prevalence => write!(f, "prevalence-and-total"),
            PopulationMode::DirectCases => write!(f, "direct-case-count"),
        }
    }
}

impl FromStr for PopulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prevalence-and-total" | "prevalence" => Ok(PopulationMode::Prevalence),
            "direct-case-count" | "direct" => Ok(PopulationMode::DirectCases),
            other => Err(format!("Unknown population mode: {}", other)),
        }
    }
}

/// Target population, defined by exactly one of the two modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum TargetPopulation {
    #[serde(rename = "prevalence-and-total")]
    Prevalence {
        /// Total population (>= 1)
        pop_total: u64,
        /// Prevalence in percent, 0-100
        prevalencia_pct: f64,
    },
    #[serde(rename = "direct-case-count")]
    DirectCases {
        casos_anio: u64,
    },
}

impl TargetPopulation {
    pub fn mode(&self) -> PopulationMode {
        match self {
            TargetPopulation::Prevalence { .. } => PopulationMode::Prevalence,
            TargetPopulation::DirectCases { .. } => PopulationMode::DirectCases,
        }
    }

    /// Eligible cases per year
    ///
    /// Prevalence mode truncates `pop_total * prevalencia_pct / 100` toward zero.
    pub fn casos_anio(&self) -> u64 {
        match *self {
            TargetPopulation::Prevalence { pop_total, prevalencia_pct } => {
                (pop_total as f64 * prevalencia_pct / 100.0).floor() as u64
            }
            TargetPopulation::DirectCases { casos_anio } => casos_anio,
        }
    }
}

/// Five years of historical budget figures, oldest to current
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBudget(pub [f64; HISTORY_YEARS]);

impl HistoricalBudget {
    pub fn new(values: [f64; HISTORY_YEARS]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; HISTORY_YEARS] {
        &self.0
    }

    /// Most recent ("actual") budget figure
    pub fn current(&self) -> f64 {
        self.0[HISTORY_YEARS - 1]
    }

    /// Form label for the history entry at `index` (0 = oldest)
    pub fn label(index: usize) -> String {
        let offset = HISTORY_YEARS - 1 - index.min(HISTORY_YEARS - 1);
        if offset > 0 {
            format!("PIM año -{}", offset)
        } else {
            "PIM año actual".to_string()
        }
    }
}

impl Default for HistoricalBudget {
    fn default() -> Self {
        Self([0.0; HISTORY_YEARS])
    }
}

/// Per-year uptake percentages of the new intervention (0-100)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UptakeSchedule(Vec<u8>);

impl UptakeSchedule {
    /// Build a schedule, capping every entry at 100
    pub fn new(percentages: Vec<u8>) -> Self {
        Self(percentages.into_iter().map(|p| p.min(100)).collect())
    }

    /// Full uptake for every year of the horizon
    pub fn full(yrs: u32) -> Self {
        Self(vec![DEFAULT_UPTAKE_PCT; yrs as usize])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uptake for year offset `index`, falling back to the slider default
    pub fn get(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(DEFAULT_UPTAKE_PCT)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Slider label for year offset `index`
    pub fn label(index: usize) -> String {
        if index == 0 {
            "Introducción año actual (%)".to_string()
        } else {
            format!("Introducción año +{} (%)", index)
        }
    }
}

/// Fully validated inputs for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedInputs {
    pub costs: CostDelta,
    pub population: TargetPopulation,

    /// Projection horizon in years
    pub yrs: u32,

    pub pim_hist: HistoricalBudget,
    pub uptake: UptakeSchedule,
}

impl CollectedInputs {
    pub fn new(
        costs: CostDelta,
        population: TargetPopulation,
        yrs: u32,
        pim_hist: HistoricalBudget,
        uptake: UptakeSchedule,
    ) -> Self {
        Self { costs, population, yrs, pim_hist, uptake }
    }

    pub fn delta(&self) -> f64 {
        self.costs.delta()
    }

    pub fn casos_anio(&self) -> u64 {
        self.population.casos_anio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_may_be_negative() {
        assert_eq!(CostDelta::new(100.0, 150.0).delta(), 50.0);
        assert_eq!(CostDelta::new(150.0, 100.0).delta(), -50.0);
    }

    #[test]
    fn test_casos_anio_from_prevalence() {
        let pop = TargetPopulation::Prevalence { pop_total: 10_000, prevalencia_pct: 10.0 };
        assert_eq!(pop.casos_anio(), 1000);

        // 333 * 33.3% = 110.889 -> 110
        let pop = TargetPopulation::Prevalence { pop_total: 333, prevalencia_pct: 33.3 };
        assert_eq!(pop.casos_anio(), 110);
    }

    #[test]
    fn test_history_labels() {
        assert_eq!(HistoricalBudget::label(0), "PIM año -4");
        assert_eq!(HistoricalBudget::label(3), "PIM año -1");
        assert_eq!(HistoricalBudget::label(4), "PIM año actual");
    }

    #[test]
    fn test_uptake_defaults_beyond_schedule() {
        let uptake = UptakeSchedule::new(vec![20, 140]);
        assert_eq!(uptake.get(0), 20);
        assert_eq!(uptake.get(1), 100);
        assert_eq!(uptake.get(7), DEFAULT_UPTAKE_PCT);
        assert_eq!(UptakeSchedule::label(0), "Introducción año actual (%)");
        assert_eq!(UptakeSchedule::label(2), "Introducción año +2 (%)");
    }

    #[test]
    fn test_population_mode_parse() {
        assert_eq!("direct".parse::<PopulationMode>(), Ok(PopulationMode::DirectCases));
        assert_eq!(
            "prevalence-and-total".parse::<PopulationMode>(),
            Ok(PopulationMode::Prevalence)
        );
        assert!("census".parse::<PopulationMode>().is_err());
    }
}
