//! Input collection: raw form values to validated `CollectedInputs`
//!
//! Every field is optional on the way in. Untouched fields take the form's
//! widget defaults and out-of-range values are clamped to the widget bounds
//! rather than rejected.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::data::{
    CollectedInputs, CostDelta, HistoricalBudget, PopulationMode, TargetPopulation,
    UptakeSchedule, DEFAULT_UPTAKE_PCT, HISTORY_YEARS,
};

/// Default prevalence shown by the form (percent)
pub const DEFAULT_PREVALENCE_PCT: f64 = 100.0;

/// Longest horizon accepted; longer requests are clamped
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Raw, unvalidated form values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    /// Cost of the current intervention (U.M.)
    pub costo_actual: Option<f64>,

    /// Cost of the new intervention (U.M.)
    pub costo_nueva: Option<f64>,

    /// Which population fields are active
    pub metodo: Option<PopulationMode>,

    pub pop_total: Option<i64>,
    pub prevalencia_pct: Option<f64>,

    /// Direct annual case count (direct mode only)
    pub casos_anio: Option<i64>,

    /// Horizon in years
    pub yrs: Option<i64>,

    /// Historical budget, oldest to current
    pub pim_hist: Option<Vec<f64>>,

    /// Uptake percentage per projection year
    pub uptake: Option<Vec<i64>>,
}

impl RawInputs {
    /// Overlay `other` onto `self`: every field set in `other` wins
    pub fn merge(self, other: RawInputs) -> RawInputs {
        RawInputs {
            costo_actual: other.costo_actual.or(self.costo_actual),
            costo_nueva: other.costo_nueva.or(self.costo_nueva),
            metodo: other.metodo.or(self.metodo),
            pop_total: other.pop_total.or(self.pop_total),
            prevalencia_pct: other.prevalencia_pct.or(self.prevalencia_pct),
            casos_anio: other.casos_anio.or(self.casos_anio),
            yrs: other.yrs.or(self.yrs),
            pim_hist: other.pim_hist.or(self.pim_hist),
            uptake: other.uptake.or(self.uptake),
        }
    }
}

/// Validate and clamp raw form values into a `CollectedInputs`
pub fn collect(raw: &RawInputs) -> CollectedInputs {
    let costs = CostDelta::new(
        clamp_real("costo_actual", raw.costo_actual, 0.0, f64::MAX, 0.0),
        clamp_real("costo_nueva", raw.costo_nueva, 0.0, f64::MAX, 0.0),
    );

    let population = match raw.metodo.unwrap_or_default() {
        PopulationMode::Prevalence => TargetPopulation::Prevalence {
            pop_total: clamp_int("pop_total", raw.pop_total, 1, i64::MAX, 1) as u64,
            prevalencia_pct: clamp_real(
                "prevalencia_pct",
                raw.prevalencia_pct,
                0.0,
                100.0,
                DEFAULT_PREVALENCE_PCT,
            ),
        },
        PopulationMode::DirectCases => TargetPopulation::DirectCases {
            casos_anio: clamp_int("casos_anio", raw.casos_anio, 0, i64::MAX, 0) as u64,
        },
    };

    let yrs = clamp_int("yrs", raw.yrs, 1, MAX_HORIZON_YEARS as i64, 1) as u32;
    let pim_hist = collect_history(raw.pim_hist.as_deref());
    let uptake = collect_uptake(raw.uptake.as_deref(), yrs);

    let inputs = CollectedInputs::new(costs, population, yrs, pim_hist, uptake);
    debug!(
        "Collected inputs: delta={} casos_anio={} yrs={}",
        inputs.delta(),
        inputs.casos_anio(),
        inputs.yrs
    );
    inputs
}

/// Clamp a real-valued field; NaN falls back to the minimum
fn clamp_real(field: &str, value: Option<f64>, min: f64, max: f64, default: f64) -> f64 {
    match value {
        None => default,
        Some(v) if v.is_nan() => {
            warn!("{} is not a number, using {}", field, min);
            min
        }
        Some(v) if v < min || v > max => {
            let clamped = v.clamp(min, max);
            warn!("{} = {} out of range [{}, {}], clamped to {}", field, v, min, max, clamped);
            clamped
        }
        Some(v) => v,
    }
}

fn clamp_int(field: &str, value: Option<i64>, min: i64, max: i64, default: i64) -> i64 {
    match value {
        None => default,
        Some(v) if v < min || v > max => {
            let clamped = v.clamp(min, max);
            warn!("{} = {} out of range [{}, {}], clamped to {}", field, v, min, max, clamped);
            clamped
        }
        Some(v) => v,
    }
}

/// Keep the most recent five entries, padding missing older years with zero
fn collect_history(values: Option<&[f64]>) -> HistoricalBudget {
    let values = values.unwrap_or(&[]);
    if values.len() != HISTORY_YEARS && !values.is_empty() {
        warn!(
            "Expected {} historical budget values, got {}; aligning to the most recent",
            HISTORY_YEARS,
            values.len()
        );
    }

    let recent = &values[values.len().saturating_sub(HISTORY_YEARS)..];
    let pad = HISTORY_YEARS - recent.len();

    let mut history = [0.0; HISTORY_YEARS];
    for (i, &v) in recent.iter().enumerate() {
        let label = HistoricalBudget::label(pad + i);
        history[pad + i] = clamp_real(&label, Some(v), 0.0, f64::MAX, 0.0);
    }
    HistoricalBudget::new(history)
}

/// One uptake entry per horizon year; missing years take the slider default
fn collect_uptake(values: Option<&[i64]>, yrs: u32) -> UptakeSchedule {
    let values = values.unwrap_or(&[]);
    if values.len() > yrs as usize {
        warn!(
            "{} uptake values given for a {} year horizon; extra years ignored",
            values.len(),
            yrs
        );
    }

    let percentages = (0..yrs as usize)
        .map(|i| match values.get(i) {
            Some(&pct) => clamp_int(&UptakeSchedule::label(i), Some(pct), 0, 100, 100) as u8,
            None => DEFAULT_UPTAKE_PCT,
        })
        .collect();
    UptakeSchedule::new(percentages)
}
