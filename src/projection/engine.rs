//! Core projection engine for yearly budget impact

use log::debug;

use crate::inputs::CollectedInputs;
use super::growth::{average_growth, growth_rates};
use super::records::{ProjectionResult, YearRecord};

/// Project incremental cost and budget impact over the input horizon
///
/// Stateless: identical inputs always give an identical result. A zero-year
/// horizon yields an empty result rather than an error.
pub fn project(inputs: &CollectedInputs) -> ProjectionResult {
    let delta = inputs.delta();
    let casos_anio = inputs.casos_anio();
    let avg_growth = average_growth(&growth_rates(&inputs.pim_hist));
    let base_pim = inputs.pim_hist.current();

    debug!(
        "Projecting {} years: delta={} casos_anio={} avg_growth={} base_pim={}",
        inputs.yrs, delta, casos_anio, avg_growth, base_pim
    );

    let mut result = ProjectionResult::new(delta, casos_anio, avg_growth);

    for i in 0..inputs.yrs as usize {
        let uptake_pct = inputs.uptake.get(i);
        let casos_nueva = new_intervention_cases(casos_anio, uptake_pct);
        let costo_incremental = delta * casos_nueva as f64;

        // Year 0 grows from the current budget without applying the growth rate
        let (acumulado, pim_proyectado) = match result.years.last() {
            None => (costo_incremental, base_pim + costo_incremental),
            Some(prior) => (
                prior.acumulado + costo_incremental,
                prior.pim_proyectado * (1.0 + avg_growth) + costo_incremental,
            ),
        };

        let impacto_pim = if pim_proyectado > 0.0 {
            Some(acumulado / pim_proyectado)
        } else {
            None
        };

        result.add_row(YearRecord {
            year: i as u32 + 1,
            casos_actual: casos_anio.saturating_sub(casos_nueva),
            casos_nueva,
            costo_incremental,
            acumulado,
            pim_proyectado,
            impacto_pim,
        });
    }

    result
}

/// Cases treated with the new intervention, rounded up
///
/// Rounding up means any fractional case counts as a whole new case.
pub fn new_intervention_cases(casos_anio: u64, uptake_pct: u8) -> u64 {
    let scaled = casos_anio as u128 * uptake_pct as u128;
    scaled.div_ceil(100) as u64
}
