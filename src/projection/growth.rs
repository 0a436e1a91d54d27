//! Year-over-year growth of the historical budget (PIM)

use crate::inputs::HistoricalBudget;

/// Year-over-year growth rates between consecutive history entries
///
/// A year whose prior budget is zero (or negative) contributes a rate of 0.
pub fn growth_rates(history: &HistoricalBudget) -> Vec<f64> {
    history
        .values()
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            if prev > 0.0 {
                (curr - prev) / prev
            } else {
                0.0
            }
        })
        .collect()
}

/// Mean of the growth rates, rounded to 3 decimals; 0 when there are none
pub fn average_growth(rates: &[f64]) -> f64 {
    if rates.is_empty() {
        return 0.0;
    }
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    round_to(mean, 3)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_history_has_zero_growth() {
        let history = HistoricalBudget::new([1000.0; 5]);
        let rates = growth_rates(&history);
        assert_eq!(rates, vec![0.0; 4]);
        assert_eq!(average_growth(&rates), 0.0);
    }

    #[test]
    fn test_zero_prior_years_contribute_nothing() {
        let history = HistoricalBudget::new([0.0; 5]);
        assert_eq!(average_growth(&growth_rates(&history)), 0.0);

        // 0 -> 100 is undefined growth, 100 -> 110 is 10%
        let history = HistoricalBudget::new([0.0, 0.0, 0.0, 100.0, 110.0]);
        let rates = growth_rates(&history);
        assert_eq!(rates, vec![0.0, 0.0, 0.0, 0.1]);
        assert_relative_eq!(average_growth(&rates), 0.025);
    }

    #[test]
    fn test_average_rounded_to_three_decimals() {
        let history = HistoricalBudget::new([100.0, 105.0, 110.25, 115.7625, 121.550625]);
        // Exactly 5% every year
        assert_relative_eq!(average_growth(&growth_rates(&history)), 0.05);

        let history = HistoricalBudget::new([300.0, 301.0, 302.0, 303.0, 304.0]);
        // ~0.33% per year rounds to 0.003
        assert_relative_eq!(average_growth(&growth_rates(&history)), 0.003);
    }

    #[test]
    fn test_empty_rates_average_to_zero() {
        assert_eq!(average_growth(&[]), 0.0);
    }
}
