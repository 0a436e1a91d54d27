//! Text rendering of the projection table, summary lines, and notes

use std::fmt::Write;

use super::format::{format_count, format_growth, format_money, format_percent};
use super::COLUMNS;
use crate::inputs::{CollectedInputs, TargetPopulation};
use crate::projection::{ProjectionResult, YearRecord};

/// Formulas behind each column, shown under the table
pub const NOTES: [&str; 7] = [
    "Casos intervención actual = Casos/año – Casos intervención nueva",
    "Casos intervención nueva = Casos/año × % introducción",
    "Costo incremental = Δ costo por caso × Casos intervención nueva",
    "Acumulado Costo incremental = suma de todos los Costos incrementales hasta el año t",
    "PIM proyectado Año 0 = PIM histórico + Costo incremental Año 0",
    "PIM proyectado Año t ≥ 1 = (PIM proyectado del año anterior × (1 + tasa media anual de crecimiento PIM)) + Costo incremental Año t",
    "Impacto en PIM = Acumulado / PIM proyectado (expresado en %)",
];

/// Formatted display cells for one year, in column order
pub fn format_row(row: &YearRecord) -> [String; 7] {
    [
        row.label(),
        format_count(row.casos_actual),
        format_count(row.casos_nueva),
        format_money(row.costo_incremental),
        format_money(row.acumulado),
        format_money(row.pim_proyectado),
        format_percent(row.impacto_pim),
    ]
}

/// One-line explanation of where the yearly case count came from
pub fn describe_population(population: &TargetPopulation) -> String {
    match *population {
        TargetPopulation::Prevalence { pop_total, prevalencia_pct } => format!(
            "Casos/año estimados: {} ({:.1}% de {})",
            format_count(population.casos_anio()),
            prevalencia_pct,
            format_count(pop_total),
        ),
        TargetPopulation::DirectCases { casos_anio } => {
            format!("Casos por año: {}", format_count(casos_anio))
        }
    }
}

/// Render the year table with centred cells
pub fn render_table(result: &ProjectionResult) -> String {
    let rows: Vec<[String; 7]> = result.years.iter().map(format_row).collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, COLUMNS.iter().map(|h| h.to_string()), &widths);
    push_rule(&mut out, &widths);
    for row in rows {
        push_line(&mut out, row.into_iter(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    out.push('|');
    for (cell, &width) in cells.zip(widths) {
        let _ = write!(out, " {:^width$} |", cell, width = width);
    }
    out.push('\n');
}

fn push_rule(out: &mut String, widths: &[usize]) {
    out.push('|');
    for &width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('|');
    }
    out.push('\n');
}

/// The two closing summary lines: final cumulative cost and final impact
pub fn summary_lines(inputs: &CollectedInputs, result: &ProjectionResult) -> [String; 2] {
    let summary = result.summary();
    [
        format!(
            "Acumulado en {} años: U.M. {}",
            inputs.yrs,
            format_money(summary.final_acumulado)
        ),
        format!(
            "Impacto relativo final en PIM: {}",
            format_percent(summary.final_impacto)
        ),
    ]
}

/// Full text report: derived inputs, table, summary, and notes
pub fn render_report(inputs: &CollectedInputs, result: &ProjectionResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Δ Costo por caso tratado: U.M. {}", format_money(result.delta));
    let _ = writeln!(out, "{}", describe_population(&inputs.population));
    let _ = writeln!(
        out,
        "Tasa media anual de crecimiento PIM: {}",
        format_growth(result.avg_growth)
    );
    out.push('\n');

    out.push_str(&render_table(result));
    out.push('\n');

    for line in summary_lines(inputs, result) {
        let _ = writeln!(out, "{}", line);
    }
    out.push('\n');

    let _ = writeln!(out, "Nota:");
    for note in NOTES {
        let _ = writeln!(out, "- {}", note);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{collect, PopulationMode, RawInputs};
    use crate::projection::project;

    fn reference() -> (CollectedInputs, ProjectionResult) {
        let inputs = collect(&RawInputs {
            costo_actual: Some(100.0),
            costo_nueva: Some(150.0),
            pop_total: Some(10_000),
            prevalencia_pct: Some(10.0),
            yrs: Some(2),
            pim_hist: Some(vec![1000.0; 5]),
            ..Default::default()
        });
        let result = project(&inputs);
        (inputs, result)
    }

    #[test]
    fn test_format_row() {
        let (_, result) = reference();
        assert_eq!(
            format_row(&result.years[1]),
            [
                "Año 2".to_string(),
                "0".to_string(),
                "1,000".to_string(),
                "50,000.00".to_string(),
                "100,000.00".to_string(),
                "101,000.00".to_string(),
                "99.01%".to_string(),
            ]
        );
    }

    #[test]
    fn test_describe_population() {
        let pop = TargetPopulation::Prevalence { pop_total: 10_000, prevalencia_pct: 10.0 };
        assert_eq!(describe_population(&pop), "Casos/año estimados: 1,000 (10.0% de 10,000)");

        let direct = TargetPopulation::DirectCases { casos_anio: 2500 };
        assert_eq!(describe_population(&direct), "Casos por año: 2,500");
    }

    #[test]
    fn test_huge_case_counts_render_exactly() {
        let inputs = collect(&RawInputs {
            metodo: Some(PopulationMode::DirectCases),
            casos_anio: Some(i64::MAX),
            yrs: Some(3),
            uptake: Some(vec![100, 50, 0]),
            ..Default::default()
        });
        let result = project(&inputs);

        let cells = format_row(&result.years[0]);
        assert_eq!(cells[2], "9,223,372,036,854,775,807");
        assert_eq!(
            describe_population(&inputs.population),
            "Casos por año: 9,223,372,036,854,775,807"
        );

        let [acumulado, _] = summary_lines(&inputs, &result);
        assert!(acumulado.starts_with("Acumulado en 3 años: U.M. "));
        assert!(render_report(&inputs, &result).contains("Impacto relativo final en PIM"));
    }

    #[test]
    fn test_table_has_header_and_one_line_per_year() {
        let (_, result) = reference();
        let table = render_table(&result);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2 + result.len());
        let headers: Vec<&str> = lines[0].split('|').map(str::trim).filter(|s| !s.is_empty()).collect();
        assert_eq!(headers, COLUMNS);
        assert!(lines[2].contains("98.04%"));
        // every line is the same display width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_summary_lines() {
        let (inputs, result) = reference();
        assert_eq!(
            summary_lines(&inputs, &result),
            [
                "Acumulado en 2 años: U.M. 100,000.00".to_string(),
                "Impacto relativo final en PIM: 99.01%".to_string(),
            ]
        );
    }

    #[test]
    fn test_report_includes_derived_inputs() {
        let (inputs, result) = reference();
        let report = render_report(&inputs, &result);
        assert!(report.contains("Δ Costo por caso tratado: U.M. 50.00"));
        assert!(report.contains("Casos/año estimados: 1,000 (10.0% de 10,000)"));
        assert!(report.contains("Tasa media anual de crecimiento PIM: 0.0%"));
        assert!(report.contains("Nota:"));
    }
}
