//! CSV export of the unformatted projection table
//!
//! Files start with a UTF-8 byte-order mark so spreadsheet tools pick up
//! the accented column names correctly.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use super::COLUMNS;
use crate::error::{BiaError, Result};
use crate::projection::{ProjectionResult, YearRecord};

/// Default download name for the exported table
pub const EXPORT_FILE_NAME: &str = "BIA_resultados.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One exported row, columns named as in the rendered table
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Año")]
    year: String,
    #[serde(rename = "Casos intervención actual")]
    casos_actual: u64,
    #[serde(rename = "Casos intervención nueva")]
    casos_nueva: u64,
    #[serde(rename = "Costo incremental")]
    costo_incremental: f64,
    #[serde(rename = "Acumulado Costo Incremental")]
    acumulado: f64,
    #[serde(rename = "PIM proyectado")]
    pim_proyectado: f64,
    #[serde(rename = "Impacto en PIM")]
    impacto_pim: Option<f64>,
}

impl CsvRow {
    fn from_record(record: &YearRecord) -> Self {
        Self {
            year: record.label(),
            casos_actual: record.casos_actual,
            casos_nueva: record.casos_nueva,
            costo_incremental: record.costo_incremental,
            acumulado: record.acumulado,
            pim_proyectado: record.pim_proyectado,
            impacto_pim: record.impacto_pim,
        }
    }

    fn to_record(self) -> Result<YearRecord> {
        let year = self
            .year
            .strip_prefix("Año ")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| BiaError::InvalidExport(format!("Unknown year label: {}", self.year)))?;

        Ok(YearRecord {
            year,
            casos_actual: self.casos_actual,
            casos_nueva: self.casos_nueva,
            costo_incremental: self.costo_incremental,
            acumulado: self.acumulado,
            pim_proyectado: self.pim_proyectado,
            impacto_pim: self.impacto_pim,
        })
    }
}

/// Write the projection table as BOM-prefixed CSV
pub fn export_csv<W: Write>(result: &ProjectionResult, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    if result.is_empty() {
        // serde only emits the header alongside the first row
        csv_writer.write_record(COLUMNS)?;
    }
    for record in &result.years {
        csv_writer.serialize(CsvRow::from_record(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export to a file, creating or truncating it
pub fn export_csv_file<P: AsRef<Path>>(result: &ProjectionResult, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    export_csv(result, BufWriter::new(file))?;
    info!("Results written to {}", path.as_ref().display());
    Ok(())
}

/// Read an exported table back into year records
pub fn parse_csv<R: Read>(mut reader: R) -> Result<Vec<YearRecord>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut csv_reader = csv::Reader::from_reader(body);
    let headers = csv_reader.headers()?;
    if headers.iter().ne(COLUMNS.iter().copied()) {
        return Err(BiaError::InvalidExport(format!(
            "Unexpected header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let row: CsvRow = row?;
        records.push(row.to_record()?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{collect, RawInputs};
    use crate::projection::project;

    fn result() -> ProjectionResult {
        project(&collect(&RawInputs {
            costo_actual: Some(100.0),
            costo_nueva: Some(150.0),
            pop_total: Some(10_000),
            prevalencia_pct: Some(10.0),
            yrs: Some(2),
            pim_hist: Some(vec![1000.0; 5]),
            ..Default::default()
        }))
    }

    #[test]
    fn test_export_starts_with_bom_and_header() {
        let mut buffer = Vec::new();
        export_csv(&result(), &mut buffer).unwrap();

        assert!(buffer.starts_with(UTF8_BOM));
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert!(lines.next().unwrap().starts_with("Año 1,0,1000,50000"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_undefined_impact_is_an_empty_field() {
        let mut result = result();
        result.years[0].impacto_pim = None;

        let mut buffer = Vec::new();
        export_csv(&result, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let first_row = text.lines().nth(1).unwrap();
        assert!(first_row.ends_with(','));

        let parsed = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(parsed[0].impacto_pim, None);
    }

    #[test]
    fn test_empty_result_exports_header_only() {
        let mut buffer = Vec::new();
        export_csv(&ProjectionResult::new(0.0, 0, 0.0), &mut buffer).unwrap();
        assert!(parse_csv(buffer.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_foreign_header() {
        let err = parse_csv("a,b,c\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BiaError::InvalidExport(_)));
    }
}
