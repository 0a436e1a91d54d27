//! Load scenario inputs from JSON files

use log::info;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use super::collector::RawInputs;
use crate::error::{BiaError, Result};

/// Load one scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<RawInputs> {
    let file = File::open(path.as_ref())?;
    load_scenario_from_reader(BufReader::new(file))
}

/// Load one scenario from any reader (e.g., string buffer, request body)
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<RawInputs> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load every `*.json` scenario in a directory, sorted by file name
pub fn load_scenarios<P: AsRef<Path>>(dir: P) -> Result<Vec<(String, RawInputs)>> {
    let dir = dir.as_ref();
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(BiaError::NoScenarios(dir.to_path_buf()));
    }

    let mut scenarios = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        scenarios.push((name, load_scenario(&path)?));
    }

    info!("Loaded {} scenarios from {}", scenarios.len(), dir.display());
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::PopulationMode;

    #[test]
    fn test_load_partial_scenario() {
        let json = r#"{
            "costo_actual": 100.0,
            "costo_nueva": 150.0,
            "metodo": "direct-case-count",
            "casos_anio": 1001,
            "uptake": [50]
        }"#;
        let raw = load_scenario_from_reader(json.as_bytes()).expect("valid scenario");

        assert_eq!(raw.costo_nueva, Some(150.0));
        assert_eq!(raw.metodo, Some(PopulationMode::DirectCases));
        assert_eq!(raw.yrs, None);
        assert_eq!(raw.uptake, Some(vec![50]));
    }

    #[test]
    fn test_malformed_scenario_is_an_error() {
        let err = load_scenario_from_reader("{ \"yrs\": \"two\" }".as_bytes()).unwrap_err();
        assert!(matches!(err, BiaError::Json(_)));
    }

    #[test]
    fn test_empty_directory_has_no_scenarios() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scenarios(dir.path()).unwrap_err();
        assert!(matches!(err, BiaError::NoScenarios(_)));
    }

    #[test]
    fn test_load_scenarios_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_low.json"), r#"{"yrs": 2}"#).unwrap();
        fs::write(dir.path().join("a_high.json"), r#"{"yrs": 3}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let scenarios = load_scenarios(dir.path()).unwrap();
        let names: Vec<_> = scenarios.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a_high", "b_low"]);
        assert_eq!(scenarios[0].1.yrs, Some(3));
    }
}
