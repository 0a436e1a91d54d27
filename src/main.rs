//! Budget Impact CLI
//!
//! Collects the calculator inputs from flags, environment variables, or a
//! scenario file, then prints the projection table and writes the CSV export
//! and charts.
//!
//! Usage: `bia [--scenario FILE] [--costo-actual X] ... [--out-dir DIR]`
//!        `bia --batch DIR`

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

use budget_impact::inputs::{load_scenario, load_scenarios, PopulationMode, RawInputs};
use budget_impact::report::{export_csv_file, render_report, write_charts, format};
use budget_impact::ScenarioRunner;

#[derive(Parser, Debug)]
#[command(name = "bia")]
#[command(about = "Budget impact analysis: incremental cost and budget share of a new intervention")]
struct Args {
    /// JSON scenario providing base values; flags override it
    #[arg(long, env = "BIA_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Evaluate every *.json scenario in a directory and print one summary line each
    #[arg(long, conflicts_with = "scenario")]
    batch: Option<PathBuf>,

    /// Cost of the current intervention per case (U.M.)
    #[arg(long, env = "BIA_COSTO_ACTUAL", allow_negative_numbers = true)]
    costo_actual: Option<f64>,

    /// Cost of the new intervention per case (U.M.)
    #[arg(long, env = "BIA_COSTO_NUEVA", allow_negative_numbers = true)]
    costo_nueva: Option<f64>,

    /// Population mode: prevalence-and-total or direct-case-count
    #[arg(long, env = "BIA_METODO")]
    metodo: Option<PopulationMode>,

    /// Total population
    #[arg(long, env = "BIA_POP_TOTAL", allow_negative_numbers = true)]
    pop_total: Option<i64>,

    /// Prevalence (%)
    #[arg(long, env = "BIA_PREVALENCIA", allow_negative_numbers = true)]
    prevalencia: Option<f64>,

    /// Annual referred cases (direct-case-count mode)
    #[arg(long, env = "BIA_CASOS_ANIO", allow_negative_numbers = true)]
    casos_anio: Option<i64>,

    /// Projection horizon (years)
    #[arg(long, env = "BIA_YRS", allow_negative_numbers = true)]
    yrs: Option<i64>,

    /// Historical budget, oldest to current, comma-separated (5 values)
    #[arg(long, env = "BIA_PIM_HIST", value_delimiter = ',', allow_negative_numbers = true)]
    pim_hist: Option<Vec<f64>>,

    /// Uptake (%) per projection year, comma-separated
    #[arg(long, env = "BIA_UPTAKE", value_delimiter = ',', allow_negative_numbers = true)]
    uptake: Option<Vec<i64>>,

    /// Directory for the CSV export and charts
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Export file name, without extension
    #[arg(long, default_value = "BIA_resultados")]
    csv_name: String,

    /// Skip writing the SVG charts
    #[arg(long)]
    no_charts: bool,

    /// Print the projection as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            costo_actual: self.costo_actual,
            costo_nueva: self.costo_nueva,
            metodo: self.metodo,
            pop_total: self.pop_total,
            prevalencia_pct: self.prevalencia,
            casos_anio: self.casos_anio,
            yrs: self.yrs,
            pim_hist: self.pim_hist.clone(),
            uptake: self.uptake.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if let Some(dir) = &args.batch {
        return run_batch(&args, dir);
    }

    let base = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => RawInputs::default(),
    };

    let runner = ScenarioRunner::new(base);
    let outcome = runner.run(&args.raw_inputs());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        print!("{}", render_report(&outcome.inputs, &outcome.result));
    }

    let csv_path = args.out_dir.join(format!("{}.csv", args.csv_name));
    export_csv_file(&outcome.result, &csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    if !args.no_charts {
        write_charts(&outcome.result, &args.out_dir)
            .with_context(|| format!("Failed to write charts to {}", args.out_dir.display()))?;
    }

    if !args.json {
        println!("\nResultados guardados en: {}", csv_path.display());
    }
    Ok(())
}

/// Project every scenario in `dir`, with command-line values applied on top
fn run_batch(args: &Args, dir: &Path) -> Result<()> {
    let scenarios = load_scenarios(dir)
        .with_context(|| format!("Failed to load scenarios from {}", dir.display()))?;
    let (names, raws): (Vec<String>, Vec<RawInputs>) = scenarios
        .into_iter()
        .map(|(name, raw)| (name, raw.merge(args.raw_inputs())))
        .unzip();

    info!("Running {} scenarios", raws.len());
    let outcomes = ScenarioRunner::default().run_batch(&raws);

    println!("{:<24} {:>6} {:>20} {:>12}", "Escenario", "Años", "Acumulado (U.M.)", "Impacto");
    println!("{}", "-".repeat(65));
    for (name, outcome) in names.iter().zip(&outcomes) {
        let summary = outcome.result.summary();
        println!(
            "{:<24} {:>6} {:>20} {:>12}",
            name,
            summary.years,
            format::format_money(summary.final_acumulado),
            format::format_percent(summary.final_impacto),
        );
    }
    Ok(())
}
