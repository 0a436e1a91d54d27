//! Line charts of the projection, rendered as standalone SVG
//!
//! Two charts are produced: case counts per year for both interventions,
//! and incremental versus cumulative cost per year.

use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::format::{format_int, format_money};
use crate::error::Result;
use crate::projection::ProjectionResult;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const TARGET_TICKS: usize = 6;

/// Default palette, one color per series
const COLORS: [&str; 2] = ["#1f77b4", "#ff7f0e"];

/// File name of the case-count chart
pub const CASES_CHART_FILE: &str = "tendencia_casos.svg";

/// File name of the cost chart
pub const COSTS_CHART_FILE: &str = "tendencia_costos.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Tick label format for the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisFormat {
    /// Truncated whole numbers with thousands separators
    Integer,
    /// Two decimals with thousands separators
    TwoDecimals,
}

impl AxisFormat {
    pub fn label(&self, value: f64) -> String {
        match self {
            AxisFormat::Integer => format_int(value.trunc()),
            AxisFormat::TwoDecimals => format_money(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub style: LineStyle,
}

/// A categorical line chart: one x position per year label
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub y_format: AxisFormat,
}

impl LineChart {
    /// Cases under the current and the new intervention
    pub fn cases(result: &ProjectionResult) -> Self {
        Self {
            title: "Tendencia de Casos".to_string(),
            x_label: "Año".to_string(),
            y_label: "Número de casos".to_string(),
            categories: result.year_labels(),
            series: vec![
                Series {
                    label: "Casos actual".to_string(),
                    values: result.years.iter().map(|r| r.casos_actual as f64).collect(),
                    style: LineStyle::Solid,
                },
                Series {
                    label: "Casos nuevos".to_string(),
                    values: result.years.iter().map(|r| r.casos_nueva as f64).collect(),
                    style: LineStyle::Dashed,
                },
            ],
            y_format: AxisFormat::Integer,
        }
    }

    /// Incremental and cumulative cost
    pub fn costs(result: &ProjectionResult) -> Self {
        Self {
            title: "Tendencia de Costos".to_string(),
            x_label: "Año".to_string(),
            y_label: "Costo (U.M.)".to_string(),
            categories: result.year_labels(),
            series: vec![
                Series {
                    label: "Costo incremental".to_string(),
                    values: result.years.iter().map(|r| r.costo_incremental).collect(),
                    style: LineStyle::Solid,
                },
                Series {
                    label: "Costo acumulado".to_string(),
                    values: result.years.iter().map(|r| r.acumulado).collect(),
                    style: LineStyle::Solid,
                },
            ],
            y_format: AxisFormat::TwoDecimals,
        }
    }

    /// Evenly spaced "nice" tick values covering every data point
    pub fn y_ticks(&self) -> Vec<f64> {
        let (lo, hi) = self.data_range();
        let step = nice_step((hi - lo) / (TARGET_TICKS - 1) as f64);
        let first = (lo / step).floor() as i64;
        let last = (hi / step).ceil() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }

    /// Min and max over all finite series values, widened when flat
    fn data_range(&self) -> (f64, f64) {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite());
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if lo > hi {
            (0.0, 1.0)
        } else if (hi - lo).abs() < f64::EPSILON {
            let pad = (lo.abs() * 0.05).max(1.0);
            (lo - pad, hi + pad)
        } else {
            (lo, hi)
        }
    }

    /// Render the chart as an SVG document
    pub fn to_svg(&self) -> String {
        let ticks = self.y_ticks();
        let y_min = ticks.first().copied().unwrap_or(0.0);
        let y_max = ticks.last().copied().unwrap_or(1.0);
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        let n = self.categories.len().max(1);
        let x_at = |i: usize| MARGIN_LEFT + plot_w * (i as f64 + 0.5) / n as f64;
        let y_at = |v: f64| MARGIN_TOP + plot_h * (1.0 - (v - y_min) / (y_max - y_min));

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = WIDTH,
            h = HEIGHT
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="16">{}</text>"#,
            WIDTH / 2.0,
            MARGIN_TOP / 2.0 + 6.0,
            escape(&self.title)
        );

        // Axes frame
        let _ = writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="black"/>"#,
            MARGIN_LEFT, MARGIN_TOP, plot_w, plot_h
        );

        for &tick in &ticks {
            let y = y_at(tick);
            let _ = writeln!(
                svg,
                r#"<line x1="{x0}" y1="{y}" x2="{x1}" y2="{y}" stroke="black"/><text x="{tx}" y="{ty}" text-anchor="end">{label}</text>"#,
                x0 = MARGIN_LEFT - 5.0,
                x1 = MARGIN_LEFT,
                y = y,
                tx = MARGIN_LEFT - 8.0,
                ty = y + 4.0,
                label = escape(&self.y_format.label(tick))
            );
        }

        for (i, category) in self.categories.iter().enumerate() {
            let x = x_at(i);
            let bottom = MARGIN_TOP + plot_h;
            let _ = writeln!(
                svg,
                r#"<line x1="{x}" y1="{y0}" x2="{x}" y2="{y1}" stroke="black"/><text x="{x}" y="{ty}" text-anchor="middle">{label}</text>"#,
                x = x,
                y0 = bottom,
                y1 = bottom + 5.0,
                ty = bottom + 20.0,
                label = escape(category)
            );
        }

        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 20.0,
            escape(&self.x_label)
        );
        let _ = writeln!(
            svg,
            r#"<text x="20" y="{y}" text-anchor="middle" transform="rotate(-90 20 {y})">{}</text>"#,
            escape(&self.y_label),
            y = MARGIN_TOP + plot_h / 2.0
        );

        for (s, series) in self.series.iter().enumerate() {
            let color = COLORS[s % COLORS.len()];
            let dash = match series.style {
                LineStyle::Solid => "",
                LineStyle::Dashed => r#" stroke-dasharray="6,4""#,
            };
            let points: Vec<String> = series
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, &v)| format!("{:.2},{:.2}", x_at(i), y_at(v)))
                .collect();

            let _ = writeln!(
                svg,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"{}/>"#,
                points.join(" "),
                color,
                dash
            );
            for point in &points {
                if let Some((x, y)) = point.split_once(',') {
                    let _ = writeln!(svg, r#"<circle cx="{}" cy="{}" r="4" fill="{}"/>"#, x, y, color);
                }
            }

            // Legend entry, top-left inside the plot
            let ly = MARGIN_TOP + 18.0 + 18.0 * s as f64;
            let lx = MARGIN_LEFT + 12.0;
            let _ = writeln!(
                svg,
                r#"<line x1="{}" y1="{ly}" x2="{}" y2="{ly}" stroke="{}" stroke-width="2"{}/><text x="{}" y="{}">{}</text>"#,
                lx,
                lx + 24.0,
                color,
                dash,
                lx + 30.0,
                ly + 4.0,
                escape(&series.label),
                ly = ly
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Round a raw tick step up to 1, 2, 5, or 10 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write both charts into `dir`, returning the written paths
pub fn write_charts(result: &ProjectionResult, dir: &Path) -> Result<Vec<PathBuf>> {
    let charts = [
        (CASES_CHART_FILE, LineChart::cases(result)),
        (COSTS_CHART_FILE, LineChart::costs(result)),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (name, chart) in charts {
        let path = dir.join(name);
        fs::write(&path, chart.to_svg())?;
        info!("Chart written to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
