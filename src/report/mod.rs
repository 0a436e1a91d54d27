//! Presentation of projection results: table, charts, and CSV export

pub mod format;
pub mod table;
pub mod chart;
pub mod export;

pub use chart::{write_charts, LineChart};
pub use export::{export_csv, export_csv_file, parse_csv, EXPORT_FILE_NAME};
pub use table::{describe_population, render_report, render_table, summary_lines};

/// Output table columns, in display and export order
pub const COLUMNS: [&str; 7] = [
    "Año",
    "Casos intervención actual",
    "Casos intervención nueva",
    "Costo incremental",
    "Acumulado Costo Incremental",
    "PIM proyectado",
    "Impacto en PIM",
];
