//! Number formatting for the report table, summary lines, and chart axes

/// Text shown where the relative budget impact is undefined
pub const UNDEFINED_IMPACT: &str = "N/A";

/// Whole number with thousands separators, e.g. `1,234`
pub fn format_int(value: f64) -> String {
    group_thousands(&format!("{:.0}", value))
}

/// Exact integer count with thousands separators, e.g. `18,446,744,073,709,551,615`
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Two decimals with thousands separators, e.g. `-1,234.57`
pub fn format_money(value: f64) -> String {
    group_thousands(&format!("{:.2}", value))
}

/// Ratio as a percentage with two decimals, or `N/A` when undefined
pub fn format_percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r.is_finite() => format!("{:.2}%", r * 100.0),
        _ => UNDEFINED_IMPACT.to_string(),
    }
}

/// Growth rate as a percentage with one decimal, e.g. `5.0%`
pub fn format_growth(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Insert `,` every three digits into the integer part of a formatted number
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        // inf / NaN
        return formatted.to_string();
    }

    let (int_part, frac_part) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(frac_part);
    grouped
}
