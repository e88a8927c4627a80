use crate::domain::entities::planet::{Dimension, Planet};

pub const PLACEHOLDER: &str = "—";

pub fn format_measurement(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_dimension(planet: &Planet, dimension: Dimension) -> String {
    let spec = dimension.spec();
    format_measurement(planet.measurement(dimension), spec.decimals)
}

pub fn format_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Column header text, e.g. `Radius (R⊕)`.
pub fn dimension_heading(dimension: Dimension) -> String {
    let spec = dimension.spec();
    if spec.unit.is_empty() {
        spec.label.to_string()
    } else {
        format!("{} ({})", spec.label, spec.unit)
    }
}
