use chrono::NaiveDate;

use crate::core::{BandNormalization, MetricBand, TimeSeriesPoint};

pub const MISSING_LABEL: &str = "n/a";
pub const ACTIVE_ESTIMATE_LABEL: &str = "Active (est.)";

/// Whole count with thousands separators; `n/a` when missing.
#[must_use]
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return MISSING_LABEL.to_owned();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Percentage with one decimal; `n/a` when missing.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING_LABEL.to_owned();
    }
    format!("{value:.1}%")
}

/// Tooltip date label, e.g. `Mar 7, 2021`.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Gridline label, e.g. `Apr 2021`.
#[must_use]
pub fn format_month(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// One tooltip line per band, followed by the active case estimate.
#[must_use]
pub fn tooltip_lines(point: &TimeSeriesPoint, bands: &[MetricBand]) -> Vec<String> {
    let mut lines: Vec<String> = bands
        .iter()
        .map(|band| {
            let value = point.value(band.metric);
            let formatted = match band.normalization {
                BandNormalization::SeriesMax => format_count(value),
                BandNormalization::Fixed { .. } => format_percent(value),
            };
            format!("{}: {formatted}", band.label)
        })
        .collect();
    lines.push(format!(
        "{ACTIVE_ESTIMATE_LABEL}: {}",
        format_count(point.active_est)
    ));
    lines
}

/// Deterministic, backend-independent text width estimate.
#[must_use]
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' | '(' | ')' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.56,
        }
    });
    (units * font_size).max(font_size)
}
