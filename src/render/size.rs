//! Byte count formatting

use crate::options::SizeFormat;

const UNITS: [&str; 9] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];

pub fn format_size(bytes: u64, format: SizeFormat) -> String {
    match format {
        SizeFormat::Bytes => bytes.to_string(),
        SizeFormat::Human => human_size(bytes, false),
        SizeFormat::HumanCompact => human_size(bytes, true),
    }
}

/// Binary-prefixed size. Each unit step divides by 1024; the mantissa is
/// rounded to one decimal place (or an integer when `compact`) and kept
/// below 1024 by moving to the next unit when rounding would reach it.
fn human_size(bytes: u64, compact: bool) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let round = |value: f64| {
        if compact {
            value.round()
        } else {
            (value * 10.0).round() / 10.0
        }
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if round(value) >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let value = round(value);
    if compact {
        format!("{value:.0}{}", UNITS[unit])
    } else {
        format!("{value:.1}{}", UNITS[unit])
    }
}
