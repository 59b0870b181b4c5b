//! Console formatting helpers.

/// `$1,234.56` (`$-1,234.56` below zero); empty for NaN or infinite values.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("${sign}{}", group_thousands(value.abs()))
}

/// Cash-flow form: `-$1,234.56` for losses, `$1,234.56` otherwise.
pub fn format_signed_currency(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(value.abs()))
}

pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    format!("{value:.2}%")
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{frac_part}")
}
