//! Display helpers for numbers and text shown in embeds.

/// Placeholder for values the provider did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a price with two decimals and a dollar sign, e.g. `$182.40`.
pub fn format_price(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("${v:.2}"))
}

/// Formats an optional ratio with two decimals.
pub fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}"))
}

/// Formats market capitalization in billions, e.g. `$2891.20B`.
pub fn format_market_cap(value: Option<u64>) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("${:.2}B", v as f64 / 1e9),
    )
}

/// Groups digits by thousands, e.g. `12,345,678`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Formats an optional volume with thousands separators.
pub fn format_volume(value: Option<u64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_thousands)
}
