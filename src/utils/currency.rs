//! Number formatting for report output
//!
//! Thousand separators and fixed decimals for currency amounts, counts and
//! ratios. No currency symbol is applied; exports are consumed by tools that
//! add their own.

/// Group the integer digits of `value` with commas
///
/// # Examples
/// ```
/// use sales_analytics::utils::currency::format_thousands;
/// assert_eq!(format_thousands(1234567), "1,234,567");
/// assert_eq!(format_thousands(-9876), "-9,876");
/// ```
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format an amount with two decimals and thousand separators
///
/// # Examples
/// ```
/// use sales_analytics::utils::currency::format_amount;
/// assert_eq!(format_amount(1234.5), "1,234.50");
/// assert_eq!(format_amount(0.0), "0.00");
/// ```
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as i64;
    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, format_thousands(cents / 100), cents % 100)
}

/// Format a count, rounding to the nearest whole number
pub fn format_count(value: f64) -> String {
    format_thousands(value.round() as i64)
}
