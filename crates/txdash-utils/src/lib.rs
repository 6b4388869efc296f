//! Formatting and HTML helpers

use chrono::NaiveDate;

/// Format a number with a thousands separator and at most two decimals.
///
/// Trailing zero decimals are dropped, so `1500.0` becomes `1,500` and
/// `1500.5` becomes `1,500.5`.
pub fn format_number(value: f64, separator: &str) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }

    if fraction != 0 {
        let fraction = format!("{:02}", fraction);
        result.push('.');
        result.push_str(fraction.trim_end_matches('0'));
    }

    if value < 0.0 && cents != 0 {
        result.insert(0, '-');
    }
    result
}

/// Currency followed by the amount, e.g. `RWF 12,000`
pub fn format_amount(amount: f64, currency: &str, separator: &str) -> String {
    format!("{} {}", currency, format_number(amount, separator))
}

/// Turn a wire identifier into a caption: `cash_in` becomes `Cash in`
pub fn humanize(value: &str) -> String {
    let spaced = value.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Describe `date` relative to `today`.
///
/// Same day and the day before read `Today` and `Yesterday`, anything within
/// a week reads `N days ago`, older dates read like `Mar 5, 2024`.
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days().abs() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days if days < 7 => format!("{} days ago", days),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
