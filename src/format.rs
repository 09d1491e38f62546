//! Display formatting for amounts, dates and durations

use chrono::{DateTime, Datelike, Local, Utc};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Insert `,` every three digits of a non-negative integer string
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Two decimals with thousands separators, sign kept
fn money(symbol: &str, amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, group_thousands(whole), cents)
}

/// `1234.5` → `$1,234.50`
pub fn format_usd(amount: f64) -> String {
    money("$", amount)
}

/// `1234.5` → `₦1,234.50`
pub fn format_ngn(amount: f64) -> String {
    money("₦", amount)
}

/// Rate display: truncated (not rounded) to two decimals, unsigned
pub fn format_rate(value: f64) -> String {
    let truncated = ((value * 100.0).floor() / 100.0).abs();
    let fixed = format!("{:.2}", truncated);
    if truncated < 1000.0 {
        return fixed;
    }
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}.{}", group_thousands(whole), cents)
}

/// Decimal hours as words: `2.5` → `2 hours 30 minutes`, `1.0` → `1 hour`
pub fn hours_and_minutes(hours_decimal: f64) -> String {
    let hours = hours_decimal.floor();
    let minutes = ((hours_decimal - hours) * 60.0).round() as i64;
    let hours = hours as i64;
    let unit = if hours == 1 { "hour" } else { "hours" };
    if minutes == 0 {
        format!("{} {}", hours, unit)
    } else {
        format!("{} {} {:02} minutes", hours, unit, minutes)
    }
}

/// English month name for 1-12
pub fn month_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Current local month as `(name, 1-based number)`
pub fn current_month() -> (&'static str, u32) {
    let number = Local::now().month();
    (month_name(number).unwrap_or("January"), number)
}

/// `Mar 5, 2024`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `09:41AM`
pub fn format_time(date: &DateTime<Utc>) -> String {
    date.format("%I:%M%p").to_string()
}

/// First letter upper-cased, used for network names
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
