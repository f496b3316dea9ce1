//! Display formatting. Everything here is for rendering only; rounded values are never
//! written back into the calculator state.

use time::{macros::format_description, OffsetDateTime};

/// Whole currency units with thousands separators, rounding halves up.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = (value + 0.5).floor() as i64;
    group_thousands(rounded)
}

pub fn kilograms(value: f64) -> String {
    format!("{value:.2}")
}

/// Plain number for a form field; zero renders as an empty field.
pub fn input_or_blank(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn input_value(value: f64) -> String {
    value.to_string()
}

/// Wall-clock time for the "saved" indicator, in local time when the offset is known.
pub fn clock(at: OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]:[second]");
    at.format(format).unwrap_or_else(|_| "--:--:--".to_string())
}

pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.4, "999")]
    #[case(999.5, "1,000")]
    #[case(1_234_567.5, "1,234,568")]
    #[case(5457.075, "5,457")]
    #[case(-1234.4, "-1,234")]
    #[case(-2.5, "-2")]
    #[case(-0.2, "0")]
    #[case(f64::NAN, "-")]
    fn money_rounds_and_groups(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(money(value), expected);
    }

    #[test]
    fn kilograms_use_two_decimals() {
        assert_eq!(kilograms(6.4), "6.40");
        assert_eq!(kilograms(1.234), "1.23");
    }

    #[test]
    fn blank_inputs_for_zero() {
        assert_eq!(input_or_blank(0.0), "");
        assert_eq!(input_or_blank(0.05), "0.05");
        assert_eq!(input_or_blank(150000.0), "150000");
        assert_eq!(input_value(0.0), "0");
    }

    #[test]
    fn clock_shows_hours_minutes_seconds() {
        assert_eq!(clock(datetime!(2024-03-01 09:05:07 UTC)), "09:05:07");
    }
}
