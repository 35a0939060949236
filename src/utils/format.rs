//! Number and date formatting

use std::fmt;

use chrono::{DateTime, TimeZone};
use wasm_bindgen::JsValue;

/// Short date pattern used when no browser locale is available
pub const SHORT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Format an integer with thousands separators
///
/// ```
/// use plant_dashboard::utils::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(12), "12");
/// ```
pub fn format_number(value: i64) -> String {
    let digits = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Format a number with thousands separators in its integer part only.
///
/// The fractional digits are kept as-is. Values JavaScript prints in
/// exponent form (at or above 1e21, or below 1e-6) keep that form ungrouped,
/// as do `NaN`, the infinities and negative zero.
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return exponent_form(value);
    }

    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => format!("{}{}.{}", sign, group_digits(int_part), frac_part),
        None => format!("{}{}", sign, group_digits(unsigned)),
    }
}

/// `1e21` -> `"1e+21"`, `1.5e-7` -> `"1.5e-7"`
fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short date for a chrono timestamp (`M/D/YYYY`)
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format(SHORT_DATE_FORMAT).to_string()
}

/// Locale-aware short date from anything `new Date(value)` accepts.
///
/// Browser only. Unparsable input yields `"Invalid Date"`.
pub fn locale_date_string(value: &JsValue) -> String {
    js_sys::Date::new(value)
        .to_locale_date_string("default", &JsValue::UNDEFINED)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(12), "12");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-1234567), "-1,234,567");
        assert_eq!(format_number(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234567.0), "1,234,567");
        assert_eq!(format_decimal(1234.5678), "1,234.5678");
        assert_eq!(format_decimal(-98765.25), "-98,765.25");
        assert_eq!(format_decimal(0.5), "0.5");
        assert_eq!(format_decimal(f64::NAN), "NaN");
        assert_eq!(format_decimal(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_decimal_follows_javascript_number_spelling() {
        assert_eq!(format_decimal(-0.0), "0");
        assert_eq!(format_decimal(1e21), "1e+21");
        assert_eq!(format_decimal(-2.5e22), "-2.5e+22");
        assert_eq!(format_decimal(1e-7), "1e-7");
        assert_eq!(format_decimal(1.5e-7), "1.5e-7");
        assert_eq!(format_decimal(0.000001), "0.000001");
        assert_eq!(format_decimal(1e20), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
        assert_eq!(format_date(&date), "3/7/2024");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let late = offset.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_date(&late), "12/31/2023");
    }
}
