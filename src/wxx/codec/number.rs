//! Float to text rendering used for every real-valued attribute.
//!
//! The editor expects plain decimal text that always carries a fractional part,
//! so `100` is written `100.0` and `1.5e-5` is written `0.000015`.

/// Renders a real number the way the editor writes it.
///
/// The shortest round-trip digits are used unless the decimal exponent is below
/// -4 or at least 6, in which case the value is written in fixed-point with six
/// fractional digits. Trailing zeros after the point are then dropped, keeping at
/// least one fractional digit.
///
/// ```
/// use wxx_codec::wxx::codec::number::format_real;
///
/// assert_eq!(format_real(1234567.0), "1234567.0");
/// assert_eq!(format_real(0.1203), "0.1203");
/// assert_eq!(format_real(100.0), "100.0");
/// ```
pub fn format_real(value: f64) -> String {
    let mut text = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "+Inf" } else { "-Inf" };
        sign.to_string()
    } else if uses_exponent(value) {
        format!("{:.6}", value)
    } else {
        value.to_string()
    };

    if !text.contains('.') {
        text.push_str(".0");
        return text;
    }

    let trimmed_len = text.trim_end_matches('0').len();
    text.truncate(trimmed_len);
    if text.ends_with('.') {
        text.push('0');
    }
    text
}

/// Same as [`format_real`] but whole values lose their `.0` suffix (`10.0` becomes `10`).
pub fn format_real_bare(value: f64) -> String {
    let text = format_real(value);
    match text.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Whether the shortest general rendering of `value` would switch to an exponent.
fn uses_exponent(value: f64) -> bool {
    let scientific = format!("{:e}", value);
    let exponent = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok())
        .unwrap_or(0);
    !(-4..6).contains(&exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_threshold_matches_general_format() {
        assert!(!uses_exponent(123456.0));
        assert!(uses_exponent(1234567.0));
        assert!(!uses_exponent(0.0001));
        assert!(uses_exponent(0.00001));
        assert!(!uses_exponent(0.0));
    }

    #[test]
    fn small_values_lose_digits_past_six_places() {
        assert_eq!(format_real(0.00001), "0.00001");
        assert_eq!(format_real(0.0000001), "0.0");
        assert_eq!(format_real(0.00001234567), "0.000012");
    }

    #[test]
    fn large_values_stay_plain() {
        assert_eq!(format_real(1e21), "1000000000000000000000.0");
        assert_eq!(format_real(1234567.891), "1234567.891");
        assert_eq!(format_real(-2500000.0), "-2500000.0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_real(f64::NAN), "NaN.0");
        assert_eq!(format_real(f64::INFINITY), "+Inf.0");
        assert_eq!(format_real(f64::NEG_INFINITY), "-Inf.0");
    }

    #[test]
    fn bare_form_only_strips_whole_suffix() {
        assert_eq!(format_real_bare(10.0), "10");
        assert_eq!(format_real_bare(10.5), "10.5");
        assert_eq!(format_real_bare(-1.0), "-1");
        assert_eq!(format_real_bare(0.05), "0.05");
    }
}
