//! Number normalization, equality and display.

use serde_json::Number as JsonNumber;

use crate::ParseError;

/// Builds a JSON number from a double, preferring the integer representation
/// whenever the value is integral so `1.0` and `1` canonicalize alike.
///
/// ```
/// # use tapose_core::number::normalize_f64;
/// assert_eq!(normalize_f64(2.0)?.to_string(), "2");
/// assert_eq!(normalize_f64(2.5)?.to_string(), "2.5");
/// # Ok::<(), tapose_core::ParseError>(())
/// ```
pub fn normalize_f64(value: f64) -> Result<JsonNumber, ParseError> {
    if !value.is_finite() {
        return Err(ParseError::NotFinite { value });
    }
    if value.fract() == 0.0 && !(value == 0.0 && value.is_sign_negative()) {
        if (i64::MIN as f64) <= value && value < (i64::MAX as f64) {
            return Ok(JsonNumber::from(value as i64));
        }
        if value >= 0.0 && value < (u64::MAX as f64) {
            return Ok(JsonNumber::from(value as u64));
        }
    }
    JsonNumber::from_f64(value).ok_or(ParseError::NotFinite { value })
}

/// Returns the IEEE-754 double a number compares as.
#[must_use]
pub fn as_double(number: &JsonNumber) -> f64 {
    if let Some(i) = number.as_i64() {
        return i as f64;
    }
    if let Some(u) = number.as_u64() {
        return u as f64;
    }
    number.as_f64().unwrap_or(0.0)
}

/// Numbers are equal when their double values are, matching how the
/// documents' canonical serialization compares them.
#[must_use]
pub fn numbers_equal(lhs: &JsonNumber, rhs: &JsonNumber) -> bool {
    if let (Some(a), Some(b)) = (lhs.as_i64(), rhs.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (lhs.as_u64(), rhs.as_u64()) {
        return a == b;
    }
    as_double(lhs) == as_double(rhs)
}

/// Renders a number the way the display panels show it: integral values
/// without a fractional part, everything else in shortest round-trip form.
///
/// ```
/// # use tapose_core::number::render_number;
/// let n = serde_json::Number::from_f64(3.0).unwrap();
/// assert_eq!(render_number(&n), "3");
/// let n = serde_json::Number::from_f64(0.25).unwrap();
/// assert_eq!(render_number(&n), "0.25");
/// ```
#[must_use]
pub fn render_number(number: &JsonNumber) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    let value = as_double(number);
    match normalize_f64(value) {
        Ok(normalized) if normalized.is_i64() || normalized.is_u64() => normalized.to_string(),
        _ => format!("{value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_doubles_normalize_to_integers() {
        assert!(normalize_f64(42.0).unwrap().is_i64());
        assert!(normalize_f64(-7.0).unwrap().is_i64());
        assert!(normalize_f64(0.5).unwrap().is_f64());
    }

    #[test]
    fn negative_zero_stays_a_double() {
        assert!(normalize_f64(-0.0).unwrap().is_f64());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(normalize_f64(f64::NAN), Err(ParseError::NotFinite { .. })));
        assert!(matches!(normalize_f64(f64::INFINITY), Err(ParseError::NotFinite { .. })));
    }

    #[test]
    fn integer_and_double_forms_compare_equal() {
        let one = JsonNumber::from(1);
        let one_point_zero = JsonNumber::from_f64(1.0).unwrap();
        assert!(numbers_equal(&one, &one_point_zero));
        assert!(!numbers_equal(&one, &JsonNumber::from(2)));
    }

    #[test]
    fn render_drops_trailing_zero_fraction() {
        assert_eq!(render_number(&JsonNumber::from_f64(10.0).unwrap()), "10");
        assert_eq!(render_number(&JsonNumber::from_f64(19.99).unwrap()), "19.99");
        assert_eq!(render_number(&JsonNumber::from(-3)), "-3");
    }
}
