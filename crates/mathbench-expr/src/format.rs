// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Number formatting for results.

/// Significant digits kept when printing a number.
pub const PRECISION: usize = 14;

/// Format a real number with at most [`PRECISION`] significant digits.
///
/// Trailing zeros are trimmed; `0.1 + 0.2` prints as `0.3`. Very large or very
/// small magnitudes switch to exponent notation (`1e+21`, `1e-8`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if n == 0.0 {
        return "0".into();
    }
    let rounded: f64 = format!("{:.*e}", PRECISION - 1, n).parse().unwrap_or(n);
    let magnitude = rounded.abs();
    if !(1e-7..1e21).contains(&magnitude) {
        let text = format!("{rounded:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_float_noise() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(2f64.sqrt()), "1.4142135623731");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn exponent_notation() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-8), "1.5e-8");
    }
}
