//! Numeric extraction from unit-bearing display strings.
//!
//! The backend reports values like `"12.34 km²"` or `"15.58 trees per km²"`.
//! Charts need the number in front: the first space-delimited token, read as
//! the longest prefix that forms a decimal literal. Anything without such a
//! prefix (`"N/A (single image)"`, `""`) yields `NaN`.

/// Leading numeric token of a display string, `NaN` when there is none
pub fn leading_number(text: &str) -> f64 {
    let token = text.split(' ').next().unwrap_or("");
    parse_float_prefix(token)
}

/// Longest decimal-literal prefix of `input`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or `Infinity`. Trailing garbage is ignored.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_strings() {
        assert_eq!(leading_number("1.23 km²"), 1.23);
        assert_eq!(leading_number("4.07 per km²"), 4.07);
        assert_eq!(leading_number("15.58 trees per km²"), 15.58);
        assert_eq!(leading_number("12"), 12.0);
    }

    #[test]
    fn test_only_first_token_counts() {
        assert_eq!(leading_number("1.5km² 2.0"), 1.5);
        assert!(leading_number("about 3 km²").is_nan());
    }

    #[test]
    fn test_malformed_input_is_nan() {
        assert!(leading_number("").is_nan());
        assert!(leading_number("N/A (single image)").is_nan());
        assert!(leading_number(" 1.0 km²").is_nan());
        assert!(leading_number(".").is_nan());
        assert!(leading_number("-").is_nan());
        assert!(leading_number("e5").is_nan());
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(parse_float_prefix("-.5"), -0.5);
        assert_eq!(parse_float_prefix("+2."), 2.0);
        assert_eq!(parse_float_prefix("1e3m"), 1000.0);
        assert_eq!(parse_float_prefix("1e"), 1.0);
        assert_eq!(parse_float_prefix("2E-2"), 0.02);
        assert_eq!(parse_float_prefix("1,234"), 1.0);
        assert_eq!(parse_float_prefix("\t7"), 7.0);
        assert_eq!(parse_float_prefix("Infinity"), f64::INFINITY);
        assert_eq!(parse_float_prefix("-Infinityx"), f64::NEG_INFINITY);
    }

    proptest! {
        #[test]
        fn prop_formatted_values_round_trip(value in -1.0e9f64..1.0e9) {
            let text = format!("{} km²", value);
            prop_assert_eq!(leading_number(&text), value);
        }

        #[test]
        fn prop_never_panics(text in ".*") {
            let _ = leading_number(&text);
        }
    }
}
