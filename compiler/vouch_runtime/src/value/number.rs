//! Rendering of `float` and `double` the way `Float.toString` and
//! `Double.toString` print them.
//!
//! Both start from the shortest round-tripping digits (`{:e}`) and lay them
//! out in plain notation for magnitudes in `[1e-3, 1e7)`, and in
//! `d.dddE±n` notation otherwise. A fractional part is always present.

/// `Double.toString(value)`.
pub fn java_double_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    layout(&format!("{value:e}"))
}

/// `Float.toString(value)`.
pub fn java_float_string(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    layout(&format!("{value:e}"))
}

/// Lay out `[-]d[.ddd]e[-]n` scientific text in the Java style.
fn layout(scientific: &str) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::with_capacity(digits.len() + 8);
    out.push_str(sign);
    if (-3..7).contains(&exponent) {
        if exponent < 0 {
            out.push_str("0.");
            for _ in 0..(-exponent - 1) {
                out.push('0');
            }
            out.push_str(&digits);
        } else {
            let int_len = exponent.unsigned_abs() as usize + 1;
            if digits.len() > int_len {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            } else {
                out.push_str(&digits);
                for _ in digits.len()..int_len {
                    out.push('0');
                }
                out.push_str(".0");
            }
        }
    } else {
        out.push_str(&digits[..1]);
        out.push('.');
        if digits.len() > 1 {
            out.push_str(&digits[1..]);
        } else {
            out.push('0');
        }
        out.push('E');
        out.push_str(&exponent.to_string());
    }
    out
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_range() {
        assert_eq!(java_double_string(1.0), "1.0");
        assert_eq!(java_double_string(100.0), "100.0");
        assert_eq!(java_double_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(java_double_string(0.1 * 0.2), "0.020000000000000004");
        assert_eq!(java_double_string(-0.1), "-0.1");
        assert_eq!(java_double_string(0.001), "0.001");
        assert_eq!(java_double_string(1_234_567.5), "1234567.5");
        assert_eq!(java_double_string(9_999_999.0), "9999999.0");
    }

    #[test]
    fn scientific_range() {
        assert_eq!(java_double_string(1.0e7), "1.0E7");
        assert_eq!(java_double_string(1.5e-4), "1.5E-4");
        assert_eq!(java_double_string(f64::MAX), "1.7976931348623157E308");
        assert_eq!(java_double_string(f64::MIN_POSITIVE), "2.2250738585072014E-308");
        assert_eq!(java_double_string(-2.5e10), "-2.5E10");
    }

    #[test]
    fn special_values() {
        assert_eq!(java_double_string(0.0), "0.0");
        assert_eq!(java_double_string(-0.0), "-0.0");
        assert_eq!(java_double_string(f64::NAN), "NaN");
        assert_eq!(java_double_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(java_float_string(f32::INFINITY), "Infinity");
    }

    #[test]
    fn floats_use_single_precision_digits() {
        assert_eq!(java_float_string(0.1_f32 * 0.2_f32), "0.020000001");
        assert_eq!(java_float_string(0.1_f32 + 0.2_f32), "0.3");
        assert_eq!(java_float_string(0.5), "0.5");
        assert_eq!(java_float_string(3.4e38), "3.4E38");
    }

    proptest! {
        #[test]
        fn double_text_round_trips(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let text = java_double_string(value);
            let parsed: f64 = text.parse().unwrap();
            prop_assert_eq!(parsed.to_bits(), value.to_bits());
        }

        #[test]
        fn float_text_round_trips(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
            let text = java_float_string(value);
            let parsed: f32 = text.parse().unwrap();
            prop_assert_eq!(parsed.to_bits(), value.to_bits());
        }
    }
}
