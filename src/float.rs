//! Decimal-to-`f64` parsing built from the integer parsers.
//!
//! `atod` splits at the decimal point, parses both sides as integers and combines them as
//! `int + frac * 10^-len(frac)`. This is fast but not correctly rounded: a fraction with many
//! significant digits loses precision in the final multiply-add. Integer parts are limited to
//! 20 digits, as in [`atoi`], and the fraction digits must fit in a `u64`.

use crate::parse::{atoi, atou};
use crate::scan::pmemchr;

/// `10^-n` for a fraction of `n` digits.
static SCALES: [f64; 21] = [
    1e0, 1e-1, 1e-2, 1e-3, 1e-4, 1e-5, 1e-6, 1e-7, 1e-8, 1e-9, 1e-10, 1e-11, 1e-12, 1e-13, 1e-14,
    1e-15, 1e-16, 1e-17, 1e-18, 1e-19, 1e-20,
];

/// `dst` carrying the sign of `src`: `dst` when `src >= 0`, `-dst` otherwise.
///
/// `dst` must fit in 63 bits.
#[inline]
pub fn copy_sign(src: i64, dst: u64) -> i64 {
    // All ones when negative; conditional two's-complement negate.
    let m = (src >> 63) as u64;
    (dst ^ m).wrapping_sub(m) as i64
}

/// Parse a decimal number such as `-12.375`.
///
/// Accepts an optional sign, integer digits, and an optional `.` followed by fraction digits.
/// Either side of the point may be empty. There is no exponent syntax and no validation.
#[inline]
pub fn atod(s: &[u8]) -> f64 {
    let Some(ilen) = pmemchr(s, b'.') else {
        return atoi(s) as f64;
    };

    let ipart = atoi(&s[..ilen]);
    let frac = &s[ilen + 1..];

    // A 19 or 20 digit fraction can exceed `i64::MAX`, so the sign is applied after widening.
    let fpart = atou(frac) as f64 * SCALES[frac.len().min(SCALES.len() - 1)];

    // The integer part of "-0.5" is zero, so the sign comes from the text.
    if s.first() == Some(&b'-') {
        ipart as f64 - fpart
    } else {
        ipart as f64 + fpart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(got: f64, want: f64) {
        assert!(
            (got - want).abs() <= want.abs() * 1e-15 + 1e-300,
            "got {got}, want {want}"
        );
    }

    #[test]
    fn test_copy_sign() {
        assert_eq!(copy_sign(1, 5), 5);
        assert_eq!(copy_sign(0, 5), 5);
        assert_eq!(copy_sign(-1, 5), -5);
        assert_eq!(copy_sign(i64::MIN, 7), -7);
        assert_eq!(copy_sign(-3, 0), 0);
    }

    #[test]
    fn test_atod_without_point() {
        assert_eq!(atod(b"123"), 123.0);
        assert_eq!(atod(b"-42"), -42.0);
        assert_eq!(atod(b""), 0.0);
    }

    #[test]
    fn test_atod() {
        assert_close(atod(b"123.456"), 123.456);
        assert_close(atod(b"-123.456"), -123.456);
        assert_close(atod(b"+1.5"), 1.5);
        assert_close(atod(b"0.125"), 0.125);
        assert_close(atod(b"3.14159265"), 3.14159265);
        assert_close(atod(b"-12.25"), -12.25);
        assert_close(atod(b".5"), 0.5);
        assert_eq!(atod(b"5."), 5.0);
    }

    #[test]
    fn test_atod_negative_fraction_only() {
        assert_close(atod(b"-0.5"), -0.5);
        assert_close(atod(b"-.25"), -0.25);
        assert_close(atod(b"-0.001"), -0.001);
    }

    #[test]
    fn test_atod_twenty_digit_fraction() {
        assert_close(atod(b"1.00000000000000000001"), 1.0);
        assert_close(atod(b"0.5000000000000000000"), 0.5);
    }

    #[test]
    fn test_atod_fraction_above_i64_max() {
        assert_close(atod(b"0.9500000000000000000"), 0.95);
        assert_close(atod(b"1.12345678901234567890"), 1.1234567890123457);
        assert_close(atod(b"-1.12345678901234567890"), -1.1234567890123457);
        assert_close(atod(b"-0.18446744073709551615"), -0.18446744073709552);
    }
}
