//! Integer formatting, two digits at a time.
//!
//! Every routine writes into a caller-provided buffer and terminates the digits with a NUL.
//! Capacity is asserted once on entry.

use crate::err::{Result, SwarError};
use log::debug;

/// Widest zero-padded field [`utoap`] can produce.
pub const UTOAP_MAX_WIDTH: usize = 20;
/// Buffer length [`utoa`] needs: 20 digits and a NUL.
pub const UTOA_BUF_LEN: usize = 21;
/// Buffer length [`itoa8`] needs: sign, 8 digits and a NUL.
pub const ITOA8_BUF_LEN: usize = 10;
/// Buffer length [`itoa`] needs: sign, 20 digits and a NUL.
pub const ITOA_BUF_LEN: usize = 22;

/// `0..=49` as packed BCD, ones digit in the high nibble.
static PAIRS: [u8; 50] = [
    0x00, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90, //
    0x01, 0x11, 0x21, 0x31, 0x41, 0x51, 0x61, 0x71, 0x81, 0x91, //
    0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x82, 0x92, //
    0x03, 0x13, 0x23, 0x33, 0x43, 0x53, 0x63, 0x73, 0x83, 0x93, //
    0x04, 0x14, 0x24, 0x34, 0x44, 0x54, 0x64, 0x74, 0x84, 0x94, //
];

/// `x` (below 100) as two ASCII digits, packed little-endian: `7` becomes `"07"`.
#[inline]
pub fn utoa2p(x: u64) -> u16 {
    debug_assert!(x < 100, "utoa2p takes a value below 100, got {x}");

    // `x % 50` for x < 100, then add 5 to the tens nibble when x >= 50.
    let b50 = u32::from(x >= 50).wrapping_neg();
    let x2 = (x as u32).wrapping_sub(50 & b50);
    let t = u16::from(PAIRS[(x2 as usize).min(49)]) + (b50 & 5) as u16;

    // Spread the nibbles into two bytes and add '0' to both.
    ((t | (t << 4)) & 0x0f0f) | 0x3030
}

/// Write `x` (below 100) as two zero-padded digits to the start of `out`.
#[inline]
pub fn utoa2p_into(x: u64, out: &mut [u8]) {
    out[..2].copy_from_slice(&utoa2p(x).to_le_bytes());
}

/// Write the low `n` (at most 8) digits of `x` to `out[..n]`, zero padded.
///
/// Returns `x` divided by 100 once per extra pair consumed, so its low two digits are the pair
/// the leading digit(s) came from.
#[inline(always)]
fn pack_digits(mut x: u64, n: usize, out: &mut [u8]) -> u64 {
    debug_assert!(n <= 8);
    let mut tmp = u64::from(utoa2p(x % 100));

    let mut i = 2;
    while i < n {
        x /= 100;
        tmp = (tmp << 16) | u64::from(utoa2p(x % 100));
        i += 2;
    }

    // An odd width drops the leading '0' of the top pair.
    tmp >>= (n & 1) * 8;
    out[..n].copy_from_slice(&tmp.to_le_bytes()[..n]);
    x
}

/// `out[..width]` = `x` zero padded to `width` digits. `out` must hold `width` bytes.
#[inline(always)]
fn write_padded(x: u64, width: usize, out: &mut [u8]) {
    // Consume the one digit (odd width) or two digits left over from a chunk's top pair.
    let next = |x: u64, n: usize| if n & 1 == 1 { x / 10 } else { x / 100 };

    if width <= 8 {
        pack_digits(x, width, out);
    } else if width <= 16 {
        let x = pack_digits(x, width - 8, &mut out[8..width]);
        pack_digits(next(x, width), 8, out);
    } else {
        let x = pack_digits(x, width - 16, &mut out[16..width]);
        let x = pack_digits(next(x, width), 8, &mut out[8..16]);
        pack_digits(x / 100, 8, out);
    }
}

/// Format `x` as exactly `N` zero-padded digits followed by a NUL.
///
/// Values wider than `N` digits keep their low `N` digits. Panics if `buf` is shorter than
/// `N + 1`. Returns the digits.
#[inline]
pub fn utoap<const N: usize>(x: u64, buf: &mut [u8]) -> &[u8] {
    const { assert!(N <= UTOAP_MAX_WIDTH, "utoap supports at most 20 digits") };
    assert!(
        buf.len() > N,
        "utoap::<{N}> needs {} bytes, buffer has {}",
        N + 1,
        buf.len()
    );

    write_padded(x, N, buf);
    buf[N] = 0;
    &buf[..N]
}

/// [`utoap`] with the width chosen at runtime.
///
/// Returns the number of digits written (`width`).
pub fn utoap_dyn(x: u64, width: usize, buf: &mut [u8]) -> Result<usize> {
    if width > UTOAP_MAX_WIDTH {
        debug!("rejecting zero-padded width {width}");
        return Err(SwarError::WidthOutOfRange {
            width,
            max: UTOAP_MAX_WIDTH,
        });
    }
    if buf.len() <= width {
        debug!(
            "rejecting zero-padded width {width}: buffer holds {} bytes",
            buf.len()
        );
        return Err(SwarError::BufferTooSmall {
            need: width + 1,
            have: buf.len(),
        });
    }

    write_padded(x, width, buf);
    buf[width] = 0;
    Ok(width)
}

/// Format `x` without padding. Returns the digit count; `buf[len]` is NUL.
///
/// Panics if `buf` is shorter than [`UTOA_BUF_LEN`].
#[inline]
pub fn utoa(mut x: u64, buf: &mut [u8]) -> usize {
    assert!(
        buf.len() >= UTOA_BUF_LEN,
        "utoa needs {UTOA_BUF_LEN} bytes, buffer has {}",
        buf.len()
    );

    // Filled from the back, least significant pair first.
    let mut tmp = [0u8; 20];
    let mut p = tmp.len();

    while x >= 100 {
        p -= 2;
        utoa2p_into(x % 100, &mut tmp[p..]);
        x /= 100;
    }
    p -= 2;
    utoa2p_into(x, &mut tmp[p..]);
    p += usize::from(x < 10);

    let len = tmp.len() - p;
    buf[..len].copy_from_slice(&tmp[p..]);
    buf[len] = 0;
    len
}

/// Format a signed 64-bit integer. Returns the length including the sign; `buf[len]` is NUL.
///
/// `i64::MIN` is handled. Panics if `buf` is shorter than [`ITOA_BUF_LEN`].
#[inline]
pub fn itoa(x: i64, buf: &mut [u8]) -> usize {
    assert!(
        buf.len() >= ITOA_BUF_LEN,
        "itoa needs {ITOA_BUF_LEN} bytes, buffer has {}",
        buf.len()
    );

    // The sign is always stored and only kept by advancing past it.
    buf[0] = b'-';
    let neg = usize::from(x < 0);
    neg + utoa(x.unsigned_abs(), &mut buf[neg..])
}

/// Format a signed integer of at most 8 digits. Returns the length including the sign.
///
/// Magnitudes of `10^8` and above are out of range and produce unspecified digits. Panics if
/// `buf` is shorter than [`ITOA8_BUF_LEN`].
#[inline]
pub fn itoa8(x: i32, buf: &mut [u8]) -> usize {
    assert!(
        buf.len() >= ITOA8_BUF_LEN,
        "itoa8 needs {ITOA8_BUF_LEN} bytes, buffer has {}",
        buf.len()
    );
    debug_assert!(
        x.unsigned_abs() < 100_000_000,
        "itoa8 takes at most 8 digits, got {x}"
    );

    buf[0] = b'-';
    let neg = usize::from(x < 0);
    let out = &mut buf[neg..];
    let mut x = x.unsigned_abs();

    // Most significant pair ends up in the low bytes.
    let mut tmp = 0u64;
    let mut n = 0;
    while x >= 100 {
        n += 2;
        tmp = (tmp << 16) | u64::from(utoa2p(u64::from(x % 100)));
        x /= 100;
    }
    n += 2;
    tmp = (tmp << 16) | u64::from(utoa2p(u64::from(x)));

    // Drop the leading '0' of a single-digit top pair.
    let lead = usize::from(x < 10);
    n -= lead;
    tmp >>= lead * 8;

    let n = n.min(8);
    out[..n].copy_from_slice(&tmp.to_le_bytes()[..n]);
    out[n] = 0;
    n + neg
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cstr(buf: &[u8]) -> &str {
        let end = buf.iter().position(|&b| b == 0).unwrap();
        std::str::from_utf8(&buf[..end]).unwrap()
    }

    #[test]
    fn test_utoa2p() {
        for x in 0..100u64 {
            let pair = utoa2p(x).to_le_bytes();
            assert_eq!(&pair, format!("{x:02}").as_bytes(), "x {x}");
        }
        let mut out = [0u8; 2];
        utoa2p_into(50, &mut out);
        assert_eq!(&out, b"50");
    }

    #[test]
    fn test_utoap_zero() {
        let mut buf = [0xffu8; 32];
        assert_eq!(utoap::<1>(0, &mut buf), b"0");
        assert_eq!(utoap::<2>(0, &mut buf), b"00");
        assert_eq!(utoap::<9>(0, &mut buf), b"000000000");
        assert_eq!(utoap::<16>(0, &mut buf), b"0000000000000000");
        assert_eq!(utoap::<19>(0, &mut buf), b"0000000000000000000");
        assert_eq!(cstr(&buf), "0000000000000000000");
    }

    #[test]
    fn test_utoap_values() {
        let mut buf = [0xffu8; 32];
        assert_eq!(utoap::<0>(7, &mut buf), b"");
        assert_eq!(buf[0], 0);
        assert_eq!(utoap::<1>(7, &mut buf), b"7");
        assert_eq!(utoap::<5>(7, &mut buf), b"00007");
        assert_eq!(utoap::<6>(12345, &mut buf), b"012345");
        assert_eq!(utoap::<7>(12345, &mut buf), b"0012345");
        assert_eq!(utoap::<8>(12345, &mut buf), b"00012345");
        assert_eq!(utoap::<9>(12345, &mut buf), b"000012345");
        assert_eq!(utoap::<11>(12345, &mut buf), b"00000012345");
        assert_eq!(utoap::<12>(12345678901, &mut buf), b"012345678901");
        assert_eq!(utoap::<13>(12345678901, &mut buf), b"0012345678901");
        assert_eq!(utoap::<16>(12345678901, &mut buf), b"0000012345678901");
        assert_eq!(utoap::<17>(123456789012345, &mut buf), b"00123456789012345");
        assert_eq!(utoap::<18>(123456789012345, &mut buf), b"000123456789012345");
        assert_eq!(utoap::<19>(123456789012345, &mut buf), b"0000123456789012345");
        assert_eq!(utoap::<20>(123456789012345, &mut buf), b"00000123456789012345");
        assert_eq!(utoap::<20>(u64::MAX, &mut buf), b"18446744073709551615");
    }

    #[test]
    fn test_utoap_keeps_low_digits() {
        let mut buf = [0u8; 8];
        assert_eq!(utoap::<3>(123456, &mut buf), b"456");
        assert_eq!(utoap::<4>(123456, &mut buf), b"3456");
    }

    #[test]
    fn test_utoap_dyn() {
        let mut buf = [0u8; 24];
        let padded = format!("{:020}", 42);
        for width in 0..=20 {
            assert_eq!(utoap_dyn(42, width, &mut buf), Ok(width));
            assert_eq!(cstr(&buf), &padded[20 - width..], "width {width}");
        }
        assert_eq!(
            utoap_dyn(1, 21, &mut buf),
            Err(SwarError::WidthOutOfRange { width: 21, max: 20 })
        );
        assert_eq!(
            utoap_dyn(1, 8, &mut buf[..8]),
            Err(SwarError::BufferTooSmall { need: 9, have: 8 })
        );
    }

    #[test]
    #[should_panic(expected = "needs 5 bytes")]
    fn test_utoap_short_buffer_panics() {
        let mut buf = [0u8; 4];
        utoap::<4>(1, &mut buf);
    }

    #[test]
    fn test_itoa8() {
        let mut buf = [0u8; ITOA8_BUF_LEN];
        for (x, want) in [
            (0, "0"),
            (1, "1"),
            (12, "12"),
            (123, "123"),
            (1234, "1234"),
            (12345, "12345"),
            (123456, "123456"),
            (1234567, "1234567"),
            (12345678, "12345678"),
            (-5, "-5"),
            (-10, "-10"),
            (-99999999, "-99999999"),
        ] {
            assert_eq!(itoa8(x, &mut buf), want.len(), "x {x}");
            assert_eq!(cstr(&buf), want);
        }
    }

    #[test]
    fn test_itoa_small_range() {
        let mut buf = [0u8; ITOA_BUF_LEN];
        for x in -100_000i64..100_000 {
            let len = itoa(x, &mut buf);
            assert_eq!(&buf[..len], x.to_string().as_bytes());
            assert_eq!(buf[len], 0);
        }
    }

    #[test]
    fn test_itoa_extremes() {
        let mut buf = [0u8; ITOA_BUF_LEN];
        for x in [i64::MIN, i64::MIN + 1, i64::MAX, -1, 0, 1_000_000_000_000] {
            let len = itoa(x, &mut buf);
            assert_eq!(cstr(&buf), x.to_string());
            assert_eq!(len, x.to_string().len());
        }
    }

    #[test]
    fn test_utoa() {
        let mut buf = [0u8; UTOA_BUF_LEN];
        for x in [0, 9, 10, 99, 100, 101, 999_999, u64::MAX] {
            let len = utoa(x, &mut buf);
            assert_eq!(&buf[..len], x.to_string().as_bytes());
        }
    }
}
