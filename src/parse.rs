//! Integer parsing by digit folding.
//!
//! A run of ASCII digits is loaded as a little-endian word and shifted left so the last digit
//! lands in the top byte. Each fold stage then combines neighbouring lanes with one masked
//! multiply and a shift:
//!
//! ```text
//! "12345678"  0x38_37_36_35_34_33_32_31
//! stage 1     0x00_4e_00_38_00_22_00_0c   (12, 34, 56, 78)
//! stage 2     0x0000_162e_0000_04d2       (1234, 5678)
//! stage 3     0x00bc614e                  (12345678)
//! ```
//!
//! No input is validated. The results are exact for ASCII digits (and hex letters in `htou*`)
//! up to each routine's length limit; anything else yields an unspecified value. Arithmetic wraps,
//! so bad input never panics in release builds. Debug builds assert the length limits.

use crate::word;

const DIGITS4: u32 = 0x0f0f_0f0f;
const DIGITS8: u64 = 0x0f0f_0f0f_0f0f_0f0f;
const PAIRS8: u64 = 0x00ff_00ff_00ff_00ff;
const QUADS8: u64 = 0x0000_ffff_0000_ffff;
const LETTERS8: u64 = 0x4040_4040_4040_4040;

/// Left-align `len` digits in the top bytes of the word; `len == 0` clears it.
#[inline(always)]
fn align_top(x: u64, len: usize) -> u64 {
    x.checked_shl(64u32.wrapping_sub(len as u32 * 8)).unwrap_or(0)
}

/// Parse up to 4 decimal digits.
#[inline]
pub fn atou4(s: &[u8]) -> u16 {
    debug_assert!(s.len() <= 4, "atou4 takes at most 4 digits, got {}", s.len());
    let x = word::load4(s);
    let x = x
        .checked_shl(32u32.wrapping_sub(s.len() as u32 * 8))
        .unwrap_or(0);

    let x = (x & DIGITS4).wrapping_mul((10 << 8) + 1) >> 8;
    let x = (x & 0x00ff_00ff).wrapping_mul((100 << 16) + 1) >> 16;
    x as u16
}

/// Parse up to 8 decimal digits.
#[inline]
pub fn atou8(s: &[u8]) -> u32 {
    debug_assert!(s.len() <= 8, "atou8 takes at most 8 digits, got {}", s.len());
    let x = align_top(word::load(s), s.len());

    let x = (x & DIGITS8).wrapping_mul((10 << 8) + 1) >> 8;
    let x = (x & PAIRS8).wrapping_mul((100 << 16) + 1) >> 16;
    let x = (x & QUADS8).wrapping_mul((10000 << 32) + 1) >> 32;
    x as u32
}

/// Parse up to 20 decimal digits.
///
/// The input is split into a leading chunk of `len % 8` digits followed by whole 8-digit chunks.
/// Longer input returns junk.
#[inline]
pub fn atou(s: &[u8]) -> u64 {
    debug_assert!(s.len() <= 20, "atou takes at most 20 digits, got {}", s.len());
    let mut s = s;
    let mut x = 0u64;

    if s.len() > 8 {
        let (head, rest) = s.split_at(s.len() % 8);
        x = u64::from(atou8(head)).wrapping_mul(100_000_000);
        s = rest;

        if s.len() > 8 {
            let (mid, rest) = s.split_at(8);
            x = x
                .wrapping_add(u64::from(atou8(mid)))
                .wrapping_mul(100_000_000);
            s = rest;
        }
    }

    x.wrapping_add(u64::from(atou8(s)))
}

/// Parse a signed decimal with at most one leading `+` or `-`. No whitespace.
#[inline]
pub fn atoi(s: &[u8]) -> i64 {
    let first = s.first().copied().unwrap_or(0);
    let neg = i64::from(first == b'-');
    let signed = usize::from(first == b'-' || first == b'+');

    let x = atou(&s[signed..]) as i64;
    let m = neg.wrapping_neg();
    (x ^ m).wrapping_sub(m)
}

/// Parse up to 8 hex digits, either case.
#[inline]
pub fn htou8(s: &[u8]) -> u32 {
    debug_assert!(s.len() <= 8, "htou8 takes at most 8 digits, got {}", s.len());
    let mut x = align_top(word::load(s), s.len());

    // Letters have bit 6 set: 'a' (0x61) + 9 = 0x6a, low nibble 0xa.
    x = x.wrapping_add(((x & LETTERS8) >> 6).wrapping_mul(9));

    let x = (x & DIGITS8).wrapping_mul((1 << 12) + 1) >> 8;
    let x = (x & PAIRS8).wrapping_mul((1 << 24) + 1) >> 16;
    let x = (x & QUADS8).wrapping_mul((1 << 48) + 1) >> 32;
    x as u32
}

/// Parse up to 16 hex digits.
#[inline]
pub fn htou(s: &[u8]) -> u64 {
    debug_assert!(s.len() <= 16, "htou takes at most 16 digits, got {}", s.len());
    if s.len() > 8 {
        let (hi, lo) = s.split_at(s.len() - 8);
        (u64::from(htou8(hi)) << 32).wrapping_add(u64::from(htou8(lo)))
    } else {
        u64::from(htou8(s))
    }
}
