//! Single-word (8 byte) scan kernels.
//!
//! Everything in `scan` bottoms out in [`memchr_word`]. The const parameters select, at compile
//! time, one of eight branch-free variants:
//!
//! - `PRINTABLE`: input bytes (and the needle) are below `0x80`, so the detection mask can use a
//!   plain add. Wrong results otherwise.
//! - `EXISTS`: the caller guarantees a match, so the offset is a bare bit count. Without it the
//!   count of an empty mask (64) is folded into [`NOT_FOUND`].
//! - `REVERSE`: report the last match instead of the first.
//!
//! The slice wrappers (`memchr8`, `pmemrchr8k`, ...) read the first 8 bytes of their input. A
//! shorter slice is zero-filled, which mirrors how these kernels are used on NUL-terminated text.

use crate::detect::byte_mask;
use crate::word;

/// Offset returned by the 8-byte kernels when the needle is absent.
pub const NOT_FOUND: u32 = u32::MAX;

/// Offset (0..=7) of the first, or with `REVERSE` the last, byte of `x` equal to `c`.
#[inline(always)]
pub fn memchr_word<const PRINTABLE: bool, const EXISTS: bool, const REVERSE: bool>(
    x: u64,
    c: u8,
) -> u32 {
    let m = byte_mask::<PRINTABLE>(x, c);

    if EXISTS {
        debug_assert!(m != 0, "needle {c:#04x} asserted present but missing");
        if !REVERSE {
            // 7, 15, 23, ...
            m.trailing_zeros() / 8
        } else {
            // 0, 8, 16, ...
            7u32.wrapping_sub(m.leading_zeros() / 8)
        }
    } else if !REVERSE {
        // An empty mask counts 64 zeros, i.e. offset 8.
        let pos = m.trailing_zeros() / 8;
        pos | (pos >> 3).wrapping_neg()
    } else {
        // Setting bit 0 turns an empty mask into 63 leading zeros, i.e. offset -1.
        7u32.wrapping_sub(((m | 1).leading_zeros() + 1) / 8)
    }
}

/// `x` with every byte at and after the first `c` cleared.
///
/// Without `EXISTS` a word that does not contain `c` is returned unchanged.
#[inline(always)]
pub fn trim_word<const PRINTABLE: bool, const EXISTS: bool>(x: u64, c: u8) -> u64 {
    let m = byte_mask::<PRINTABLE>(x, c);

    let keep = if EXISTS {
        debug_assert!(m != 0, "needle {c:#04x} asserted present but missing");
        // The lowest high bit sits at 8k + 7; keep bits below 8k.
        (1u64 << (m.trailing_zeros() - 7)).wrapping_sub(1)
    } else {
        // Isolate the lowest high bit. An empty mask wraps to all ones.
        ((m & m.wrapping_neg()) >> 7).wrapping_sub(1)
    };

    x & keep
}

macro_rules! word_kernel {
    ($(#[$m:meta])* $name:ident, $printable:literal, $exists:literal, $reverse:literal) => {
        $(#[$m])*
        #[inline]
        pub fn $name(s: &[u8], c: u8) -> u32 {
            memchr_word::<$printable, $exists, $reverse>(word::load(s), c)
        }
    };
}

word_kernel!(
    /// Find `c` in the first 8 bytes of `s`.
    memchr8, false, false, false
);
word_kernel!(
    /// Find `c` in the first 8 bytes of `s`, which are known to contain it.
    memchr8k, false, true, false
);
word_kernel!(
    /// Find `c` in the first 8 printable bytes of `s`.
    pmemchr8, true, false, false
);
word_kernel!(
    /// Find `c` in the first 8 printable bytes of `s`, which are known to contain it.
    pmemchr8k, true, true, false
);
word_kernel!(
    /// Find the last `c` in the first 8 bytes of `s`.
    memrchr8, false, false, true
);
word_kernel!(
    /// Find the last `c` in the first 8 bytes of `s`, which are known to contain it.
    memrchr8k, false, true, true
);
word_kernel!(
    /// Find the last `c` in the first 8 printable bytes of `s`.
    pmemrchr8, true, false, true
);
word_kernel!(
    /// Find the last `c` in the first 8 printable bytes of `s`, which are known to contain it.
    pmemrchr8k, true, true, true
);

/// First 8 bytes of `s` as a word, cut at the first `c`.
#[inline]
pub fn trim8(s: &[u8], c: u8) -> u64 {
    trim_word::<false, false>(word::load(s), c)
}

/// [`trim8`] for printable input.
#[inline]
pub fn ptrim8(s: &[u8], c: u8) -> u64 {
    trim_word::<true, false>(word::load(s), c)
}

/// Offset of the first NUL in the first 8 bytes of `s`, or [`NOT_FOUND`].
#[inline]
pub fn strlen8(s: &[u8]) -> u32 {
    memchr8(s, 0)
}

/// [`strlen8`] for printable input.
#[inline]
pub fn pstrlen8(s: &[u8]) -> u32 {
    pmemchr8(s, 0)
}
