//! Variable-length scan drivers (`memchr`/`memrchr` families).
//!
//! Each driver strides the haystack one word at a time with [`hasbyte`] and only resolves the
//! exact offset (via the `EXISTS` form of [`memchr_word`]) in the word that matched.
//!
//! Boundary handling never reads outside the slice:
//! - Haystacks shorter than a word are loaded zero-filled, and the filler bytes are replaced by
//!   `c ^ 1`, which can never match (and stays printable when `c` is).
//! - Longer haystacks are walked in full words; the last word is aligned to the end of the slice
//!   and overlaps its predecessor. Overlapping bytes have already been rejected, so a match in
//!   the final word is still the first (or, scanning backwards, the last) one.
//!
//! With `KNOWN` the caller asserts that `c` occurs, and the loop drops its end-of-buffer test:
//! the stride is clamped to the last full word instead. Breaking the promise makes the call spin
//! forever on that word; it never reads out of bounds. Debug builds check the promise up front.

use crate::detect::hasbyte;
use crate::scan::kernel::{NOT_FOUND, memchr_word};
use crate::word::{self, low_bytes, repeat_u64};

/// The partial word for haystacks shorter than 8 bytes, padded with bytes that cannot match `c`.
#[inline(always)]
fn short_word(s: &[u8], c: u8) -> u64 {
    debug_assert!(s.len() < 8);
    word::load(s) | (repeat_u64(c ^ 1) & !low_bytes(s.len()))
}

#[inline(always)]
fn resolve_short<const PRINTABLE: bool, const KNOWN: bool, const REVERSE: bool>(
    s: &[u8],
    c: u8,
) -> Option<usize> {
    let pos = memchr_word::<PRINTABLE, KNOWN, REVERSE>(short_word(s, c), c);
    if KNOWN || pos != NOT_FOUND {
        Some(pos as usize)
    } else {
        None
    }
}

/// Forward scan. `PRINTABLE` and `KNOWN` select the kernel and loop shape at compile time.
#[inline(always)]
pub(crate) fn find<const PRINTABLE: bool, const KNOWN: bool>(s: &[u8], c: u8) -> Option<usize> {
    #[cfg(feature = "perf-counters")]
    crate::perf::record_scan(s.len());

    if s.len() < 8 {
        return resolve_short::<PRINTABLE, KNOWN, false>(s, c);
    }

    let last = s.len() - 8;
    let mut p = 0;
    loop {
        #[cfg(feature = "perf-counters")]
        crate::perf::record_word();

        // SAFETY: `p <= last`, so `p + 8 <= s.len()`.
        let x = unsafe { word::load_unchecked(s.as_ptr().add(p)) };
        if hasbyte(x, c) {
            return Some(p + memchr_word::<PRINTABLE, true, false>(x, c) as usize);
        }
        if !KNOWN && p == last {
            return None;
        }
        p = (p + 8).min(last);
    }
}

/// Backward scan, the mirror image of [`find`].
#[inline(always)]
pub(crate) fn rfind<const PRINTABLE: bool, const KNOWN: bool>(s: &[u8], c: u8) -> Option<usize> {
    #[cfg(feature = "perf-counters")]
    crate::perf::record_scan(s.len());

    if s.len() < 8 {
        return resolve_short::<PRINTABLE, KNOWN, true>(s, c);
    }

    let mut p = s.len() - 8;
    loop {
        #[cfg(feature = "perf-counters")]
        crate::perf::record_word();

        // SAFETY: `p` only decreases from `s.len() - 8` and saturates at 0.
        let x = unsafe { word::load_unchecked(s.as_ptr().add(p)) };
        if hasbyte(x, c) {
            return Some(p + memchr_word::<PRINTABLE, true, true>(x, c) as usize);
        }
        if !KNOWN && p == 0 {
            return None;
        }
        p = p.saturating_sub(8);
    }
}

#[inline(always)]
fn known<const PRINTABLE: bool, const REVERSE: bool>(s: &[u8], c: u8) -> usize {
    debug_assert!(
        s.contains(&c),
        "needle {c:#04x} asserted present in a {}-byte haystack but missing",
        s.len()
    );
    let found = if REVERSE {
        rfind::<PRINTABLE, true>(s, c)
    } else {
        find::<PRINTABLE, true>(s, c)
    };
    // Unreachable for long haystacks; the known-present loops only exit through a match.
    found.unwrap_or(s.len())
}

/// Offset of the first `c` in `s`.
#[inline]
pub fn memchr(s: &[u8], c: u8) -> Option<usize> {
    find::<false, false>(s, c)
}

/// Offset of the first `c` in `s`, which must contain it.
///
/// If `s` does not contain `c` the call does not return (debug builds panic instead).
#[inline]
pub fn memchrk(s: &[u8], c: u8) -> usize {
    known::<false, false>(s, c)
}

/// Offset of the first `c` in printable (`< 0x80`) `s`.
#[inline]
pub fn pmemchr(s: &[u8], c: u8) -> Option<usize> {
    find::<true, false>(s, c)
}

/// [`memchrk`] for printable input.
#[inline]
pub fn pmemchrk(s: &[u8], c: u8) -> usize {
    known::<true, false>(s, c)
}

/// Offset of the last `c` in `s`.
#[inline]
pub fn memrchr(s: &[u8], c: u8) -> Option<usize> {
    rfind::<false, false>(s, c)
}

/// Offset of the last `c` in `s`, which must contain it.
///
/// If `s` does not contain `c` the call does not return (debug builds panic instead).
#[inline]
pub fn memrchrk(s: &[u8], c: u8) -> usize {
    known::<false, true>(s, c)
}

/// Offset of the last `c` in printable `s`.
#[inline]
pub fn pmemrchr(s: &[u8], c: u8) -> Option<usize> {
    rfind::<true, false>(s, c)
}

/// [`memrchrk`] for printable input.
#[inline]
pub fn pmemrchrk(s: &[u8], c: u8) -> usize {
    known::<true, true>(s, c)
}
