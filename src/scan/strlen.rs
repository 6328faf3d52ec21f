//! NUL-terminator scans.
//!
//! Whole words are tested with [`haszero`] and the offset is only resolved in the word that hits.
//! [`strlen`] stays inside its slice. The `_unbounded` forms take a raw C string and keep reading
//! whole words until they meet the terminator.

use crate::detect::haszero;
use crate::scan::kernel::memchr_word;
use crate::word;

#[inline(always)]
fn strlen_slice<const PRINTABLE: bool>(s: &[u8]) -> usize {
    let mut p = 0;
    while let Some(chunk) = s.get(p..p + 8) {
        let x = word::load(chunk);
        if haszero(x) {
            return p + memchr_word::<PRINTABLE, true, false>(x, 0) as usize;
        }
        p += 8;
    }
    // The zero-filled tail always holds a NUL at `s.len() - p` at the latest.
    p + memchr_word::<PRINTABLE, true, false>(word::load(&s[p..]), 0) as usize
}

/// Offset of the first NUL in `s`, or `s.len()` if there is none.
#[inline]
pub fn strlen(s: &[u8]) -> usize {
    strlen_slice::<false>(s)
}

/// [`strlen`] for printable input.
#[inline]
pub fn pstrlen(s: &[u8]) -> usize {
    strlen_slice::<true>(s)
}

#[inline(always)]
unsafe fn strlen_raw<const PRINTABLE: bool>(ptr: *const u8) -> usize {
    let mut p = 0;
    loop {
        // SAFETY: the caller guarantees every word up to the one holding the terminator is
        // readable.
        let x = unsafe { word::load_unchecked(ptr.add(p)) };
        if haszero(x) {
            return p + memchr_word::<PRINTABLE, true, false>(x, 0) as usize;
        }
        p += 8;
    }
}

/// Length of the NUL-terminated string at `ptr`.
///
/// # Safety
/// `ptr` must point to a NUL-terminated string, and the memory must stay readable up to the end
/// of the 8-byte word that contains the terminator (reading begins at `ptr` and advances in
/// whole words).
#[inline]
pub unsafe fn strlen_unbounded(ptr: *const u8) -> usize {
    unsafe { strlen_raw::<false>(ptr) }
}

/// [`strlen_unbounded`] for printable strings.
///
/// # Safety
/// Same contract as [`strlen_unbounded`]; additionally every byte before the terminator must be
/// below `0x80`.
#[inline]
pub unsafe fn pstrlen_unbounded(ptr: *const u8) -> usize {
    unsafe { strlen_raw::<true>(ptr) }
}
