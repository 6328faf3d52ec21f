//! Byte-detection kernels.
//!
//! `haszero`/`hasbyte` answer "does this word contain the byte?" with the classic
//! `(x - 0x01..) & !x & 0x80..` trick. It can flag a false positive in the byte *above* a real
//! zero (the borrow propagates), but never without a real zero below it, so the boolean answer is
//! exact.
//!
//! The position-finding kernels need an exact per-byte answer, so [`zero_mask`] uses the
//! carry-free form instead: add `0x7f` to the low seven bits of every byte, which sets the high bit
//! of every non-zero byte without touching its neighbour.

use crate::word::repeat_u64;

/// `0x01` in every byte.
pub const LO: u64 = repeat_u64(0x01);
/// `0x80` in every byte.
pub const HI: u64 = repeat_u64(0x80);
/// `0x7f` in every byte.
pub const LOW7: u64 = repeat_u64(0x7f);

/// True iff any byte of `x` is zero.
#[inline(always)]
pub const fn haszero(x: u64) -> bool {
    x.wrapping_sub(LO) & !x & HI != 0
}

/// True iff any byte of `x` equals `c`.
#[inline(always)]
pub const fn hasbyte(x: u64, c: u8) -> bool {
    haszero(x ^ repeat_u64(c))
}

/// Detection mask for zero bytes: exactly the high bit of every zero byte is set.
///
/// With `PRINTABLE` every byte of `x` must be below `0x80`; a plain add then cannot carry across
/// bytes. Feeding it bytes `>= 0x80` produces garbage.
#[inline(always)]
pub const fn zero_mask<const PRINTABLE: bool>(x: u64) -> u64 {
    let y = if PRINTABLE {
        x.wrapping_add(LOW7)
    } else {
        ((x & LOW7).wrapping_add(LOW7)) | x
    };
    !y & HI
}

/// Detection mask for bytes equal to `c`.
///
/// With `PRINTABLE` both the word and `c` must be below `0x80`.
#[inline(always)]
pub const fn byte_mask<const PRINTABLE: bool>(x: u64, c: u8) -> u64 {
    zero_mask::<PRINTABLE>(x ^ repeat_u64(c))
}
