//! Word utilities: reinterpret bytes as little-endian integers.
//!
//! Every numeric routine in this crate works on a machine word that holds up to 8 input bytes.
//! Byte 0 of the input always lands in the least significant byte of the word, regardless of the
//! host's endianness, so the masks and shifts elsewhere in the crate can assume that layout.
//!
//! There are two load flavors:
//! - [`load`] / [`cast8`]: safe, accept short slices and zero-fill the missing bytes.
//! - [`load_unchecked`]: a raw unaligned 8-byte read for drivers that have already proven the
//!   word is in bounds.

/// Broadcast `byte` into every byte of a `u64`.
#[inline]
pub const fn repeat_u64(byte: u8) -> u64 {
    u64::from_ne_bytes([byte; 8])
}

/// A fixed-width unsigned word that can be built from bytes.
pub trait Word: Copy {
    /// Width in bytes.
    const BYTES: usize;

    /// Reinterpret the first `Self::BYTES` bytes of `src` (little-endian).
    ///
    /// Use [`load`] or [`cast8`] for input that may be short.
    ///
    /// # Panics
    /// If `src` is shorter than `Self::BYTES`.
    fn cast(src: &[u8]) -> Self;

    /// A word with every byte set to `c`.
    fn extend(c: u8) -> Self;

    /// Reverse the byte order.
    fn bswap(self) -> Self;
}

macro_rules! impl_word {
    ($($t:ty),*) => {$(
        impl Word for $t {
            const BYTES: usize = core::mem::size_of::<$t>();

            #[inline(always)]
            fn cast(src: &[u8]) -> Self {
                match src.first_chunk::<{ core::mem::size_of::<$t>() }>() {
                    Some(bytes) => <$t>::from_le_bytes(*bytes),
                    None => panic!(
                        "cannot cast {} bytes to a {}-byte word",
                        src.len(),
                        Self::BYTES
                    ),
                }
            }

            #[inline(always)]
            fn extend(c: u8) -> Self {
                <$t>::from_ne_bytes([c; core::mem::size_of::<$t>()])
            }

            #[inline(always)]
            fn bswap(self) -> Self {
                self.swap_bytes()
            }
        }
    )*};
}

impl_word!(u16, u32, u64);

/// Read up to 8 bytes of `s` as a little-endian `u64`.
///
/// When `s` holds 8 bytes or more this is a single unaligned load of the first 8. Shorter slices
/// are copied into a zeroed word, so the missing high bytes read as NUL.
#[inline(always)]
pub fn load(s: &[u8]) -> u64 {
    match s.first_chunk::<8>() {
        Some(bytes) => u64::from_le_bytes(*bytes),
        None => {
            let mut buf = [0u8; 8];
            buf[..s.len()].copy_from_slice(s);
            u64::from_le_bytes(buf)
        }
    }
}

/// Read up to 4 bytes of `s` as a little-endian `u32`, zero-filling a short slice.
#[inline(always)]
pub fn load4(s: &[u8]) -> u32 {
    match s.first_chunk::<4>() {
        Some(bytes) => u32::from_le_bytes(*bytes),
        None => {
            let mut buf = [0u8; 4];
            buf[..s.len()].copy_from_slice(s);
            u32::from_le_bytes(buf)
        }
    }
}

/// Unaligned little-endian 8-byte read.
///
/// # Safety
/// `ptr..ptr + 8` must be readable.
#[inline(always)]
pub unsafe fn load_unchecked(ptr: *const u8) -> u64 {
    u64::from_le(unsafe { core::ptr::read_unaligned(ptr as *const u64) })
}

/// Mask selecting the low `len` bytes of a word (`len <= 8`).
#[inline(always)]
pub fn low_bytes(len: usize) -> u64 {
    debug_assert!(len <= 8);
    ((1u128 << (len * 8)) - 1) as u64
}

/// The integer value of the first `len` bytes of `s`, higher bytes cleared.
///
/// `"1234567890", 2` gives `0x3231`.
#[inline]
pub fn cast8(s: &[u8], len: usize) -> u64 {
    debug_assert!(len <= 8, "cast8 reads at most 8 bytes, got {len}");
    load(s) & low_bytes(len.min(8))
}
