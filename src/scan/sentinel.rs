//! Forward scan over a mutable buffer using a planted sentinel.
//!
//! The last byte of the buffer is temporarily overwritten with the needle, so the word loop runs
//! in its known-present form with no end-of-buffer test. The replaced byte is put back by
//! [`Planted`]'s `Drop`, which also runs when the scan unwinds.
//!
//! Taking `&mut [u8]` rules out aliasing from safe code. Anything sharing the buffer through raw
//! pointers or FFI will observe the needle in the last byte while the call is running.

use crate::scan::driver::find;

/// The buffer with its last byte replaced by the needle.
struct Planted<'a> {
    buf: &'a mut [u8],
    saved: u8,
}

impl<'a> Planted<'a> {
    /// `buf` must not be empty.
    fn new(buf: &'a mut [u8], c: u8) -> Self {
        let last = buf.len() - 1;
        let saved = std::mem::replace(&mut buf[last], c);
        Planted { buf, saved }
    }
}

impl Drop for Planted<'_> {
    fn drop(&mut self) {
        let last = self.buf.len() - 1;
        self.buf[last] = self.saved;
    }
}

#[inline(always)]
fn find_planted<const PRINTABLE: bool>(s: &mut [u8], c: u8) -> Option<usize> {
    let last = s.len().checked_sub(1)?;
    let planted = Planted::new(s, c);
    let pos = find::<PRINTABLE, true>(&*planted.buf, c)?;

    // Hitting the sentinel slot is only a real match if the byte we replaced was `c` too.
    (pos != last || planted.saved == c).then_some(pos)
}

/// Offset of the first `c` in `s`; `s` is briefly modified and restored before returning.
#[inline]
pub fn memchr_nc(s: &mut [u8], c: u8) -> Option<usize> {
    find_planted::<false>(s, c)
}

/// [`memchr_nc`] for printable input.
#[inline]
pub fn pmemchr_nc(s: &mut [u8], c: u8) -> Option<usize> {
    find_planted::<true>(s, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memchr_nc() {
        //                  0123456789 123456789
        let mut nc = *b"1234567890abcdefghij=12";
        assert_eq!(memchr_nc(&mut nc[..20], b'='), None);
        assert_eq!(memchr_nc(&mut nc[..21], b'='), Some(20));
        assert_eq!(memchr_nc(&mut nc[..23], b'='), Some(20));
        assert_eq!(&nc, b"1234567890abcdefghij=12");
    }

    #[test]
    fn test_memchr_nc_restores_buffer() {
        let mut buf = *b"abcdefghijk";
        assert_eq!(memchr_nc(&mut buf, b'#'), None);
        assert_eq!(&buf, b"abcdefghijk");
        assert_eq!(pmemchr_nc(&mut buf, b'k'), Some(10));
        assert_eq!(&buf, b"abcdefghijk");
        assert_eq!(pmemchr_nc(&mut buf, b'c'), Some(2));
    }

    #[test]
    fn test_memchr_nc_short_and_empty() {
        assert_eq!(memchr_nc(&mut [], b'x'), None);
        assert_eq!(memchr_nc(&mut [b'x'], b'x'), Some(0));
        assert_eq!(memchr_nc(&mut [b'y'], b'x'), None);

        let mut buf = *b"ab=d";
        assert_eq!(memchr_nc(&mut buf, b'='), Some(2));
        assert_eq!(memchr_nc(&mut buf[..2], b'='), None);
        assert_eq!(&buf, b"ab=d");
    }

    #[test]
    fn test_memchr_nc_high_bytes() {
        let mut buf = [0xffu8; 17];
        assert_eq!(memchr_nc(&mut buf, 0x80), None);
        buf[9] = 0x80;
        assert_eq!(memchr_nc(&mut buf, 0x80), Some(9));
        assert_eq!(buf[16], 0xff);
    }
}
