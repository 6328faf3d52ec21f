//! Branchless, word-at-a-time (SWAR) text primitives.
//!
//! Everything here works on eight bytes at a time in an ordinary `u64`:
//!
//! - [`scan`]: `memchr`/`memrchr`/`strlen` style byte search.
//! - [`parse`]: decimal and hex integer parsing by digit folding.
//! - [`format`]: zero-padded and variable-width integer formatting.
//! - [`float`]: a fast, not correctly rounded, decimal-to-`f64` parser.
//!
//! Inputs are not validated. Parsing non-digits or formatting into an undersized buffer is a
//! caller bug; the individual functions document what happens.
//!
//! ```
//! let line = b"retries=0042;timeout=1.25";
//!
//! let eq = swar::memchr(line, b'=').unwrap();
//! let semi = swar::memchr(line, b';').unwrap();
//! assert_eq!(swar::atou(&line[eq + 1..semi]), 42);
//!
//! let eq = swar::memrchr(line, b'=').unwrap();
//! assert_eq!(swar::atod(&line[eq + 1..]), 1.25);
//!
//! let mut buf = [0u8; swar::ITOA_BUF_LEN];
//! let len = swar::itoa(-1234, &mut buf);
//! assert_eq!(&buf[..len], b"-1234");
//! ```

pub mod detect;
pub mod err;
pub mod float;
pub mod format;
pub mod parse;
#[cfg(feature = "perf-counters")]
pub mod perf;
pub mod scan;
pub mod word;

pub use crate::detect::{hasbyte, haszero};
pub use crate::err::{Result, SwarError};
pub use crate::float::{atod, copy_sign};
pub use crate::format::{
    ITOA_BUF_LEN, ITOA8_BUF_LEN, UTOA_BUF_LEN, UTOAP_MAX_WIDTH, itoa, itoa8, utoa, utoa2p,
    utoa2p_into, utoap, utoap_dyn,
};
pub use crate::parse::{atoi, atou, atou4, atou8, htou, htou8};
pub use crate::scan::{
    NOT_FOUND, memchr, memchr_nc, memchr8, memchr8k, memchrk, memrchr, memrchr8, memrchr8k,
    memrchrk, pmemchr, pmemchr_nc, pmemchr8, pmemchr8k, pmemchrk, pmemrchr, pmemrchr8,
    pmemrchr8k, pmemrchrk, pstrlen, pstrlen_unbounded, pstrlen8, ptrim8, strlen, strlen_unbounded,
    strlen8, trim8,
};
pub use crate::word::{Word, cast8};
