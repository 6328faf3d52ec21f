//! Byte search: single-word kernels and the variable-length drivers built on them.

mod driver;
mod kernel;
mod sentinel;
mod strlen;

pub use driver::{memchr, memchrk, memrchr, memrchrk, pmemchr, pmemchrk, pmemrchr, pmemrchrk};
pub use kernel::{
    NOT_FOUND, memchr_word, memchr8, memchr8k, memrchr8, memrchr8k, pmemchr8, pmemchr8k,
    pmemrchr8, pmemrchr8k, pstrlen8, ptrim8, strlen8, trim_word, trim8,
};
pub use sentinel::{memchr_nc, pmemchr_nc};
pub use strlen::{pstrlen, pstrlen_unbounded, strlen, strlen_unbounded};
