use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwarError>;

/// Errors for the few entry points that validate their arguments at runtime.
///
/// The word-level primitives never fail; they document preconditions instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SwarError {
    #[error("zero-padded width {width} is out of range (max {max} digits)")]
    WidthOutOfRange { width: usize, max: usize },

    #[error("output buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },
}
