use thiserror::Error;

/// Errors raised by the byte reader/writer and by the codec combinators.
///
/// Variant names track the error kinds named in the wire specification, not
/// Rust convention, since callers match on kind across language bindings.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum XdrError {
    #[error("value out of range for target width")]
    InvalidValue,

    #[error("variable array/opaque of length {len} exceeds max {max}")]
    LengthExceedsMax { len: usize, max: usize },

    #[error("fixed opaque/array expected length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("non-zero byte in alignment padding")]
    NonZeroPadding,

    #[error("read past end of buffer (wanted {wanted} bytes, {remaining} remaining)")]
    BufferUnderflow { wanted: usize, remaining: usize },

    #[error("{remaining} bytes left unconsumed after top-level decode")]
    BufferNotFullyConsumed { remaining: usize },

    #[error("composite recursion exceeded depth limit {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("cumulative decode size exceeded byte limit {limit}")]
    ByteLimitExceeded { limit: usize },

    #[error("unknown enum discriminant {0}")]
    InvalidEnumValue(i32),

    #[error("discriminant {0} selects no union arm and there is no default")]
    InvalidUnionDiscriminant(i32),

    #[error("invalid UTF-8 in string field")]
    Utf8Error,

    #[error("invalid base64 input")]
    InvalidBase64,
}

pub type Result<T> = std::result::Result<T, XdrError>;
