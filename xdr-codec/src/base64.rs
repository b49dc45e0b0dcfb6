//! Free functions over byte slices, not methods bolted onto a buffer type:
//! RFC 4648 base64 with standard padding, used to move encoded XDR over
//! text-only transports.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::XdrError;

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_base64(s: &str) -> Result<Vec<u8>, XdrError> {
    STANDARD.decode(s).map_err(|_| XdrError::InvalidBase64)
}
