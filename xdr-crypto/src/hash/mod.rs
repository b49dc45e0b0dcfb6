//! Cryptographic digests for the transaction envelope layer.
//!
//! * [`Hasher`] streams bytes (or an `xdr_codec::Codec`-encoded value) into
//!   a SHA-256 digest without an intermediate allocation.
//! * [`struct@Hash`] is a conveniently strongly typed byte array, used for
//!   both the network id and the transaction hash (both 32 bytes).
//!
//! # Example
//!
//! ```
//! use xdr_crypto::hash::Hasher;
//!
//! let digest = Hasher::<256>::hash(b"Test SDF Network ; September 2015");
//! assert_eq!(digest.as_ref().len(), 32);
//! ```

#[allow(clippy::module_inception)]
mod hash;
mod hasher;
mod serde;

pub use self::{hash::Hash, hasher::Hasher};
