//! Rust-native building blocks for a Stellar-style XDR blockchain client.
//!
//! This crate doesn't provide any particular application; it re-exports the
//! workspace's lower-level crates under one namespace so downstream users
//! depend on a single `xdr` rather than five path crates.

#[doc(inline)]
pub use xdr_codec as codec;

#[doc(inline)]
pub use xdr_crypto as crypto;

pub mod ledger {
    //! Wire-level schema for accounts, assets, memos, operations and
    //! transactions, plus Soroban contract values.

    #[doc(inline)]
    pub use xdr_primitives as primitives;

    #[doc(inline)]
    pub use xdr_strkey as addresses;
}

#[doc(inline)]
pub use xdr_txbuilder as txbuilder;
