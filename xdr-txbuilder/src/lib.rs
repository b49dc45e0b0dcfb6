//! Transaction construction, signing, and hashing.
//!
//! Builds on `xdr-primitives`' wire types with the operations a client
//! actually needs: assembling a transaction (`builder`), hashing and signing
//! it for a given network (`hashing`, `signer`), computing deterministic
//! object ids (`ids`), authorizing Soroban invocations (`auth`), and
//! converting between native values and `ScVal` (`scval_bridge`).

mod auth;
mod builder;
mod error;
mod hashing;
mod ids;
mod network;
mod scval_bridge;
mod signer;

pub use auth::{authorize_entry, authorize_invocation};
pub use builder::{fee_bump, SequenceNumber, TransactionBuilder, BASE_FEE, TIMEOUT_INFINITE};
pub use error::{Error, Result};
pub use hashing::{append_signature, envelope_hash, sign_hash, sign_transaction, transaction_hash};
pub use ids::{asset_contract_strkey, liquidity_pool_id, LiquidityPoolFeeV18};
pub use network::{NetworkConfig, PUBLIC_PASSPHRASE, TESTNET_PASSPHRASE};
pub use scval_bridge::{from_scval, int_to_scval, to_scval, NativeValue};
pub use signer::{SeedSigner, Signer};
