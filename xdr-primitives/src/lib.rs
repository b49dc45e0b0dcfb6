//! Concrete schema types: accounts, assets, memos, operations, transactions,
//! and Soroban contract values. Built on the frame-level `Codec` in
//! `xdr-codec`; this crate is where the wire grammar becomes the actual
//! shapes a client constructs and parses.

pub mod account;
pub mod asset;
pub mod auth;
pub mod bigint;
pub mod memo;
pub mod operations;
pub mod scval;
pub mod transaction;

pub use account::{AccountId, CryptoKeyType, DecoratedSignature, MuxedAccount, PublicKey, Signer, SignerKey, SignerKeyType};
pub use asset::{format_amount, parse_amount, Asset, AssetCode4, AssetCode12, AssetType, ChangeTrustAsset, Price};
pub use auth::{
    HashIdPreimageSorobanAuthorization, InvokeContractArgs, SorobanAuthorizationEntry,
    SorobanAuthorizedFunction, SorobanAuthorizedInvocation, SorobanCredentials,
};
pub use bigint::{Int128Parts, Int256Parts, ScIntWidth, UInt128Parts, UInt256Parts};
pub use memo::Memo;
pub use operations::{Operation, OperationBody, OperationType};
pub use scval::{ScAddress, ScVal, ScValType};
pub use transaction::{
    FeeBumpTransaction, FeeBumpTransactionEnvelope, LedgerBounds, Preconditions, PreconditionsV2,
    TimeBounds, Transaction, TransactionEnvelope, TransactionV1Envelope, MAX_EXTRA_SIGNERS,
};
