//! Transactions: the envelope an account signs and submits to the network.

use xdr_codec::{utils::VecM, xdr_enum, Codec, Reader, Writer};

use crate::account::{DecoratedSignature, MuxedAccount, SignerKey};
use crate::memo::Memo;
use crate::operations::Operation;

pub const MAX_OPS_PER_TX: u32 = 100;
pub const MAX_SIGNATURES: u32 = 20;

pub const ENVELOPE_TYPE_TX: i32 = 2;
pub const ENVELOPE_TYPE_TX_FEE_BUMP: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

xdr_codec::xdr_struct!(TimeBounds { min_time: u64, max_time: u64 });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerBounds {
    pub min_ledger: u32,
    pub max_ledger: u32,
}

xdr_codec::xdr_struct!(LedgerBounds { min_ledger: u32, max_ledger: u32 });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionType {
    None,
    Time,
    V2,
}

xdr_enum!(PreconditionType {
    None = 0,
    Time = 1,
    V2 = 2,
});

/// Maximum number of extra signers a `PRECOND_V2` precondition may name.
pub const MAX_EXTRA_SIGNERS: u32 = 2;

/// `PreconditionsV2`: the general form carrying everything `PRECOND_TIME`
/// doesn't — ledger bounds, a minimum source-account sequence number, a
/// minimum sequence age/ledger-gap, and up to two extra required signers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreconditionsV2 {
    pub time_bounds: Option<TimeBounds>,
    pub ledger_bounds: Option<LedgerBounds>,
    pub min_seq_num: Option<i64>,
    pub min_seq_age: u64,
    pub min_seq_ledger_gap: u32,
    pub extra_signers: VecM<SignerKey, MAX_EXTRA_SIGNERS>,
}

xdr_codec::xdr_struct!(PreconditionsV2 {
    time_bounds: Option<TimeBounds>,
    ledger_bounds: Option<LedgerBounds>,
    min_seq_num: Option<i64>,
    min_seq_age: u64,
    min_seq_ledger_gap: u32,
    extra_signers: VecM<SignerKey, MAX_EXTRA_SIGNERS>
});

/// `Preconditions`: `PRECOND_NONE`, the common `PRECOND_TIME` case, or the
/// general `PRECOND_V2` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preconditions {
    None,
    Time(TimeBounds),
    V2(PreconditionsV2),
}

impl Codec for Preconditions {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            Preconditions::None => PreconditionType::None.encode(w),
            Preconditions::Time(tb) => {
                PreconditionType::Time.encode(w)?;
                tb.encode(w)
            }
            Preconditions::V2(v2) => {
                PreconditionType::V2.encode(w)?;
                v2.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match PreconditionType::decode(r)? {
            PreconditionType::None => Ok(Preconditions::None),
            PreconditionType::Time => Ok(Preconditions::Time(TimeBounds::decode(r)?)),
            PreconditionType::V2 => Ok(Preconditions::V2(PreconditionsV2::decode(r)?)),
        }
    }
}

/// `Transaction`: everything that gets signed, short of the signatures
/// themselves. `ext` is always the void arm (`0`); no extension payload is
/// defined on this wire today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source_account: MuxedAccount,
    pub fee: u32,
    pub seq_num: i64,
    pub cond: Preconditions,
    pub memo: Memo,
    pub operations: VecM<Operation, MAX_OPS_PER_TX>,
    pub ext: i32,
}

xdr_codec::xdr_struct!(Transaction {
    source_account: MuxedAccount,
    fee: u32,
    seq_num: i64,
    cond: Preconditions,
    memo: Memo,
    operations: VecM<Operation, MAX_OPS_PER_TX>,
    ext: i32
});

impl Transaction {
    pub fn new(
        source_account: MuxedAccount,
        fee: u32,
        seq_num: i64,
        cond: Preconditions,
        memo: Memo,
        operations: VecM<Operation, MAX_OPS_PER_TX>,
    ) -> Self {
        Transaction {
            source_account,
            fee,
            seq_num,
            cond,
            memo,
            operations,
            ext: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    pub signatures: VecM<DecoratedSignature, MAX_SIGNATURES>,
}

xdr_codec::xdr_struct!(TransactionV1Envelope {
    tx: Transaction,
    signatures: VecM<DecoratedSignature, MAX_SIGNATURES>
});

/// `FeeBumpTransaction`: wraps an already-signed inner `Transaction` with a
/// new fee source and higher bid, without invalidating the inner
/// signatures. `inner_tx` is always the `ENVELOPE_TYPE_TX` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    pub fee: i64,
    pub inner_tx: TransactionV1Envelope,
    pub ext: i32,
}

impl Codec for FeeBumpTransaction {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        self.fee_source.encode(w)?;
        self.fee.encode(w)?;
        ENVELOPE_TYPE_TX.encode(w)?;
        self.inner_tx.tx.encode(w)?;
        self.inner_tx.signatures.encode(w)?;
        self.ext.encode(w)
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        let fee_source = MuxedAccount::decode(r)?;
        let fee = i64::decode(r)?;
        let discriminant = i32::decode(r)?;
        if discriminant != ENVELOPE_TYPE_TX {
            return Err(xdr_codec::XdrError::InvalidEnumValue(discriminant));
        }
        let tx = Transaction::decode(r)?;
        let signatures = VecM::decode(r)?;
        let ext = i32::decode(r)?;
        Ok(FeeBumpTransaction {
            fee_source,
            fee,
            inner_tx: TransactionV1Envelope { tx, signatures },
            ext,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransactionEnvelope {
    pub tx: FeeBumpTransaction,
    pub signatures: VecM<DecoratedSignature, MAX_SIGNATURES>,
}

xdr_codec::xdr_struct!(FeeBumpTransactionEnvelope {
    tx: FeeBumpTransaction,
    signatures: VecM<DecoratedSignature, MAX_SIGNATURES>
});

/// `TransactionEnvelope`: the top-level wire type submitted to the network,
/// discriminated by `ENVELOPE_TYPE_TX` or `ENVELOPE_TYPE_TX_FEE_BUMP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionEnvelope {
    Tx(TransactionV1Envelope),
    TxFeeBump(FeeBumpTransactionEnvelope),
}

impl Codec for TransactionEnvelope {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            TransactionEnvelope::Tx(env) => {
                ENVELOPE_TYPE_TX.encode(w)?;
                env.encode(w)
            }
            TransactionEnvelope::TxFeeBump(env) => {
                ENVELOPE_TYPE_TX_FEE_BUMP.encode(w)?;
                env.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match i32::decode(r)? {
            ENVELOPE_TYPE_TX => Ok(TransactionEnvelope::Tx(TransactionV1Envelope::decode(r)?)),
            ENVELOPE_TYPE_TX_FEE_BUMP => {
                Ok(TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope::decode(r)?))
            }
            other => Err(xdr_codec::XdrError::InvalidEnumValue(other)),
        }
    }
}

impl TransactionEnvelope {
    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            TransactionEnvelope::Tx(env) => &env.signatures,
            TransactionEnvelope::TxFeeBump(env) => &env.signatures,
        }
    }
}
