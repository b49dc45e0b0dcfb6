//! Transaction builder (C8): `Empty → WithSource → WithOps → Built`.

use xdr_primitives::account::{AccountId, MuxedAccount, SignerKey};
use xdr_primitives::memo::Memo;
use xdr_primitives::operations::Operation;
use xdr_primitives::transaction::{
    LedgerBounds, Preconditions, PreconditionsV2, Transaction, TimeBounds, TransactionV1Envelope,
};

use crate::error::{Error, Result};

/// Minimum fee per operation, in stroops.
pub const BASE_FEE: u32 = 100;
/// Sentinel `timeout` meaning "no upper bound on `maxTime`".
pub const TIMEOUT_INFINITE: u64 = 0;

/// A monotonically increasing account sequence number. `build()` increments
/// it by one and snapshots the result into the transaction, matching the
/// ledger's own "next sequence number" semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceNumber(pub i64);

impl SequenceNumber {
    pub fn next(self) -> Self {
        SequenceNumber(self.0 + 1)
    }
}

enum BuilderState {
    Empty,
    WithSource {
        source: MuxedAccount,
        sequence: SequenceNumber,
    },
    WithOps {
        source: MuxedAccount,
        sequence: SequenceNumber,
        operations: Vec<Operation>,
    },
}

/// Fluent accumulator mirroring the language-neutral builder surface:
/// `setFee`, `addOperation`, `addMemo`, `setTimeout`, `setTimebounds`,
/// `setMinAccountSequence`, `setLedgerBounds`, `setExtraSigners`, `build`.
pub struct TransactionBuilder {
    state: BuilderState,
    fee_per_op: u32,
    memo: Memo,
    timeout: Option<u64>,
    time_bounds: Option<TimeBounds>,
    ledger_bounds: Option<LedgerBounds>,
    min_account_sequence: Option<i64>,
    extra_signers: Vec<SignerKey>,
    built: bool,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        TransactionBuilder {
            state: BuilderState::Empty,
            fee_per_op: BASE_FEE,
            memo: Memo::None,
            timeout: None,
            time_bounds: None,
            ledger_bounds: None,
            min_account_sequence: None,
            extra_signers: Vec::new(),
            built: false,
        }
    }

    /// Sets the source account and its current sequence number, transitioning
    /// `Empty → WithSource`.
    pub fn set_source(mut self, source: AccountId, sequence: SequenceNumber) -> Self {
        self.state = BuilderState::WithSource {
            source: MuxedAccount::from_account_id(source),
            sequence,
        };
        self
    }

    pub fn set_fee(mut self, fee_per_op: u32) -> Result<Self> {
        if fee_per_op < BASE_FEE {
            return Err(Error::RangeError(format!(
                "fee per operation must be at least {BASE_FEE} stroops, got {fee_per_op}"
            )));
        }
        self.fee_per_op = fee_per_op;
        Ok(self)
    }

    /// Adds one operation, transitioning `WithSource → WithOps` on the first
    /// call. Fails once the envelope has already been built.
    pub fn add_operation(mut self, op: Operation) -> Result<Self> {
        if self.built {
            return Err(Error::BuilderState("cannot add an operation after build()".to_string()));
        }
        self.state = match self.state {
            BuilderState::Empty => {
                return Err(Error::BuilderState("a source account must be set before operations".to_string()))
            }
            BuilderState::WithSource { source, sequence } => BuilderState::WithOps {
                source,
                sequence,
                operations: vec![op],
            },
            BuilderState::WithOps {
                source,
                sequence,
                mut operations,
            } => {
                operations.push(op);
                BuilderState::WithOps {
                    source,
                    sequence,
                    operations,
                }
            }
        };
        Ok(self)
    }

    pub fn add_memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    /// `TIMEOUT_INFINITE` (`0`) leaves `maxTime` unbounded; any positive
    /// value sets `maxTime = now + timeout`.
    pub fn set_timeout(mut self, timeout_seconds: u64, now_unix: u64) -> Self {
        self.timeout = Some(timeout_seconds);
        let max_time = if timeout_seconds == TIMEOUT_INFINITE {
            0
        } else {
            now_unix + timeout_seconds
        };
        self.time_bounds = Some(TimeBounds {
            min_time: 0,
            max_time,
        });
        self
    }

    pub fn set_timebounds(mut self, min_time: u64, max_time: u64) -> Self {
        self.time_bounds = Some(TimeBounds { min_time, max_time });
        self
    }

    pub fn set_ledger_bounds(mut self, min_ledger: u32, max_ledger: u32) -> Self {
        self.ledger_bounds = Some(LedgerBounds { min_ledger, max_ledger });
        self
    }

    pub fn set_min_account_sequence(mut self, sequence: i64) -> Self {
        self.min_account_sequence = Some(sequence);
        self
    }

    /// At most `MAX_EXTRA_SIGNERS` (2) additional signers may be required;
    /// exceeding that cap is only caught when `build()` assembles the
    /// `PreconditionsV2` arm, matching the wire's own `<2>` array bound.
    pub fn set_extra_signers(mut self, signers: Vec<SignerKey>) -> Self {
        self.extra_signers = signers;
        self
    }

    /// `PRECOND_NONE`/`PRECOND_TIME` when only a timeout/time-bounds were
    /// set (the common case); `PRECOND_V2` once ledger bounds, a minimum
    /// sequence number, or extra signers are in play.
    fn preconditions(&self) -> Result<Preconditions> {
        let needs_v2 = self.ledger_bounds.is_some()
            || self.min_account_sequence.is_some()
            || !self.extra_signers.is_empty();

        if needs_v2 {
            let extra_signers = self.extra_signers.clone().try_into().map_err(|_| {
                Error::RangeError("at most 2 extra signers are allowed".to_string())
            })?;
            Ok(Preconditions::V2(PreconditionsV2 {
                time_bounds: self.time_bounds,
                ledger_bounds: self.ledger_bounds,
                min_seq_num: self.min_account_sequence,
                min_seq_age: 0,
                min_seq_ledger_gap: 0,
                extra_signers,
            }))
        } else {
            Ok(match self.time_bounds {
                Some(tb) => Preconditions::Time(tb),
                None => Preconditions::None,
            })
        }
    }

    /// Transitions `WithOps → Built`: increments the source sequence number
    /// by one, snapshots it into the transaction, and fails if no
    /// operations were ever added.
    pub fn build(mut self) -> Result<TransactionV1Envelope> {
        let (source, sequence, operations) = match self.state {
            BuilderState::WithOps {
                source,
                sequence,
                operations,
            } => (source, sequence, operations),
            _ => {
                return Err(Error::BuilderState(
                    "cannot build a transaction with no operations".to_string(),
                ))
            }
        };

        let fee = self
            .fee_per_op
            .checked_mul(operations.len() as u32)
            .ok_or_else(|| Error::RangeError("fee overflowed u32".to_string()))?;

        let tx = Transaction::new(
            source,
            fee,
            sequence.next().0,
            self.preconditions()?,
            self.memo.clone(),
            operations.try_into().map_err(|_| {
                Error::BuilderState("too many operations for a single transaction".to_string())
            })?,
        );

        self.built = true;
        Ok(TransactionV1Envelope {
            tx,
            signatures: Vec::new().try_into().expect("empty signature list always fits"),
        })
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        TransactionBuilder::new()
    }
}

/// Wraps an already-signed inner envelope with a new fee source and a
/// strictly higher bid, without disturbing the inner signatures.
pub fn fee_bump(
    fee_source: AccountId,
    fee: i64,
    inner: TransactionV1Envelope,
) -> xdr_primitives::transaction::FeeBumpTransactionEnvelope {
    xdr_primitives::transaction::FeeBumpTransactionEnvelope {
        tx: xdr_primitives::transaction::FeeBumpTransaction {
            fee_source: MuxedAccount::from_account_id(fee_source),
            fee,
            inner_tx: inner,
            ext: 0,
        },
        signatures: Vec::new().try_into().expect("empty signature list always fits"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdr_primitives::account::PublicKey;
    use xdr_primitives::asset::Asset;
    use xdr_primitives::operations::{OperationBody, PaymentOp};

    fn source() -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519([1u8; 32]))
    }

    fn payment_op() -> Operation {
        Operation {
            source_account: None,
            body: OperationBody::Payment(PaymentOp {
                destination: MuxedAccount::KeyTypeEd25519([2u8; 32]),
                asset: Asset::Native,
                amount: 1_000_000,
            }),
        }
    }

    #[test]
    fn build_without_operations_fails() {
        let result = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn build_increments_sequence_number() {
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(41))
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(envelope.tx.seq_num, 42);
    }

    #[test]
    fn fee_is_per_operation_times_count() {
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .add_operation(payment_op())
            .unwrap()
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(envelope.tx.fee, BASE_FEE * 2);
    }

    #[test]
    fn fee_below_base_fee_is_rejected() {
        assert!(TransactionBuilder::new().set_fee(10).is_err());
    }

    #[test]
    fn adding_operation_without_source_fails() {
        assert!(TransactionBuilder::new().add_operation(payment_op()).is_err());
    }

    #[test]
    fn timeout_zero_leaves_max_time_unbounded() {
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .set_timeout(TIMEOUT_INFINITE, 1_700_000_000)
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        match envelope.tx.cond {
            Preconditions::Time(tb) => assert_eq!(tb.max_time, 0),
            _ => panic!("expected time precondition"),
        }
    }

    #[test]
    fn positive_timeout_sets_max_time_from_now() {
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .set_timeout(30, 1_700_000_000)
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        match envelope.tx.cond {
            Preconditions::Time(tb) => assert_eq!(tb.max_time, 1_700_000_030),
            _ => panic!("expected time precondition"),
        }
    }

    #[test]
    fn ledger_bounds_promote_to_v2_preconditions() {
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .set_ledger_bounds(10, 20)
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        match envelope.tx.cond {
            Preconditions::V2(v2) => {
                assert_eq!(v2.ledger_bounds.unwrap().min_ledger, 10);
                assert_eq!(v2.ledger_bounds.unwrap().max_ledger, 20);
            }
            _ => panic!("expected v2 preconditions"),
        }
    }

    #[test]
    fn min_account_sequence_promotes_to_v2_preconditions() {
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .set_min_account_sequence(7)
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        match envelope.tx.cond {
            Preconditions::V2(v2) => assert_eq!(v2.min_seq_num, Some(7)),
            _ => panic!("expected v2 preconditions"),
        }
    }

    #[test]
    fn extra_signers_are_threaded_into_v2_preconditions() {
        let signer = SignerKey::HashX([9u8; 32]);
        let envelope = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .set_extra_signers(vec![signer.clone()])
            .add_operation(payment_op())
            .unwrap()
            .build()
            .unwrap();
        match envelope.tx.cond {
            Preconditions::V2(v2) => assert_eq!(v2.extra_signers.as_slice(), &[signer]),
            _ => panic!("expected v2 preconditions"),
        }
    }

    #[test]
    fn more_than_two_extra_signers_is_rejected() {
        let signers = vec![
            SignerKey::HashX([1u8; 32]),
            SignerKey::HashX([2u8; 32]),
            SignerKey::HashX([3u8; 32]),
        ];
        let result = TransactionBuilder::new()
            .set_source(source(), SequenceNumber(0))
            .set_extra_signers(signers)
            .add_operation(payment_op())
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
