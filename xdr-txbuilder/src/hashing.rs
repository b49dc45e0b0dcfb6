//! Transaction hashing and signature attachment (C7).

use xdr_codec::Codec;
use xdr_crypto::{Hasher, PublicKey, SecretKey};
use xdr_primitives::account::DecoratedSignature;
use xdr_primitives::transaction::{
    Transaction, TransactionEnvelope, ENVELOPE_TYPE_TX, ENVELOPE_TYPE_TX_FEE_BUMP,
};

use crate::error::Result;
use crate::network::NetworkConfig;

/// `sha256(network_id || envelope_type_tag || xdr_encode(tx))`: the exact
/// bytes a signer signs and a verifier checks against.
pub fn transaction_hash(tx: &Transaction, network: &NetworkConfig, envelope_type: i32) -> Result<[u8; 32]> {
    let mut preimage = Vec::new();
    preimage.extend_from_slice(&network.network_id());
    preimage.extend_from_slice(&envelope_type.to_be_bytes());
    preimage.extend_from_slice(&tx.to_bytes()?);
    Ok(*Hasher::<256>::hash(&preimage))
}

/// The hash of the envelope's inner transaction, dispatching on whether it
/// is a plain or fee-bump envelope.
pub fn envelope_hash(envelope: &TransactionEnvelope, network: &NetworkConfig) -> Result<[u8; 32]> {
    match envelope {
        TransactionEnvelope::Tx(e) => transaction_hash(&e.tx, network, ENVELOPE_TYPE_TX),
        TransactionEnvelope::TxFeeBump(e) => {
            let mut preimage = Vec::new();
            preimage.extend_from_slice(&network.network_id());
            preimage.extend_from_slice(&ENVELOPE_TYPE_TX_FEE_BUMP.to_be_bytes());
            preimage.extend_from_slice(&e.tx.to_bytes()?);
            Ok(*Hasher::<256>::hash(&preimage))
        }
    }
}

/// Signs `hash` with `key` and wraps it as a [`DecoratedSignature`] carrying
/// the signer's hint, ready to append to an envelope's signature list.
pub fn sign_hash(hash: &[u8; 32], key: &SecretKey) -> DecoratedSignature {
    let signature = key.sign(hash);
    let public_key: PublicKey = key.public_key();
    DecoratedSignature {
        hint: public_key.hint(),
        signature: signature.as_ref().to_vec(),
    }
}

/// Appends a [`DecoratedSignature`] to an envelope's signature list,
/// preserving insertion order. Fails if the envelope is already at the
/// 20-signature cap.
pub fn append_signature(
    envelope: TransactionEnvelope,
    decorated: DecoratedSignature,
) -> Result<TransactionEnvelope> {
    use xdr_primitives::transaction::{FeeBumpTransactionEnvelope, TransactionV1Envelope, MAX_SIGNATURES};

    Ok(match envelope {
        TransactionEnvelope::Tx(e) => {
            let mut sigs = e.signatures.into_vec();
            sigs.push(decorated);
            TransactionEnvelope::Tx(TransactionV1Envelope {
                tx: e.tx,
                signatures: sigs.try_into().map_err(|_| {
                    crate::error::Error::BuilderState(format!(
                        "envelope already carries the maximum of {MAX_SIGNATURES} signatures"
                    ))
                })?,
            })
        }
        TransactionEnvelope::TxFeeBump(e) => {
            let mut sigs = e.signatures.into_vec();
            sigs.push(decorated);
            TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope {
                tx: e.tx,
                signatures: sigs.try_into().map_err(|_| {
                    crate::error::Error::BuilderState(format!(
                        "envelope already carries the maximum of {MAX_SIGNATURES} signatures"
                    ))
                })?,
            })
        }
    })
}

/// Signs a full envelope with `key` against `network`, appending the
/// resulting decorated signature. This is `signTransaction` from the
/// language-neutral signer interface.
pub fn sign_transaction(
    envelope: TransactionEnvelope,
    key: &SecretKey,
    network: &NetworkConfig,
) -> Result<TransactionEnvelope> {
    let hash = envelope_hash(&envelope, network)?;
    let decorated = sign_hash(&hash, key);
    append_signature(envelope, decorated)
}
