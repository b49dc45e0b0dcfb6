//! The signer interface: anything that can produce a signature over a
//! transaction envelope or a Soroban authorization entry.

use xdr_crypto::SecretKey;
use xdr_primitives::account::AccountId;
use xdr_primitives::auth::SorobanAuthorizedInvocation;
use xdr_primitives::transaction::TransactionEnvelope;

use crate::auth::authorize_entry;
use crate::error::Result;
use crate::hashing::sign_transaction;
use crate::network::NetworkConfig;
use xdr_primitives::auth::SorobanAuthorizationEntry;

/// `signTransaction`/`signAuthEntry`: the two operations every signer
/// implementation must provide.
pub trait Signer {
    fn account_id(&self) -> AccountId;

    fn sign_transaction(
        &self,
        envelope: TransactionEnvelope,
        network: &NetworkConfig,
    ) -> Result<TransactionEnvelope>;

    fn sign_auth_entry(
        &self,
        invocation: SorobanAuthorizedInvocation,
        nonce: i64,
        valid_until_ledger: u32,
        network: &NetworkConfig,
    ) -> Result<SorobanAuthorizationEntry>;
}

/// A basic seed-backed signer: holds a raw Ed25519 secret key in memory.
pub struct SeedSigner {
    key: SecretKey,
}

impl SeedSigner {
    pub fn new(key: SecretKey) -> Self {
        SeedSigner { key }
    }

    pub fn from_strkey_seed(seed: &str) -> Result<Self> {
        let (version, payload) = xdr_strkey::decode(seed)?;
        if version != xdr_strkey::VERSION_SEED {
            return Err(xdr_strkey::Error::InvalidVersion(version).into());
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&payload);
        Ok(SeedSigner::new(SecretKey::from(bytes)))
    }
}

impl Signer for SeedSigner {
    fn account_id(&self) -> AccountId {
        use xdr_primitives::account::PublicKey as XdrPublicKey;
        AccountId(XdrPublicKey::from(self.key.public_key()))
    }

    fn sign_transaction(
        &self,
        envelope: TransactionEnvelope,
        network: &NetworkConfig,
    ) -> Result<TransactionEnvelope> {
        sign_transaction(envelope, &self.key, network)
    }

    fn sign_auth_entry(
        &self,
        invocation: SorobanAuthorizedInvocation,
        nonce: i64,
        valid_until_ledger: u32,
        network: &NetworkConfig,
    ) -> Result<SorobanAuthorizationEntry> {
        authorize_entry(invocation, &self.key, nonce, valid_until_ledger, network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_matches_public_key_derivation() {
        let key = SecretKey::from([5u8; 32]);
        let expected = key.public_key();
        let signer = SeedSigner::new(key);
        assert_eq!(signer.account_id().0.ed25519_bytes().as_ref(), expected.as_ref());
    }
}
