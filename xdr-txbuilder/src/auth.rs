//! `authorizeEntry`/`authorizeInvocation` (C11): sign the canonical
//! Soroban-authorization pre-image and fill in the entry's credentials.

use xdr_crypto::{Hasher, SecretKey};
use xdr_primitives::auth::{
    authorization_hash_preimage, HashIdPreimageSorobanAuthorization, SorobanAddressCredentials,
    SorobanAuthorizationEntry, SorobanAuthorizedInvocation, SorobanCredentials,
};
use xdr_primitives::scval::ScAddress;
use xdr_primitives::ScVal;

use crate::error::Result;
use crate::network::NetworkConfig;

/// Signs `sha256(network_id || ENVELOPE_TYPE_SOROBAN_AUTHORIZATION || xdr_encode(preimage))`
/// and returns a complete, ready-to-submit authorization entry. This is the
/// correct behavior for what upstream ships as a stub that echoes its input
/// unchanged — that passthrough is a bug, not a contract to preserve.
pub fn authorize_entry(
    invocation: SorobanAuthorizedInvocation,
    key: &SecretKey,
    nonce: i64,
    valid_until_ledger: u32,
    network: &NetworkConfig,
) -> Result<SorobanAuthorizationEntry> {
    let preimage = HashIdPreimageSorobanAuthorization {
        network_id: network.network_id(),
        nonce,
        signature_expiration_ledger: valid_until_ledger,
        invocation: invocation.clone(),
    };
    let bytes = authorization_hash_preimage(&preimage)?;
    let hash = *Hasher::<256>::hash(&bytes);
    let signature = key.sign(hash);

    let credentials = SorobanCredentials::Address(SorobanAddressCredentials {
        address: ScAddress::Account(xdr_primitives::account::AccountId(
            xdr_primitives::account::PublicKey::from(key.public_key()),
        )),
        nonce,
        signature_expiration_ledger: valid_until_ledger,
        signature: ScVal::Bytes(signature.as_ref().to_vec().try_into().map_err(|_| {
            crate::error::Error::BuilderState("signature does not fit the SCVal bytes cap".into())
        })?),
    });

    Ok(SorobanAuthorizationEntry {
        credentials,
        root_invocation: invocation,
    })
}

/// Convenience wrapper building the authorization entry from its parts
/// rather than a pre-built invocation tree.
pub fn authorize_invocation(
    function: xdr_primitives::auth::SorobanAuthorizedFunction,
    sub_invocations: Vec<SorobanAuthorizedInvocation>,
    key: &SecretKey,
    nonce: i64,
    valid_until_ledger: u32,
    network: &NetworkConfig,
) -> Result<SorobanAuthorizationEntry> {
    let invocation = SorobanAuthorizedInvocation {
        function,
        sub_invocations: sub_invocations.try_into().map_err(|_| {
            crate::error::Error::BuilderState("too many sub-invocations".into())
        })?,
    };
    authorize_entry(invocation, key, nonce, valid_until_ledger, network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdr_codec::utils::VecM;
    use xdr_primitives::auth::{InvokeContractArgs, SorobanAuthorizedFunction};

    fn leaf() -> SorobanAuthorizedInvocation {
        SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract([1u8; 32]),
                function_name: "transfer".to_string(),
                args: VecM::empty(),
            }),
            sub_invocations: VecM::empty(),
        }
    }

    #[test]
    fn authorize_entry_fills_in_address_credentials() {
        let key = SecretKey::from([4u8; 32]);
        let network = NetworkConfig::testnet();
        let entry = authorize_entry(leaf(), &key, 1, 1000, &network).unwrap();
        match entry.credentials {
            SorobanCredentials::Address(c) => {
                assert_eq!(c.nonce, 1);
                assert_eq!(c.signature_expiration_ledger, 1000);
            }
            SorobanCredentials::SourceAccount => panic!("expected address credentials"),
        }
    }

    #[test]
    fn authorize_entry_is_deterministic_for_same_inputs() {
        let key = SecretKey::from([4u8; 32]);
        let network = NetworkConfig::testnet();
        let a = authorize_entry(leaf(), &key, 1, 1000, &network).unwrap();
        let b = authorize_entry(leaf(), &key, 1, 1000, &network).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn authorize_entry_differs_across_networks() {
        let key = SecretKey::from([4u8; 32]);
        let a = authorize_entry(leaf(), &key, 1, 1000, &NetworkConfig::testnet()).unwrap();
        let b = authorize_entry(leaf(), &key, 1, 1000, &NetworkConfig::public()).unwrap();
        assert_ne!(a, b);
    }
}
