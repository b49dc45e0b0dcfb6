//! Soroban authorization: the signed tree of sub-invocations a contract
//! invocation is allowed to make on a signer's behalf.

use xdr_codec::{
    utils::{FixedOpaque, VecM},
    xdr_enum, Codec, Reader, Writer,
};

use crate::scval::{ScAddress, ScVal};

pub const AUTH_INVOCATION_MAX: u32 = 32;
pub const AUTH_ARGS_MAX: u32 = 256;
pub const AUTH_SUB_INVOCATIONS_MAX: u32 = 256;

/// `InvokeContractArgs`: the target contract, entry point, and positional
/// arguments of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeContractArgs {
    pub contract_address: ScAddress,
    pub function_name: String,
    pub args: VecM<ScVal, AUTH_ARGS_MAX>,
}

xdr_codec::xdr_struct!(InvokeContractArgs {
    contract_address: ScAddress,
    function_name: String,
    args: VecM<ScVal, AUTH_ARGS_MAX>
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SorobanAuthorizedFunctionType {
    ContractFn,
    CreateContractHostFn,
}

xdr_enum!(SorobanAuthorizedFunctionType {
    ContractFn = 0,
    CreateContractHostFn = 1,
});

/// `SorobanAuthorizedFunction`: what a node in the invocation tree actually
/// does. Contract creation is not modeled here; only direct contract calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SorobanAuthorizedFunction {
    ContractFn(InvokeContractArgs),
}

impl Codec for SorobanAuthorizedFunction {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            SorobanAuthorizedFunction::ContractFn(args) => {
                SorobanAuthorizedFunctionType::ContractFn.encode(w)?;
                args.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match SorobanAuthorizedFunctionType::decode(r)? {
            SorobanAuthorizedFunctionType::ContractFn => {
                Ok(SorobanAuthorizedFunction::ContractFn(InvokeContractArgs::decode(r)?))
            }
            SorobanAuthorizedFunctionType::CreateContractHostFn => {
                Err(xdr_codec::XdrError::InvalidValue)
            }
        }
    }
}

/// `SorobanAuthorizedInvocation`: one call plus the sub-calls it is allowed
/// to make, recursing through `VecM` (itself recursing through `Box` inside
/// `ScVal` where needed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorobanAuthorizedInvocation {
    pub function: SorobanAuthorizedFunction,
    pub sub_invocations: VecM<SorobanAuthorizedInvocation, AUTH_SUB_INVOCATIONS_MAX>,
}

xdr_codec::xdr_struct!(SorobanAuthorizedInvocation {
    function: SorobanAuthorizedFunction,
    sub_invocations: VecM<SorobanAuthorizedInvocation, AUTH_SUB_INVOCATIONS_MAX>
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SorobanCredentialsType {
    SourceAccount,
    Address,
}

xdr_enum!(SorobanCredentialsType {
    SourceAccount = 0,
    Address = 1,
});

/// `SorobanAddressCredentials`: the signature over one `(address, nonce,
/// signature_expiration_ledger)` authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorobanAddressCredentials {
    pub address: ScAddress,
    pub nonce: i64,
    pub signature_expiration_ledger: u32,
    pub signature: ScVal,
}

xdr_codec::xdr_struct!(SorobanAddressCredentials {
    address: ScAddress,
    nonce: i64,
    signature_expiration_ledger: u32,
    signature: ScVal
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SorobanCredentials {
    SourceAccount,
    Address(SorobanAddressCredentials),
}

impl Codec for SorobanCredentials {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            SorobanCredentials::SourceAccount => SorobanCredentialsType::SourceAccount.encode(w),
            SorobanCredentials::Address(c) => {
                SorobanCredentialsType::Address.encode(w)?;
                c.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match SorobanCredentialsType::decode(r)? {
            SorobanCredentialsType::SourceAccount => Ok(SorobanCredentials::SourceAccount),
            SorobanCredentialsType::Address => {
                Ok(SorobanCredentials::Address(SorobanAddressCredentials::decode(r)?))
            }
        }
    }
}

/// `SorobanAuthorizationEntry`: credentials plus the invocation tree they
/// authorize. This is what `authorizeEntry`/`authorizeInvocation` produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SorobanAuthorizationEntry {
    pub credentials: SorobanCredentials,
    pub root_invocation: SorobanAuthorizedInvocation,
}

xdr_codec::xdr_struct!(SorobanAuthorizationEntry {
    credentials: SorobanCredentials,
    root_invocation: SorobanAuthorizedInvocation
});

/// The 4-byte `ENVELOPE_TYPE_SOROBAN_AUTHORIZATION` tag prefixing the
/// pre-image that `authorizeEntry` hashes and signs.
pub const ENVELOPE_TYPE_SOROBAN_AUTHORIZATION: i32 = 9;

/// `HashIdPreimageSorobanAuthorization`: the exact structure signed by
/// `authorizeEntry`. Built from the network id (not the passphrase) so the
/// same entry cannot be replayed across networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashIdPreimageSorobanAuthorization {
    pub network_id: [u8; 32],
    pub nonce: i64,
    pub signature_expiration_ledger: u32,
    pub invocation: SorobanAuthorizedInvocation,
}

impl Codec for HashIdPreimageSorobanAuthorization {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        FixedOpaque::from(self.network_id).encode(w)?;
        self.nonce.encode(w)?;
        self.signature_expiration_ledger.encode(w)?;
        self.invocation.encode(w)
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        let network_id = *FixedOpaque::<32>::decode(r)?;
        let nonce = i64::decode(r)?;
        let signature_expiration_ledger = u32::decode(r)?;
        let invocation = SorobanAuthorizedInvocation::decode(r)?;
        Ok(HashIdPreimageSorobanAuthorization {
            network_id,
            nonce,
            signature_expiration_ledger,
            invocation,
        })
    }
}

/// Encodes `ENVELOPE_TYPE_SOROBAN_AUTHORIZATION || preimage` and hashes it
/// with SHA-256: the exact pre-image `authorizeEntry` signs. Callers in
/// `xdr-txbuilder` append the resulting signature to the entry's
/// credentials rather than re-deriving this pre-image themselves.
pub fn authorization_hash_preimage(
    preimage: &HashIdPreimageSorobanAuthorization,
) -> xdr_codec::Result<Vec<u8>> {
    let mut w = Writer::new();
    ENVELOPE_TYPE_SOROBAN_AUTHORIZATION.encode(&mut w)?;
    preimage.encode(&mut w)?;
    Ok(w.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountId, PublicKey};

    fn leaf_invocation() -> SorobanAuthorizedInvocation {
        SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract([9u8; 32]),
                function_name: "transfer".to_string(),
                args: vec![ScVal::U32(1)].try_into().unwrap(),
            }),
            sub_invocations: VecM::empty(),
        }
    }

    #[test]
    fn invocation_tree_round_trips() {
        let root = SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract([1u8; 32]),
                function_name: "swap".to_string(),
                args: VecM::empty(),
            }),
            sub_invocations: vec![leaf_invocation()].try_into().unwrap(),
        };
        let bytes = root.to_bytes().unwrap();
        assert_eq!(SorobanAuthorizedInvocation::from_bytes(&bytes).unwrap(), root);
    }

    #[test]
    fn source_account_credentials_round_trip() {
        let entry = SorobanAuthorizationEntry {
            credentials: SorobanCredentials::SourceAccount,
            root_invocation: leaf_invocation(),
        };
        let bytes = entry.to_bytes().unwrap();
        assert_eq!(SorobanAuthorizationEntry::from_bytes(&bytes).unwrap(), entry);
    }

    #[test]
    fn address_credentials_round_trip() {
        let account = AccountId(PublicKey::PublicKeyTypeEd25519([3u8; 32]));
        let creds = SorobanCredentials::Address(SorobanAddressCredentials {
            address: ScAddress::Account(account),
            nonce: 42,
            signature_expiration_ledger: 1000,
            signature: ScVal::Void,
        });
        let bytes = creds.to_bytes().unwrap();
        assert_eq!(SorobanCredentials::from_bytes(&bytes).unwrap(), creds);
    }

    #[test]
    fn preimage_hash_is_deterministic() {
        let preimage = HashIdPreimageSorobanAuthorization {
            network_id: [1u8; 32],
            nonce: 7,
            signature_expiration_ledger: 100,
            invocation: leaf_invocation(),
        };
        let a = authorization_hash_preimage(&preimage).unwrap();
        let b = authorization_hash_preimage(&preimage).unwrap();
        assert_eq!(a, b);
    }
}
