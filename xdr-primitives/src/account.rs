//! Accounts, muxed accounts, and signer keys.

use xdr_codec::{error::XdrError, utils::FixedOpaque, xdr_enum, Codec, Reader, Writer};
use xdr_crypto::PublicKey as Ed25519PublicKey;

/// `PublicKeyType`: the discriminant of [`PublicKey`]. Only the ed25519 arm
/// is defined on the wire today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyType {
    Ed25519,
}

xdr_enum!(PublicKeyType { Ed25519 = 0 });

/// `PublicKey`: a tagged union over [`PublicKeyType`]. The sole arm carries
/// a raw 32-byte ed25519 key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    PublicKeyTypeEd25519([u8; 32]),
}

impl Codec for PublicKey {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            PublicKey::PublicKeyTypeEd25519(k) => {
                PublicKeyType::Ed25519.encode(w)?;
                FixedOpaque::from(*k).encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match PublicKeyType::decode(r)? {
            PublicKeyType::Ed25519 => {
                let k = FixedOpaque::<32>::decode(r)?;
                Ok(PublicKey::PublicKeyTypeEd25519(*k))
            }
        }
    }
}

impl PublicKey {
    pub fn ed25519_bytes(&self) -> [u8; 32] {
        match self {
            PublicKey::PublicKeyTypeEd25519(k) => *k,
        }
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(k: Ed25519PublicKey) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(k.as_ref());
        PublicKey::PublicKeyTypeEd25519(bytes)
    }
}

/// `AccountId`: a typedef over [`PublicKey`] used wherever a plain (not
/// muxed) account address is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub PublicKey);

impl Codec for AccountId {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        self.0.encode(w)
    }
    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        Ok(AccountId(PublicKey::decode(r)?))
    }
}

impl AccountId {
    pub fn strkey(&self) -> String {
        let (version, payload) = match self.0 {
            PublicKey::PublicKeyTypeEd25519(k) => (xdr_strkey::VERSION_ACCOUNT_ID, k.to_vec()),
        };
        xdr_strkey::encode(version, &payload).expect("account id payload is always 32 bytes")
    }

    pub fn from_strkey(s: &str) -> Result<Self, xdr_strkey::Error> {
        let (version, payload) = xdr_strkey::decode(s)?;
        if version != xdr_strkey::VERSION_ACCOUNT_ID {
            return Err(xdr_strkey::Error::InvalidVersion(version));
        }
        let mut k = [0u8; 32];
        k.copy_from_slice(&payload);
        Ok(AccountId(PublicKey::PublicKeyTypeEd25519(k)))
    }
}

/// `CryptoKeyType`: the discriminant of [`MuxedAccount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoKeyType {
    Ed25519,
    MuxedEd25519,
}

xdr_enum!(CryptoKeyType {
    Ed25519 = 0,
    MuxedEd25519 = 0x100,
});

/// `MuxedAccount`: either a plain ed25519 key or an `(ed25519_key, u64 id)`
/// pair addressable as a single virtual account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxedAccount {
    KeyTypeEd25519([u8; 32]),
    KeyTypeMuxedEd25519 { id: u64, ed25519: [u8; 32] },
}

impl Codec for MuxedAccount {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            MuxedAccount::KeyTypeEd25519(k) => {
                CryptoKeyType::Ed25519.encode(w)?;
                FixedOpaque::from(*k).encode(w)
            }
            MuxedAccount::KeyTypeMuxedEd25519 { id, ed25519 } => {
                CryptoKeyType::MuxedEd25519.encode(w)?;
                id.encode(w)?;
                FixedOpaque::from(*ed25519).encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match CryptoKeyType::decode(r)? {
            CryptoKeyType::Ed25519 => {
                let k = FixedOpaque::<32>::decode(r)?;
                Ok(MuxedAccount::KeyTypeEd25519(*k))
            }
            CryptoKeyType::MuxedEd25519 => {
                let id = u64::decode(r)?;
                let k = FixedOpaque::<32>::decode(r)?;
                Ok(MuxedAccount::KeyTypeMuxedEd25519 { id, ed25519: *k })
            }
        }
    }
}

impl MuxedAccount {
    pub fn ed25519_bytes(&self) -> [u8; 32] {
        match self {
            MuxedAccount::KeyTypeEd25519(k) => *k,
            MuxedAccount::KeyTypeMuxedEd25519 { ed25519, .. } => *ed25519,
        }
    }

    pub fn to_account_id(&self) -> AccountId {
        AccountId(PublicKey::PublicKeyTypeEd25519(self.ed25519_bytes()))
    }

    pub fn strkey(&self) -> String {
        match self {
            MuxedAccount::KeyTypeEd25519(k) => {
                xdr_strkey::encode(xdr_strkey::VERSION_ACCOUNT_ID, k)
                    .expect("32-byte ed25519 payload")
            }
            MuxedAccount::KeyTypeMuxedEd25519 { id, ed25519 } => {
                let mut payload = ed25519.to_vec();
                payload.extend_from_slice(&id.to_be_bytes());
                xdr_strkey::encode(xdr_strkey::VERSION_MUXED_ACCOUNT, &payload)
                    .expect("40-byte muxed payload")
            }
        }
    }

    pub fn from_strkey(s: &str) -> Result<Self, xdr_strkey::Error> {
        let (version, payload) = xdr_strkey::decode(s)?;
        match version {
            xdr_strkey::VERSION_ACCOUNT_ID => {
                let mut k = [0u8; 32];
                k.copy_from_slice(&payload);
                Ok(MuxedAccount::KeyTypeEd25519(k))
            }
            xdr_strkey::VERSION_MUXED_ACCOUNT => {
                let mut k = [0u8; 32];
                k.copy_from_slice(&payload[..32]);
                let id = u64::from_be_bytes(payload[32..40].try_into().unwrap());
                Ok(MuxedAccount::KeyTypeMuxedEd25519 { id, ed25519: k })
            }
            other => Err(xdr_strkey::Error::InvalidVersion(other)),
        }
    }

    pub fn from_account_id(account: AccountId) -> Self {
        match account.0 {
            PublicKey::PublicKeyTypeEd25519(k) => MuxedAccount::KeyTypeEd25519(k),
        }
    }
}

/// `SignerKeyType`: the discriminant of [`SignerKey`]. Accepts the same
/// version-byte family as StrKey's `isValidSignerKey`: ed25519, pre-auth-tx,
/// hash(x), and ed25519-signed-payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKeyType {
    Ed25519,
    PreAuthTx,
    HashX,
    Ed25519SignedPayload,
}

xdr_enum!(SignerKeyType {
    Ed25519 = 0,
    PreAuthTx = 1,
    HashX = 2,
    Ed25519SignedPayload = 3,
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerKey {
    Ed25519([u8; 32]),
    PreAuthTx([u8; 32]),
    HashX([u8; 32]),
    Ed25519SignedPayload { ed25519: [u8; 32], payload: Vec<u8> },
}

impl Codec for SignerKey {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            SignerKey::Ed25519(k) => {
                SignerKeyType::Ed25519.encode(w)?;
                FixedOpaque::from(*k).encode(w)
            }
            SignerKey::PreAuthTx(k) => {
                SignerKeyType::PreAuthTx.encode(w)?;
                FixedOpaque::from(*k).encode(w)
            }
            SignerKey::HashX(k) => {
                SignerKeyType::HashX.encode(w)?;
                FixedOpaque::from(*k).encode(w)
            }
            SignerKey::Ed25519SignedPayload { ed25519, payload } => {
                SignerKeyType::Ed25519SignedPayload.encode(w)?;
                FixedOpaque::from(*ed25519).encode(w)?;
                w.write_var_opaque(payload, Some(64))
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match SignerKeyType::decode(r)? {
            SignerKeyType::Ed25519 => Ok(SignerKey::Ed25519(*FixedOpaque::<32>::decode(r)?)),
            SignerKeyType::PreAuthTx => Ok(SignerKey::PreAuthTx(*FixedOpaque::<32>::decode(r)?)),
            SignerKeyType::HashX => Ok(SignerKey::HashX(*FixedOpaque::<32>::decode(r)?)),
            SignerKeyType::Ed25519SignedPayload => {
                let ed25519 = *FixedOpaque::<32>::decode(r)?;
                let payload = r.read_var_opaque(Some(64))?;
                Ok(SignerKey::Ed25519SignedPayload { ed25519, payload })
            }
        }
    }
}

/// `Signer`: a [`SignerKey`] with its multi-sig threshold weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

xdr_codec::xdr_struct!(Signer {
    key: SignerKey,
    weight: u32,
});

/// `DecoratedSignature`: a signature plus the 4-byte hint identifying which
/// signer produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: Vec<u8>,
}

impl Codec for DecoratedSignature {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        FixedOpaque::from(self.hint).encode(w)?;
        w.write_var_opaque(&self.signature, Some(64))
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        let hint = *FixedOpaque::<4>::decode(r)?;
        let signature = r.read_var_opaque(Some(64))?;
        Ok(DecoratedSignature { hint, signature })
    }
}

impl TryFrom<Vec<u8>> for PublicKey {
    type Error = XdrError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, XdrError> {
        if bytes.len() != 32 {
            return Err(XdrError::LengthMismatch {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut k = [0u8; 32];
        k.copy_from_slice(&bytes);
        Ok(PublicKey::PublicKeyTypeEd25519(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_strkey_round_trips() {
        let account = AccountId(PublicKey::PublicKeyTypeEd25519([0u8; 32]));
        let s = account.strkey();
        assert!(s.starts_with('G'));
        assert_eq!(AccountId::from_strkey(&s).unwrap(), account);
    }

    #[test]
    fn muxed_account_strkey_round_trips() {
        let account = MuxedAccount::KeyTypeMuxedEd25519 {
            id: 999,
            ed25519: [3u8; 32],
        };
        let s = account.strkey();
        assert!(s.starts_with('M'));
        assert_eq!(MuxedAccount::from_strkey(&s).unwrap(), account);
    }

    #[test]
    fn muxed_account_codec_round_trips() {
        let account = MuxedAccount::KeyTypeEd25519([1u8; 32]);
        let bytes = account.to_bytes().unwrap();
        assert_eq!(MuxedAccount::from_bytes(&bytes).unwrap(), account);
    }

    #[test]
    fn signer_key_rejects_unknown_discriminant() {
        let bytes = 99i32.to_bytes().unwrap();
        assert!(SignerKeyType::from_bytes(&bytes).is_err());
    }
}
