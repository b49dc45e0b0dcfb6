//! StrKey: a versioned, checksummed textual address format.
//!
//! Every value is the triple `version_byte || payload || crc16` base32
//! (RFC 4648, no padding) encoded, uppercase. The version byte fixes both
//! the expected payload length and the semantics of the bytes it carries
//! (an ed25519 public key, a seed, a contract id, ...).

use std::str::FromStr;

use thiserror::Error;
use xdr_crypto::crc16_xmodem;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("strkey checksum mismatch")]
    ChecksumMismatch,

    #[error("unknown strkey version byte {0:#04x}")]
    InvalidVersion(u8),

    #[error("invalid strkey payload length {0}")]
    InvalidLength(usize),

    #[error("invalid base32 encoding")]
    InvalidBase32,
}

/// Version byte for an ed25519 public key (`G...`).
pub const VERSION_ACCOUNT_ID: u8 = 6 << 3;
/// Version byte for an ed25519 seed (`S...`).
pub const VERSION_SEED: u8 = 18 << 3;
/// Version byte for a pre-authorized transaction hash (`T...`).
pub const VERSION_PRE_AUTH_TX: u8 = 19 << 3;
/// Version byte for a sha256-hash signer (`X...`).
pub const VERSION_HASH_X: u8 = 23 << 3;
/// Version byte for a muxed ed25519 account (`M...`).
pub const VERSION_MUXED_ACCOUNT: u8 = 12 << 3;
/// Version byte for a contract id (`C...`).
pub const VERSION_CONTRACT: u8 = 2 << 3;
/// Version byte for a signed payload signer (`P...`).
pub const VERSION_SIGNED_PAYLOAD: u8 = 15 << 3;

const ED25519_PAYLOAD_LEN: usize = 32;
const MUXED_PAYLOAD_LEN: usize = 32 + 8;

fn check_payload(version: u8, payload: &[u8]) -> Result<(), Error> {
    match version {
        VERSION_ACCOUNT_ID | VERSION_SEED | VERSION_PRE_AUTH_TX | VERSION_HASH_X
        | VERSION_CONTRACT => {
            if payload.len() != ED25519_PAYLOAD_LEN {
                return Err(Error::InvalidLength(payload.len()));
            }
            Ok(())
        }
        VERSION_MUXED_ACCOUNT => {
            if payload.len() != MUXED_PAYLOAD_LEN {
                return Err(Error::InvalidLength(payload.len()));
            }
            Ok(())
        }
        VERSION_SIGNED_PAYLOAD => {
            // 32-byte key, u32 length, up to 64 bytes of payload, padded to a
            // multiple of 4.
            if payload.len() < 32 + 4 {
                return Err(Error::InvalidLength(payload.len()));
            }
            let inner_len = u32::from_be_bytes(payload[32..36].try_into().unwrap()) as usize;
            let padded = inner_len + ((4 - inner_len % 4) % 4);
            if payload.len() != 32 + 4 + padded || inner_len > 64 {
                return Err(Error::InvalidLength(payload.len()));
            }
            Ok(())
        }
        other => Err(Error::InvalidVersion(other)),
    }
}

/// Encode `version || payload` with its CRC16-XModem checksum as an
/// uppercase, unpadded base32 string.
pub fn encode(version: u8, payload: &[u8]) -> Result<String, Error> {
    check_payload(version, payload)?;

    let mut data = Vec::with_capacity(1 + payload.len() + 2);
    data.push(version);
    data.extend_from_slice(payload);

    let crc = crc16_xmodem(&data);
    data.extend_from_slice(&crc.to_le_bytes());

    Ok(base32::encode(base32::Alphabet::RFC4648 { padding: false }, &data))
}

/// Decode a StrKey string back into `(version, payload)`, verifying the
/// checksum.
pub fn decode(s: &str) -> Result<(u8, Vec<u8>), Error> {
    if !s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return Err(Error::InvalidBase32);
    }

    let data = base32::decode(base32::Alphabet::RFC4648 { padding: false }, s)
        .ok_or(Error::InvalidBase32)?;

    if data.len() < 3 {
        return Err(Error::InvalidLength(data.len()));
    }

    let (body, crc_bytes) = data.split_at(data.len() - 2);
    let expected_crc = u16::from_le_bytes(crc_bytes.try_into().unwrap());
    let actual_crc = crc16_xmodem(body);
    if expected_crc != actual_crc {
        return Err(Error::ChecksumMismatch);
    }

    let version = body[0];
    let payload = body[1..].to_vec();
    check_payload(version, &payload)?;

    Ok((version, payload))
}

fn is_valid(version: u8, s: &str) -> bool {
    matches!(decode(s), Ok((v, _)) if v == version)
}

pub fn is_valid_ed25519_public_key(s: &str) -> bool {
    is_valid(VERSION_ACCOUNT_ID, s)
}

pub fn is_valid_ed25519_seed(s: &str) -> bool {
    is_valid(VERSION_SEED, s)
}

pub fn is_valid_pre_auth_tx(s: &str) -> bool {
    is_valid(VERSION_PRE_AUTH_TX, s)
}

pub fn is_valid_sha256_hash(s: &str) -> bool {
    is_valid(VERSION_HASH_X, s)
}

pub fn is_valid_muxed_account(s: &str) -> bool {
    is_valid(VERSION_MUXED_ACCOUNT, s)
}

pub fn is_valid_contract(s: &str) -> bool {
    is_valid(VERSION_CONTRACT, s)
}

pub fn is_valid_signed_payload(s: &str) -> bool {
    is_valid(VERSION_SIGNED_PAYLOAD, s)
}

/// Signer keys accept any of `G`/`T`/`X`/`P` — anything that can be the
/// target of a multi-sig threshold, not just a plain account.
pub fn is_valid_signer_key(s: &str) -> bool {
    match decode(s) {
        Ok((v, _)) => matches!(
            v,
            VERSION_ACCOUNT_ID | VERSION_PRE_AUTH_TX | VERSION_HASH_X | VERSION_SIGNED_PAYLOAD
        ),
        Err(_) => false,
    }
}

/// A strongly-typed StrKey address, dispatching on the version byte the way
/// the wire grammar's tagged unions do elsewhere in this workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrKey {
    PublicKeyEd25519([u8; 32]),
    SeedEd25519([u8; 32]),
    PreAuthTx([u8; 32]),
    HashX([u8; 32]),
    MuxedAccountEd25519 { id: u64, key: [u8; 32] },
    Contract([u8; 32]),
    SignedPayloadEd25519 { key: [u8; 32], payload: Vec<u8> },
}

impl StrKey {
    pub fn version(&self) -> u8 {
        match self {
            StrKey::PublicKeyEd25519(_) => VERSION_ACCOUNT_ID,
            StrKey::SeedEd25519(_) => VERSION_SEED,
            StrKey::PreAuthTx(_) => VERSION_PRE_AUTH_TX,
            StrKey::HashX(_) => VERSION_HASH_X,
            StrKey::MuxedAccountEd25519 { .. } => VERSION_MUXED_ACCOUNT,
            StrKey::Contract(_) => VERSION_CONTRACT,
            StrKey::SignedPayloadEd25519 { .. } => VERSION_SIGNED_PAYLOAD,
        }
    }

    fn payload(&self) -> Vec<u8> {
        match self {
            StrKey::PublicKeyEd25519(k)
            | StrKey::SeedEd25519(k)
            | StrKey::PreAuthTx(k)
            | StrKey::HashX(k)
            | StrKey::Contract(k) => k.to_vec(),
            StrKey::MuxedAccountEd25519 { id, key } => {
                let mut v = key.to_vec();
                v.extend_from_slice(&id.to_be_bytes());
                v
            }
            StrKey::SignedPayloadEd25519 { key, payload } => {
                let mut v = key.to_vec();
                v.extend_from_slice(&(payload.len() as u32).to_be_bytes());
                v.extend_from_slice(payload);
                let pad = (4 - payload.len() % 4) % 4;
                v.extend(std::iter::repeat(0u8).take(pad));
                v
            }
        }
    }

    pub fn to_strkey(&self) -> String {
        encode(self.version(), &self.payload()).expect("payload shape matches its own version")
    }

    pub fn from_strkey(s: &str) -> Result<Self, Error> {
        let (version, payload) = decode(s)?;
        match version {
            VERSION_ACCOUNT_ID => Ok(StrKey::PublicKeyEd25519(to_array(&payload))),
            VERSION_SEED => Ok(StrKey::SeedEd25519(to_array(&payload))),
            VERSION_PRE_AUTH_TX => Ok(StrKey::PreAuthTx(to_array(&payload))),
            VERSION_HASH_X => Ok(StrKey::HashX(to_array(&payload))),
            VERSION_CONTRACT => Ok(StrKey::Contract(to_array(&payload))),
            VERSION_MUXED_ACCOUNT => {
                let key = to_array(&payload[..32]);
                let id = u64::from_be_bytes(payload[32..40].try_into().unwrap());
                Ok(StrKey::MuxedAccountEd25519 { id, key })
            }
            VERSION_SIGNED_PAYLOAD => {
                let key = to_array(&payload[..32]);
                let inner_len = u32::from_be_bytes(payload[32..36].try_into().unwrap()) as usize;
                let inner = payload[36..36 + inner_len].to_vec();
                Ok(StrKey::SignedPayloadEd25519 { key, payload: inner })
            }
            other => Err(Error::InvalidVersion(other)),
        }
    }
}

fn to_array(slice: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&slice[..32]);
    out
}

impl std::fmt::Display for StrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_strkey())
    }
}

impl FromStr for StrKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        StrKey::from_strkey(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Real testnet StrKey, referenced throughout this workspace's
    // transaction-hashing tests: the native-asset contract id for the
    // well-known test network passphrase.
    const NATIVE_ASSET_CONTRACT_TESTNET: &str =
        "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC";

    #[test]
    fn decodes_known_contract_address() {
        let (version, payload) = decode(NATIVE_ASSET_CONTRACT_TESTNET).unwrap();
        assert_eq!(version, VERSION_CONTRACT);
        assert_eq!(payload.len(), 32);
    }

    #[test]
    fn public_key_round_trips() {
        let payload = [0u8; 32];
        let s = encode(VERSION_ACCOUNT_ID, &payload).unwrap();
        assert_eq!(decode(&s).unwrap(), (VERSION_ACCOUNT_ID, payload.to_vec()));
    }

    #[test]
    fn single_bit_flip_fails_checksum() {
        let payload = [7u8; 32];
        let s = encode(VERSION_ACCOUNT_ID, &payload).unwrap();
        let mut chars: Vec<char> = s.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
        let mutated: String = chars.into_iter().collect();
        assert!(matches!(
            decode(&mutated),
            Err(Error::ChecksumMismatch) | Err(Error::InvalidBase32)
        ));
    }

    #[test]
    fn muxed_account_round_trips() {
        let key = StrKey::MuxedAccountEd25519 {
            id: 42,
            key: [9u8; 32],
        };
        let s = key.to_strkey();
        assert_eq!(StrKey::from_strkey(&s).unwrap(), key);
    }

    #[test]
    fn signed_payload_round_trips() {
        let key = StrKey::SignedPayloadEd25519 {
            key: [1u8; 32],
            payload: vec![1, 2, 3, 4, 5],
        };
        let s = key.to_strkey();
        assert_eq!(StrKey::from_strkey(&s).unwrap(), key);
    }

    #[test]
    fn rejects_unknown_version() {
        let payload = [0u8; 32];
        // 99 << 3 is not one of the defined version bytes.
        assert_eq!(
            check_payload(99 << 3, &payload),
            Err(Error::InvalidVersion(99 << 3))
        );
    }

    #[test]
    fn signer_key_accepts_g_t_x_p_only() {
        let pub_key = encode(VERSION_ACCOUNT_ID, &[0u8; 32]).unwrap();
        let seed = encode(VERSION_SEED, &[0u8; 32]).unwrap();
        assert!(is_valid_signer_key(&pub_key));
        assert!(!is_valid_signer_key(&seed));
    }
}
