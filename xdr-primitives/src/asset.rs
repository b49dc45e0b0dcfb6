//! Assets: native XLM plus 4- and 12-character credit alphanumeric codes.

use std::cmp::Ordering;

use xdr_codec::{error::XdrError, utils::FixedOpaque, xdr_enum, Codec, Reader, Writer};

use crate::account::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Native,
    CreditAlphanum4,
    CreditAlphanum12,
}

xdr_enum!(AssetType {
    Native = 0,
    CreditAlphanum4 = 1,
    CreditAlphanum12 = 2,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetCode4(pub [u8; 4]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetCode12(pub [u8; 12]);

impl Codec for AssetCode4 {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        FixedOpaque::from(self.0).encode(w)
    }
    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        Ok(AssetCode4(*FixedOpaque::<4>::decode(r)?))
    }
}

impl Codec for AssetCode12 {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        FixedOpaque::from(self.0).encode(w)
    }
    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        Ok(AssetCode12(*FixedOpaque::<12>::decode(r)?))
    }
}

impl AssetCode4 {
    /// Right-pads a short code (e.g. `"USD"`) with zero bytes.
    pub fn from_str(code: &str) -> Result<Self, XdrError> {
        pack(code, 4).map(|b| AssetCode4(b.try_into().unwrap()))
    }

    pub fn as_str(&self) -> String {
        unpack(&self.0)
    }
}

impl AssetCode12 {
    pub fn from_str(code: &str) -> Result<Self, XdrError> {
        pack(code, 12).map(|b| AssetCode12(b.try_into().unwrap()))
    }

    pub fn as_str(&self) -> String {
        unpack(&self.0)
    }
}

fn pack(code: &str, width: usize) -> Result<Vec<u8>, XdrError> {
    if code.is_empty() || code.len() > width || !code.is_ascii() {
        return Err(XdrError::InvalidValue);
    }
    let mut out = vec![0u8; width];
    out[..code.len()].copy_from_slice(code.as_bytes());
    Ok(out)
}

fn unpack(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// `Asset`: native XLM, or an issued credit asset identified by
/// `(code, issuer)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Native,
    CreditAlphanum4 { code: AssetCode4, issuer: AccountId },
    CreditAlphanum12 { code: AssetCode12, issuer: AccountId },
}

impl Codec for Asset {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            Asset::Native => AssetType::Native.encode(w),
            Asset::CreditAlphanum4 { code, issuer } => {
                AssetType::CreditAlphanum4.encode(w)?;
                code.encode(w)?;
                issuer.encode(w)
            }
            Asset::CreditAlphanum12 { code, issuer } => {
                AssetType::CreditAlphanum12.encode(w)?;
                code.encode(w)?;
                issuer.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match AssetType::decode(r)? {
            AssetType::Native => Ok(Asset::Native),
            AssetType::CreditAlphanum4 => Ok(Asset::CreditAlphanum4 {
                code: AssetCode4::decode(r)?,
                issuer: AccountId::decode(r)?,
            }),
            AssetType::CreditAlphanum12 => Ok(Asset::CreditAlphanum12 {
                code: AssetCode12::decode(r)?,
                issuer: AccountId::decode(r)?,
            }),
        }
    }
}

impl Asset {
    fn rank(&self) -> u8 {
        match self {
            Asset::Native => 0,
            Asset::CreditAlphanum4 { .. } => 1,
            Asset::CreditAlphanum12 { .. } => 2,
        }
    }
}

/// Canonical liquidity-pool asset ordering: native first, then by asset
/// type, then by `(code, issuer)` lexicographically. Pool ids are derived
/// from this exact ordering, so a pair built in the wrong order hashes to a
/// different (incorrect) pool.
impl PartialOrd for Asset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Asset {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Asset::Native, Asset::Native) => Ordering::Equal,
            (
                Asset::CreditAlphanum4 { code: c1, issuer: i1 },
                Asset::CreditAlphanum4 { code: c2, issuer: i2 },
            ) => c1.cmp(c2).then_with(|| i1.0.ed25519_bytes().cmp(&i2.0.ed25519_bytes())),
            (
                Asset::CreditAlphanum12 { code: c1, issuer: i1 },
                Asset::CreditAlphanum12 { code: c2, issuer: i2 },
            ) => c1.cmp(c2).then_with(|| i1.0.ed25519_bytes().cmp(&i2.0.ed25519_bytes())),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// `ChangeTrustAsset` reuses [`Asset`]'s wire shape; liquidity-pool trust
/// lines (not modeled here) would extend this union with a pool-parameters
/// arm.
pub type ChangeTrustAsset = Asset;

/// `Price`: a rational `n/d` used for offer and path-payment pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

xdr_codec::xdr_struct!(Price { n: i32, d: i32 });

/// Parses a decimal amount string (e.g. `"100.5"`) into stroops (1 unit =
/// 10,000,000 stroops), matching the `Amount` semantics over XDR's `i64`.
pub fn parse_amount(s: &str) -> Result<i64, XdrError> {
    const SCALE: i64 = 10_000_000;
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if frac_part.len() > 7 {
        return Err(XdrError::InvalidValue);
    }
    let int_value: i64 = int_part.parse().map_err(|_| XdrError::InvalidValue)?;
    let mut frac_digits = frac_part.to_string();
    frac_digits.push_str(&"0".repeat(7 - frac_part.len()));
    let frac_value: i64 = frac_digits.parse().map_err(|_| XdrError::InvalidValue)?;
    int_value
        .checked_mul(SCALE)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(XdrError::InvalidValue)
}

/// Formats stroops back into a decimal amount string, the inverse of
/// [`parse_amount`]. Always emits exactly seven fractional digits (e.g.
/// `1 -> "0.0000001"`) rather than trimming trailing zeros, so the output
/// is unambiguous about the scale it was computed at.
pub fn format_amount(stroops: i64) -> String {
    const SCALE: i64 = 10_000_000;
    let sign = if stroops < 0 { "-" } else { "" };
    let magnitude = stroops.unsigned_abs();
    let int_part = magnitude / SCALE as u64;
    let frac_part = magnitude % SCALE as u64;
    format!("{sign}{int_part}.{frac_part:07}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_sorts_before_credit_assets() {
        let issuer = AccountId(crate::account::PublicKey::PublicKeyTypeEd25519([1u8; 32]));
        let credit = Asset::CreditAlphanum4 {
            code: AssetCode4::from_str("USD").unwrap(),
            issuer,
        };
        assert!(Asset::Native < credit);
    }

    #[test]
    fn asset_code_round_trips_and_strips_padding() {
        let code = AssetCode4::from_str("USD").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.0, *b"USD\0");
    }

    #[test]
    fn asset_round_trips() {
        let issuer = AccountId(crate::account::PublicKey::PublicKeyTypeEd25519([2u8; 32]));
        let asset = Asset::CreditAlphanum12 {
            code: AssetCode12::from_str("LONGERCODE12").unwrap(),
            issuer,
        };
        let bytes = asset.to_bytes().unwrap();
        assert_eq!(Asset::from_bytes(&bytes).unwrap(), asset);
    }

    #[test]
    fn parse_amount_converts_decimal_to_stroops() {
        assert_eq!(parse_amount("100.5").unwrap(), 1_005_000_000);
        assert_eq!(parse_amount("1").unwrap(), 10_000_000);
    }

    #[test]
    fn parse_amount_rejects_sub_stroop_precision() {
        assert!(parse_amount("0.00000001").is_err());
    }

    #[test]
    fn format_amount_always_emits_seven_decimals() {
        assert_eq!(format_amount(1), "0.0000001");
        assert_eq!(format_amount(1_005_000_000), "100.5000000");
        assert_eq!(format_amount(-1), "-0.0000001");
    }

    #[test]
    fn format_amount_is_the_inverse_of_parse_amount() {
        for amount in ["0.0000001", "100.5000000", "1.0000000"] {
            assert_eq!(format_amount(parse_amount(amount).unwrap()), amount);
        }
    }
}
