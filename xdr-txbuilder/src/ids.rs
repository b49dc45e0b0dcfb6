//! Deterministic IDs (C10): liquidity pool IDs and Soroban asset-contract IDs.

use xdr_codec::Codec;
use xdr_crypto::Hasher;
use xdr_primitives::asset::Asset;

use crate::error::{Error, Result};
use crate::network::NetworkConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityPoolFeeV18 {
    Standard,
}

impl LiquidityPoolFeeV18 {
    fn basis_points(self) -> i32 {
        match self {
            LiquidityPoolFeeV18::Standard => 30,
        }
    }
}

/// Discriminant of `LiquidityPoolParameters`; the wire union has exactly
/// one arm today, but the discriminant is still present on the wire.
const LIQUIDITY_POOL_TYPE_CONSTANT_PRODUCT: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConstantProductParameters {
    asset_a: Asset,
    asset_b: Asset,
    fee: i32,
}

xdr_codec::xdr_struct!(ConstantProductParameters {
    asset_a: Asset,
    asset_b: Asset,
    fee: i32
});

/// `sha256(xdr_encode(LiquidityPoolParameters{ConstantProduct{...}}))`.
/// `LiquidityPoolParameters` is a union keyed on `LiquidityPoolType`, so the
/// discriminant precedes the parameter struct even though
/// `ConstantProduct` is its only arm. `asset_a`/`asset_b` must already be in
/// the canonical `Asset` order; passing them reversed is an error rather
/// than silently re-sorted, since a pool built from the wrong order hashes
/// to a different (wrong) pool.
pub fn liquidity_pool_id(asset_a: &Asset, asset_b: &Asset, fee: LiquidityPoolFeeV18) -> Result<[u8; 32]> {
    if asset_a >= asset_b {
        return Err(Error::InvalidAsset(
            "liquidity pool assets must be in strict canonical order".to_string(),
        ));
    }
    let params = ConstantProductParameters {
        asset_a: asset_a.clone(),
        asset_b: asset_b.clone(),
        fee: fee.basis_points(),
    };
    let mut w = xdr_codec::Writer::new();
    LIQUIDITY_POOL_TYPE_CONSTANT_PRODUCT.encode(&mut w)?;
    params.encode(&mut w)?;
    let bytes = w.into_bytes();
    Ok(*Hasher::<256>::hash(&bytes))
}

/// `HashIDPreimage`'s discriminant for the contract-id arm (distinct from
/// `ENVELOPE_TYPE_TX`, which happens to share the small integer namespace
/// but is a different union entirely).
const ENVELOPE_TYPE_CONTRACT_ID: i32 = 8;
/// Discriminant of the nested `ContractIDPreimage` union selecting the
/// "derived from an asset" arm.
const CONTRACT_ID_PREIMAGE_FROM_ASSET: i32 = 1;

/// `sha256(xdr_encode(HashIDPreimage::ContractId{network_id, ContractIDPreimage::FromAsset(asset)}))`,
/// re-encoded as a `C...` contract StrKey.
pub fn asset_contract_strkey(asset: &Asset, network: &NetworkConfig) -> Result<String> {
    let mut w = xdr_codec::Writer::new();
    ENVELOPE_TYPE_CONTRACT_ID.encode(&mut w)?;
    w.write_fixed_opaque(&network.network_id(), 32)?;
    CONTRACT_ID_PREIMAGE_FROM_ASSET.encode(&mut w)?;
    asset.encode(&mut w)?;
    let bytes = w.into_bytes();
    let hash = *Hasher::<256>::hash(&bytes);
    Ok(xdr_strkey::encode(xdr_strkey::VERSION_CONTRACT, &hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdr_primitives::account::{AccountId, PublicKey};
    use xdr_primitives::asset::AssetCode4;

    #[test]
    fn pool_id_rejects_misordered_assets() {
        let issuer = AccountId(PublicKey::PublicKeyTypeEd25519([1u8; 32]));
        let credit = Asset::CreditAlphanum4 {
            code: AssetCode4::from_str("USD").unwrap(),
            issuer,
        };
        assert!(liquidity_pool_id(&credit, &Asset::Native, LiquidityPoolFeeV18::Standard).is_err());
    }

    #[test]
    fn pool_id_is_deterministic_for_ordered_assets() {
        let issuer = AccountId(PublicKey::PublicKeyTypeEd25519([1u8; 32]));
        let credit = Asset::CreditAlphanum4 {
            code: AssetCode4::from_str("USD").unwrap(),
            issuer,
        };
        let a = liquidity_pool_id(&Asset::Native, &credit, LiquidityPoolFeeV18::Standard).unwrap();
        let b = liquidity_pool_id(&Asset::Native, &credit, LiquidityPoolFeeV18::Standard).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn asset_contract_strkey_uses_contract_version() {
        let strkey = asset_contract_strkey(&Asset::Native, &NetworkConfig::testnet()).unwrap();
        assert!(strkey.starts_with('C'));
    }

    #[test]
    fn asset_contract_strkey_is_deterministic() {
        let a = asset_contract_strkey(&Asset::Native, &NetworkConfig::testnet()).unwrap();
        let b = asset_contract_strkey(&Asset::Native, &NetworkConfig::testnet()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn native_asset_contract_matches_known_testnet_id() {
        let strkey = asset_contract_strkey(&Asset::Native, &NetworkConfig::testnet()).unwrap();
        assert_eq!(strkey, "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC");
    }
}
