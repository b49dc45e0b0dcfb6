//! Soroban contract values (`ScVal`) and addresses (`ScAddress`).

use xdr_codec::{
    utils::{BytesM, FixedOpaque, VecM},
    xdr_enum, Codec, Reader, Writer,
};

use crate::bigint::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts};

pub const SCVAL_VEC_MAX: u32 = 256;
pub const SCVAL_MAP_MAX: u32 = 256;
pub const SCSYMBOL_MAX_BYTES: u32 = 32;
pub const SCBYTES_MAX: u32 = 64 * 1024;
pub const SCSTRING_MAX: u32 = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScValType {
    Bool,
    Void,
    Error,
    U32,
    I32,
    U64,
    I64,
    Timepoint,
    Duration,
    U128,
    I128,
    U256,
    I256,
    Bytes,
    String,
    Symbol,
    Vec,
    Map,
    Address,
    LedgerKeyContractInstance,
    ContractInstance,
}

xdr_enum!(ScValType {
    Bool = 0,
    Void = 1,
    Error = 2,
    U32 = 3,
    I32 = 4,
    U64 = 5,
    I64 = 6,
    Timepoint = 7,
    Duration = 8,
    U128 = 9,
    I128 = 10,
    U256 = 11,
    I256 = 12,
    Bytes = 13,
    String = 14,
    Symbol = 15,
    Vec = 16,
    Map = 17,
    Address = 18,
    LedgerKeyContractInstance = 19,
    ContractInstance = 20,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScAddressType {
    Account,
    Contract,
}

xdr_enum!(ScAddressType {
    Account = 0,
    Contract = 1,
});

/// `ScAddress`: either a classic account or a Soroban contract, identified
/// by the same raw 32-byte key either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScAddress {
    Account(crate::account::AccountId),
    Contract([u8; 32]),
}

impl Codec for ScAddress {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            ScAddress::Account(a) => {
                ScAddressType::Account.encode(w)?;
                a.encode(w)
            }
            ScAddress::Contract(c) => {
                ScAddressType::Contract.encode(w)?;
                FixedOpaque::from(*c).encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match ScAddressType::decode(r)? {
            ScAddressType::Account => Ok(ScAddress::Account(crate::account::AccountId::decode(r)?)),
            ScAddressType::Contract => Ok(ScAddress::Contract(*FixedOpaque::<32>::decode(r)?)),
        }
    }
}

impl ScAddress {
    pub fn strkey(&self) -> String {
        match self {
            ScAddress::Account(a) => a.strkey(),
            ScAddress::Contract(c) => {
                xdr_strkey::encode(xdr_strkey::VERSION_CONTRACT, c).expect("32-byte contract id")
            }
        }
    }
}

/// A contract-to-contract map entry, kept sorted by key as the host requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScMapEntry {
    pub key: ScVal,
    pub val: ScVal,
}

xdr_codec::xdr_struct!(ScMapEntry { key: ScVal, val: ScVal });

/// `ScVal`: the tagged union of values a Soroban host function accepts and
/// returns. `Vec`/`Map` recurse through `Box`, which is also this
/// workspace's generic lazy-codec combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScVal {
    Bool(bool),
    Void,
    Error(u32),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128(UInt128Parts),
    I128(Int128Parts),
    U256(UInt256Parts),
    I256(Int256Parts),
    Bytes(BytesM<SCBYTES_MAX>),
    String(String),
    Symbol(String),
    Vec(Option<VecM<ScVal, SCVAL_VEC_MAX>>),
    Map(Option<VecM<ScMapEntry, SCVAL_MAP_MAX>>),
    Address(ScAddress),
}

impl Codec for ScVal {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            ScVal::Bool(v) => {
                ScValType::Bool.encode(w)?;
                v.encode(w)
            }
            ScVal::Void => ScValType::Void.encode(w),
            ScVal::Error(v) => {
                ScValType::Error.encode(w)?;
                v.encode(w)
            }
            ScVal::U32(v) => {
                ScValType::U32.encode(w)?;
                v.encode(w)
            }
            ScVal::I32(v) => {
                ScValType::I32.encode(w)?;
                v.encode(w)
            }
            ScVal::U64(v) => {
                ScValType::U64.encode(w)?;
                v.encode(w)
            }
            ScVal::I64(v) => {
                ScValType::I64.encode(w)?;
                v.encode(w)
            }
            ScVal::Timepoint(v) => {
                ScValType::Timepoint.encode(w)?;
                v.encode(w)
            }
            ScVal::Duration(v) => {
                ScValType::Duration.encode(w)?;
                v.encode(w)
            }
            ScVal::U128(v) => {
                ScValType::U128.encode(w)?;
                v.encode(w)
            }
            ScVal::I128(v) => {
                ScValType::I128.encode(w)?;
                v.encode(w)
            }
            ScVal::U256(v) => {
                ScValType::U256.encode(w)?;
                v.encode(w)
            }
            ScVal::I256(v) => {
                ScValType::I256.encode(w)?;
                v.encode(w)
            }
            ScVal::Bytes(v) => {
                ScValType::Bytes.encode(w)?;
                v.encode(w)
            }
            ScVal::String(v) => {
                ScValType::String.encode(w)?;
                w.write_string(v, Some(SCSTRING_MAX as usize))
            }
            ScVal::Symbol(v) => {
                ScValType::Symbol.encode(w)?;
                w.write_string(v, Some(SCSYMBOL_MAX_BYTES as usize))
            }
            ScVal::Vec(v) => {
                ScValType::Vec.encode(w)?;
                v.encode(w)
            }
            ScVal::Map(v) => {
                ScValType::Map.encode(w)?;
                v.encode(w)
            }
            ScVal::Address(v) => {
                ScValType::Address.encode(w)?;
                v.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match ScValType::decode(r)? {
            ScValType::Bool => Ok(ScVal::Bool(bool::decode(r)?)),
            ScValType::Void => Ok(ScVal::Void),
            ScValType::Error => Ok(ScVal::Error(u32::decode(r)?)),
            ScValType::U32 => Ok(ScVal::U32(u32::decode(r)?)),
            ScValType::I32 => Ok(ScVal::I32(i32::decode(r)?)),
            ScValType::U64 => Ok(ScVal::U64(u64::decode(r)?)),
            ScValType::I64 => Ok(ScVal::I64(i64::decode(r)?)),
            ScValType::Timepoint => Ok(ScVal::Timepoint(u64::decode(r)?)),
            ScValType::Duration => Ok(ScVal::Duration(u64::decode(r)?)),
            ScValType::U128 => Ok(ScVal::U128(UInt128Parts::decode(r)?)),
            ScValType::I128 => Ok(ScVal::I128(Int128Parts::decode(r)?)),
            ScValType::U256 => Ok(ScVal::U256(UInt256Parts::decode(r)?)),
            ScValType::I256 => Ok(ScVal::I256(Int256Parts::decode(r)?)),
            ScValType::Bytes => Ok(ScVal::Bytes(BytesM::decode(r)?)),
            ScValType::String => Ok(ScVal::String(r.read_string(Some(SCSTRING_MAX as usize))?)),
            ScValType::Symbol => Ok(ScVal::Symbol(r.read_string(Some(SCSYMBOL_MAX_BYTES as usize))?)),
            ScValType::Vec => Ok(ScVal::Vec(Option::decode(r)?)),
            ScValType::Map => Ok(ScVal::Map(Option::decode(r)?)),
            ScValType::Address => Ok(ScVal::Address(ScAddress::decode(r)?)),
            // Contract-instance storage values are out of scope here; the
            // discriminant decodes but has no corresponding `ScVal` arm.
            ScValType::LedgerKeyContractInstance | ScValType::ContractInstance => {
                Err(xdr_codec::XdrError::InvalidValue)
            }
        }
    }
}

impl ScVal {
    pub fn symbol(s: impl Into<String>) -> Result<Self, xdr_codec::XdrError> {
        let s = s.into();
        if s.len() > SCSYMBOL_MAX_BYTES as usize {
            return Err(xdr_codec::XdrError::LengthExceedsMax {
                len: s.len(),
                max: SCSYMBOL_MAX_BYTES as usize,
            });
        }
        Ok(ScVal::Symbol(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_round_trips() {
        let bytes = ScVal::Void.to_bytes().unwrap();
        assert_eq!(ScVal::from_bytes(&bytes).unwrap(), ScVal::Void);
    }

    #[test]
    fn i128_round_trips() {
        let val = ScVal::I128(Int128Parts { hi: -1, lo: u64::MAX });
        let bytes = val.to_bytes().unwrap();
        assert_eq!(ScVal::from_bytes(&bytes).unwrap(), val);
    }

    #[test]
    fn nested_vec_round_trips() {
        let inner: VecM<ScVal, SCVAL_VEC_MAX> =
            vec![ScVal::U32(1), ScVal::Bool(true)].try_into().unwrap();
        let val = ScVal::Vec(Some(inner));
        let bytes = val.to_bytes().unwrap();
        assert_eq!(ScVal::from_bytes(&bytes).unwrap(), val);
    }

    #[test]
    fn map_round_trips_sorted_entries() {
        let entries: VecM<ScMapEntry, SCVAL_MAP_MAX> = vec![ScMapEntry {
            key: ScVal::symbol("a").unwrap(),
            val: ScVal::U32(1),
        }]
        .try_into()
        .unwrap();
        let val = ScVal::Map(Some(entries));
        let bytes = val.to_bytes().unwrap();
        assert_eq!(ScVal::from_bytes(&bytes).unwrap(), val);
    }

    #[test]
    fn symbol_rejects_over_32_bytes() {
        assert!(ScVal::symbol("a".repeat(33)).is_err());
    }

    #[test]
    fn address_strkey_uses_contract_version() {
        let addr = ScAddress::Contract([0u8; 32]);
        assert!(addr.strkey().starts_with('C'));
    }
}
