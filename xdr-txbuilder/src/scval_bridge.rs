//! Contract value bridge (C9): converting between native Rust values and
//! [`ScVal`].
//!
//! There is no dynamically-typed "native value" in Rust the way there is in
//! a scripting host, so this bridge is expressed as a small enum
//! (`NativeValue`) standing in for the source's untyped values, plus
//! explicit `From`/`TryFrom` impls for the common scalar types. An explicit
//! `type` hint is just picking the right constructor instead of an implicit
//! default.

use xdr_codec::utils::VecM;
use xdr_primitives::bigint::{narrowest_width, Int128Parts, ScIntWidth, UInt128Parts};
use xdr_primitives::scval::{ScAddress, ScVal, SCVAL_VEC_MAX};

use crate::error::{Error, Result};

/// A native value as it would arrive from an untyped host boundary: the
/// bridge's input type, standing in for the source's dynamically-typed
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Int(i128),
    Bytes(Vec<u8>),
    String(String),
    Vec(Vec<NativeValue>),
    Map(Vec<(String, NativeValue)>),
    Address(ScAddress),
}

/// Default (no explicit type hint) conversion, per §4.9: integers route
/// through the narrowest-width rule in [`narrowest_width`], strings become
/// `Symbol`, byte vectors become `Bytes`.
pub fn to_scval(value: &NativeValue) -> Result<ScVal> {
    Ok(match value {
        NativeValue::Null => ScVal::Void,
        NativeValue::Bool(b) => ScVal::Bool(*b),
        NativeValue::Int(v) => int_to_scval(*v, None)?,
        NativeValue::Bytes(b) => ScVal::Bytes(b.clone().try_into().map_err(|_| {
            Error::RangeError("byte value exceeds the SCVal bytes cap".to_string())
        })?),
        NativeValue::String(s) => ScVal::symbol(s.clone())
            .map_err(|_| Error::RangeError("string exceeds the symbol length cap".to_string()))?,
        NativeValue::Vec(items) => {
            let scvals: Vec<ScVal> = items.iter().map(to_scval).collect::<Result<_>>()?;
            let capped: VecM<ScVal, SCVAL_VEC_MAX> = scvals
                .try_into()
                .map_err(|_| Error::RangeError("vec exceeds the SCVal vec cap".to_string()))?;
            ScVal::Vec(Some(capped))
        }
        NativeValue::Map(entries) => {
            let mut scentries = Vec::with_capacity(entries.len());
            for (key, val) in entries {
                scentries.push(xdr_primitives::scval::ScMapEntry {
                    key: ScVal::symbol(key.clone())
                        .map_err(|_| Error::RangeError("map key exceeds the symbol length cap".to_string()))?,
                    val: to_scval(val)?,
                });
            }
            let capped = scentries
                .try_into()
                .map_err(|_| Error::RangeError("map exceeds the SCVal map cap".to_string()))?;
            ScVal::Map(Some(capped))
        }
        NativeValue::Address(addr) => ScVal::Address(*addr),
    })
}

/// Converts an integer to its `ScVal` arm given an explicit width hint, or
/// the narrowest form that fits when `width` is `None`.
pub fn int_to_scval(v: i128, width: Option<ScIntWidth>) -> Result<ScVal> {
    let width = width.unwrap_or_else(|| narrowest_width(v));
    Ok(match width {
        ScIntWidth::U32 => ScVal::U32(u32::try_from(v).map_err(|_| range_error(v, "u32"))?),
        ScIntWidth::I32 => ScVal::I32(i32::try_from(v).map_err(|_| range_error(v, "i32"))?),
        ScIntWidth::U64 => ScVal::U64(u64::try_from(v).map_err(|_| range_error(v, "u64"))?),
        ScIntWidth::I64 => ScVal::I64(i64::try_from(v).map_err(|_| range_error(v, "i64"))?),
        ScIntWidth::U128 => ScVal::U128(UInt128Parts::from_u128(
            u128::try_from(v).map_err(|_| range_error(v, "u128"))?,
        )),
        ScIntWidth::I128 => ScVal::I128(Int128Parts::from_i128(v)),
        ScIntWidth::U256 | ScIntWidth::I256 => {
            return Err(range_error(v, "u256/i256 (value fits i128, use the 128-bit arm)"))
        }
    })
}

fn range_error(v: i128, width: &str) -> Error {
    Error::RangeError(format!("{v} does not fit in {width}"))
}

/// Inverse of [`to_scval`]: arm-name dispatch back to a [`NativeValue`].
/// `Map` keys are already strings on this side (unlike a dynamically-typed
/// host, there is no stringify-then-parse round trip needed).
pub fn from_scval(value: &ScVal) -> Result<NativeValue> {
    Ok(match value {
        ScVal::Void => NativeValue::Null,
        ScVal::Bool(b) => NativeValue::Bool(*b),
        ScVal::U32(v) => NativeValue::Int(*v as i128),
        ScVal::I32(v) => NativeValue::Int(*v as i128),
        ScVal::U64(v) => NativeValue::Int(*v as i128),
        ScVal::I64(v) => NativeValue::Int(*v as i128),
        ScVal::Timepoint(v) | ScVal::Duration(v) => NativeValue::Int(*v as i128),
        ScVal::U128(parts) => NativeValue::Int(parts.to_u128() as i128),
        ScVal::I128(parts) => NativeValue::Int(parts.to_i128()),
        ScVal::Bytes(b) => NativeValue::Bytes(b.to_vec()),
        ScVal::String(s) | ScVal::Symbol(s) => NativeValue::String(s.clone()),
        ScVal::Vec(items) => NativeValue::Vec(
            items
                .as_ref()
                .map(|v| v.iter().map(from_scval).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default(),
        ),
        ScVal::Map(entries) => NativeValue::Map(
            entries
                .as_ref()
                .map(|m| {
                    m.iter()
                        .map(|e| Ok((symbol_key(&e.key)?, from_scval(&e.val)?)))
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?
                .unwrap_or_default(),
        ),
        ScVal::Address(addr) => NativeValue::Address(*addr),
        ScVal::Error(code) => {
            return Err(Error::RangeError(format!("host returned error code {code}")))
        }
        ScVal::U256(_) | ScVal::I256(_) => {
            return Err(Error::RangeError(
                "u256/i256 values do not fit NativeValue::Int; decode the limbs directly".to_string(),
            ))
        }
    })
}

fn symbol_key(val: &ScVal) -> Result<String> {
    match val {
        ScVal::Symbol(s) => Ok(s.clone()),
        _ => Err(Error::RangeError("map keys must be symbols".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_maps_to_void() {
        assert_eq!(to_scval(&NativeValue::Null).unwrap(), ScVal::Void);
    }

    #[test]
    fn small_nonneg_int_maps_to_u32() {
        assert_eq!(to_scval(&NativeValue::Int(42)).unwrap(), ScVal::U32(42));
    }

    #[test]
    fn negative_int_maps_to_i32() {
        assert_eq!(to_scval(&NativeValue::Int(-1)).unwrap(), ScVal::I32(-1));
    }

    #[test]
    fn mid_range_int_maps_to_u64() {
        let v = (u32::MAX as i128) + 1;
        assert_eq!(to_scval(&NativeValue::Int(v)).unwrap(), ScVal::U64(v as u64));
    }

    #[test]
    fn large_int_maps_to_u128() {
        let v = (u64::MAX as i128) + 1;
        assert_eq!(to_scval(&NativeValue::Int(v)).unwrap(), ScVal::U128(UInt128Parts::from_u128(v as u128)));
    }

    #[test]
    fn string_round_trips_through_symbol() {
        let original = NativeValue::String("hello".to_string());
        let scval = to_scval(&original).unwrap();
        assert_eq!(from_scval(&scval).unwrap(), original);
    }

    #[test]
    fn nested_vec_round_trips() {
        let original = NativeValue::Vec(vec![NativeValue::Int(1), NativeValue::Bool(true)]);
        let scval = to_scval(&original).unwrap();
        assert_eq!(from_scval(&scval).unwrap(), original);
    }

    #[test]
    fn map_round_trips_with_symbol_keys() {
        let original = NativeValue::Map(vec![("a".to_string(), NativeValue::Int(1))]);
        let scval = to_scval(&original).unwrap();
        assert_eq!(from_scval(&scval).unwrap(), original);
    }
}
