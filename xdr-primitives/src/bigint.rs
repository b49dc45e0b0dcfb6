//! 128/256-bit integer ↔ split-limb conversion laws (C5).
//!
//! The wire carries these as tuples of 64-bit limbs: `U128 = (hi: u64, lo:
//! u64)`, `I128 = (hi: i64, lo: u64)`, and the 256-bit forms extend with
//! `hiHi/hiLo/loHi/loLo`. The high limb is signed for the `I*` forms and
//! unsigned everywhere else — this workspace standardizes on that
//! convention throughout, including for the low limbs of `I128`/`I256`.

use xdr_codec::{xdr_struct, Codec, Reader, Writer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UInt128Parts {
    pub hi: u64,
    pub lo: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int128Parts {
    pub hi: i64,
    pub lo: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UInt256Parts {
    pub hi_hi: u64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int256Parts {
    pub hi_hi: i64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

xdr_struct!(UInt128Parts { hi: u64, lo: u64 });
xdr_struct!(Int128Parts { hi: i64, lo: u64 });
xdr_struct!(UInt256Parts {
    hi_hi: u64,
    hi_lo: u64,
    lo_hi: u64,
    lo_lo: u64,
});
xdr_struct!(Int256Parts {
    hi_hi: i64,
    hi_lo: u64,
    lo_hi: u64,
    lo_lo: u64,
});

impl UInt128Parts {
    pub fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    pub fn from_u128(v: u128) -> Self {
        UInt128Parts {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

impl Int128Parts {
    pub fn to_i128(self) -> i128 {
        ((self.hi as i128) << 64) | self.lo as i128
    }

    pub fn from_i128(v: i128) -> Self {
        Int128Parts {
            hi: (v >> 64) as i64,
            lo: v as u64,
        }
    }
}

impl UInt256Parts {
    pub fn to_u256_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[0..8].copy_from_slice(&self.hi_hi.to_be_bytes());
        out[8..16].copy_from_slice(&self.hi_lo.to_be_bytes());
        out[16..24].copy_from_slice(&self.lo_hi.to_be_bytes());
        out[24..32].copy_from_slice(&self.lo_lo.to_be_bytes());
        out
    }

    pub fn from_u256_be_bytes(bytes: [u8; 32]) -> Self {
        UInt256Parts {
            hi_hi: u64::from_be_bytes(bytes[0..8].try_into().unwrap()),
            hi_lo: u64::from_be_bytes(bytes[8..16].try_into().unwrap()),
            lo_hi: u64::from_be_bytes(bytes[16..24].try_into().unwrap()),
            lo_lo: u64::from_be_bytes(bytes[24..32].try_into().unwrap()),
        }
    }
}

impl Int256Parts {
    /// Two's-complement big-endian bytes; `hi_hi`'s sign bit carries the
    /// sign of the whole value.
    pub fn to_i256_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[0..8].copy_from_slice(&self.hi_hi.to_be_bytes());
        out[8..16].copy_from_slice(&self.hi_lo.to_be_bytes());
        out[16..24].copy_from_slice(&self.lo_hi.to_be_bytes());
        out[24..32].copy_from_slice(&self.lo_lo.to_be_bytes());
        out
    }

    pub fn is_negative(&self) -> bool {
        self.hi_hi < 0
    }
}

/// Width selection per §4.5: widen to the narrowest form that holds the
/// value, signed branch for negatives, unsigned otherwise. An integer
/// literal defaults to `U32`/`I32` (the native integer's own size) before
/// ever widening to the 64-, 128-, or 256-bit forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScIntWidth {
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    U256,
    I256,
}

pub fn narrowest_width(v: i128) -> ScIntWidth {
    if v >= 0 {
        if v <= u32::MAX as i128 {
            ScIntWidth::U32
        } else if v <= u64::MAX as i128 {
            ScIntWidth::U64
        } else {
            ScIntWidth::U128
        }
    } else if v >= i32::MIN as i128 {
        ScIntWidth::I32
    } else if v >= i64::MIN as i128 {
        ScIntWidth::I64
    } else {
        ScIntWidth::I128
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn u128_round_trips(hi: u64, lo: u64) -> bool {
        let parts = UInt128Parts { hi, lo };
        UInt128Parts::from_u128(parts.to_u128()) == parts
    }

    #[test]
    fn i128_all_ones_low_and_minus_one_high_is_minus_one() {
        let parts = Int128Parts { hi: -1, lo: u64::MAX };
        assert_eq!(parts.to_i128(), -1);
    }

    #[quickcheck]
    fn i128_round_trips_full_range(hi: i64, lo: u64) -> bool {
        let parts = Int128Parts { hi, lo };
        Int128Parts::from_i128(parts.to_i128()) == parts
    }

    #[test]
    fn i128_round_trips_bounds() {
        for v in [i128::MIN, -1, 0, 1, i128::MAX] {
            assert_eq!(Int128Parts::from_i128(v).to_i128(), v);
        }
    }

    #[test]
    fn codec_round_trips() {
        let parts = UInt128Parts { hi: 1, lo: 0 };
        let bytes = parts.to_bytes().unwrap();
        assert_eq!(UInt128Parts::from_bytes(&bytes).unwrap(), parts);
    }

    #[test]
    fn narrowest_width_selects_u32_for_small_nonneg() {
        assert_eq!(narrowest_width(42), ScIntWidth::U32);
        assert_eq!(narrowest_width(-1), ScIntWidth::I32);
    }

    #[test]
    fn narrowest_width_widens_past_32_bits() {
        assert_eq!(narrowest_width(1i128 << 32), ScIntWidth::U64);
        assert_eq!(narrowest_width(-(1i128 << 32)), ScIntWidth::I64);
        assert_eq!(narrowest_width(1i128 << 64), ScIntWidth::U128);
    }
}
