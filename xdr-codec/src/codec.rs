use crate::error::{Result, XdrError};
use crate::io::{Reader, Writer};

/// A codec for a wire type `T`: `{encode, decode, to_base64, from_base64}`
/// with `decode(encode(x)) = x` for every `x` in the domain. The frame-level
/// methods (`to_bytes`/`from_bytes`) are provided once here; concrete types
/// only implement `encode`/`decode`.
pub trait Codec: Sized {
    fn encode(&self, w: &mut Writer) -> Result<()>;
    fn decode(r: &mut Reader) -> Result<Self>;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut w = Writer::new();
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = Reader::new(bytes);
        let v = Self::decode(&mut r)?;
        r.ensure_end()?;
        Ok(v)
    }

    fn to_base64(&self) -> Result<String> {
        Ok(crate::base64::to_base64(&self.to_bytes()?))
    }

    fn from_base64(s: &str) -> Result<Self> {
        let bytes = crate::base64::from_base64(s)?;
        Self::from_bytes(&bytes)
    }
}

macro_rules! impl_codec_for_int {
    ($t:ty, $write:ident, $read:ident) => {
        impl Codec for $t {
            fn encode(&self, w: &mut Writer) -> Result<()> {
                w.$write(*self)
            }
            fn decode(r: &mut Reader) -> Result<Self> {
                r.$read()
            }
        }
    };
}

impl_codec_for_int!(i32, write_i32, read_i32);
impl_codec_for_int!(u32, write_u32, read_u32);
impl_codec_for_int!(i64, write_i64, read_i64);
impl_codec_for_int!(u64, write_u64, read_u64);
impl_codec_for_int!(f32, write_f32, read_f32);
impl_codec_for_int!(f64, write_f64, read_f64);

impl Codec for bool {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_bool(*self)
    }
    fn decode(r: &mut Reader) -> Result<Self> {
        r.read_bool()
    }
}

/// `void`: zero bytes.
impl Codec for () {
    fn encode(&self, _w: &mut Writer) -> Result<()> {
        Ok(())
    }
    fn decode(_r: &mut Reader) -> Result<Self> {
        Ok(())
    }
}

/// `option(inner)`: a `bool` presence flag followed by the value if present.
impl<T: Codec> Codec for Option<T> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        match self {
            Some(v) => {
                w.write_bool(true)?;
                v.encode(w)
            }
            None => w.write_bool(false),
        }
    }

    fn decode(r: &mut Reader) -> Result<Self> {
        if r.read_bool()? {
            Ok(Some(T::decode(r)?))
        } else {
            Ok(None)
        }
    }
}

/// Recursive/lazy references: boxing is enough in Rust to break the
/// otherwise-infinite size of a self-referential type, so `Box<T>` doubles
/// as the lazy-codec combinator for grammar cycles (e.g. `ScVal` containing
/// `ScVal` through `Vec`/`Map`).
impl<T: Codec> Codec for Box<T> {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        (**self).encode(w)
    }
    fn decode(r: &mut Reader) -> Result<Self> {
        Ok(Box::new(T::decode(r)?))
    }
}

/// `fixedArray(n, inner)`: no length prefix, exactly `N` elements.
impl<T: Codec, const N: usize> Codec for [T; N] {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        let _guard = w.enter_composite()?;
        for item in self {
            item.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut Reader) -> Result<Self> {
        let _guard = r.enter_composite()?;
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(r)?);
        }
        items
            .try_into()
            .map_err(|_| XdrError::InvalidValue)
    }
}

/// String: variable opaque interpreted as UTF-8, unbounded length.
/// Use [`crate::utils::StringM`] where the schema declares a size cap.
impl Codec for String {
    fn encode(&self, w: &mut Writer) -> Result<()> {
        w.write_string(self, None)
    }
    fn decode(r: &mut Reader) -> Result<Self> {
        r.read_string(None)
    }
}

/// `enumOf(members)`: encode the member's `i32`; unknown discriminants fail
/// decode with [`XdrError::InvalidEnumValue`].
#[macro_export]
macro_rules! xdr_enum {
    ($name:ident { $($variant:ident = $disc:expr),+ $(,)? }) => {
        impl $crate::Codec for $name {
            fn encode(&self, w: &mut $crate::Writer) -> $crate::error::Result<()> {
                let d: i32 = match self {
                    $( $name::$variant => $disc, )+
                };
                w.write_i32(d)
            }

            fn decode(r: &mut $crate::Reader) -> $crate::error::Result<Self> {
                let d = r.read_i32()?;
                match d {
                    $( $disc => Ok($name::$variant), )+
                    other => Err($crate::error::XdrError::InvalidEnumValue(other)),
                }
            }
        }
    };
}

/// `struct(fields[])`: encode/decode fields in declaration order. The field
/// list is repeated here (rather than attached to the struct definition)
/// since this workspace hand-writes schema codecs instead of deriving them.
#[macro_export]
macro_rules! xdr_struct {
    ($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        impl $crate::Codec for $name {
            fn encode(&self, w: &mut $crate::Writer) -> $crate::error::Result<()> {
                let _guard = w.enter_composite()?;
                $( $crate::Codec::encode(&self.$field, w)?; )+
                Ok(())
            }

            fn decode(r: &mut $crate::Reader) -> $crate::error::Result<Self> {
                let _guard = r.enter_composite()?;
                $( let $field = <$ty as $crate::Codec>::decode(r)?; )+
                Ok(Self { $( $field ),+ })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_round_trip() {
        for v in [i32::MIN, -1, 0, 1, i32::MAX] {
            assert_eq!(i32::from_bytes(&v.to_bytes().unwrap()).unwrap(), v);
        }
    }

    #[test]
    fn option_round_trips_both_states() {
        assert_eq!(Option::<i32>::from_bytes(&None::<i32>.to_bytes().unwrap()).unwrap(), None);
        assert_eq!(Option::<i32>::from_bytes(&Some(7i32).to_bytes().unwrap()).unwrap(), Some(7));
    }

    #[test]
    fn fixed_array_has_no_length_prefix() {
        let arr = [1i32, 2, 3];
        let bytes = arr.to_bytes().unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(<[i32; 3]>::from_bytes(&bytes).unwrap(), arr);
    }

    #[test]
    fn string_round_trips_and_rejects_bad_utf8() {
        let s = "hello world".to_string();
        let bytes = s.to_bytes().unwrap();
        assert_eq!(String::from_bytes(&bytes).unwrap(), s);

        let mut w = Writer::new();
        w.write_var_opaque(&[0xff, 0xfe], None).unwrap();
        let bad = w.into_bytes();
        assert_eq!(String::from_bytes(&bad), Err(XdrError::Utf8Error));
    }

    xdr_enum!(Flavor {
        A = 0,
        B = 1,
    });

    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    enum Flavor {
        A,
        B,
    }

    #[test]
    fn xdr_enum_macro_round_trips_and_rejects_unknown() {
        assert_eq!(Flavor::from_bytes(&Flavor::A.to_bytes().unwrap()).unwrap(), Flavor::A);
        assert_eq!(Flavor::from_bytes(&Flavor::B.to_bytes().unwrap()).unwrap(), Flavor::B);
        let bytes = 2i32.to_bytes().unwrap();
        assert_eq!(Flavor::from_bytes(&bytes), Err(XdrError::InvalidEnumValue(2)));
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Pair {
        a: i32,
        b: u32,
    }

    xdr_struct!(Pair { a: i32, b: u32 });

    #[test]
    fn xdr_struct_macro_round_trips_in_field_order() {
        let p = Pair { a: -5, b: 9 };
        let bytes = p.to_bytes().unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(Pair::from_bytes(&bytes).unwrap(), p);
    }
}
