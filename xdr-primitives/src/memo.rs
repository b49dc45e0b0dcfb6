//! `Memo`: an optional tag attached to a transaction.

use xdr_codec::{error::XdrError, utils::FixedOpaque, xdr_enum, Codec, Reader, Writer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoType {
    None,
    Text,
    Id,
    Hash,
    Return,
}

xdr_enum!(MemoType {
    None = 0,
    Text = 1,
    Id = 2,
    Hash = 3,
    Return = 4,
});

/// Memo text is capped at 28 bytes, not 28 characters: a multi-byte UTF-8
/// string can hit the cap well before 28 codepoints.
pub const MEMO_TEXT_MAX_BYTES: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memo {
    None,
    Text(String),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

impl Codec for Memo {
    fn encode(&self, w: &mut Writer) -> xdr_codec::Result<()> {
        let _guard = w.enter_composite()?;
        match self {
            Memo::None => MemoType::None.encode(w),
            Memo::Text(s) => {
                MemoType::Text.encode(w)?;
                w.write_string(s, Some(MEMO_TEXT_MAX_BYTES))
            }
            Memo::Id(id) => {
                MemoType::Id.encode(w)?;
                id.encode(w)
            }
            Memo::Hash(h) => {
                MemoType::Hash.encode(w)?;
                FixedOpaque::from(*h).encode(w)
            }
            Memo::Return(h) => {
                MemoType::Return.encode(w)?;
                FixedOpaque::from(*h).encode(w)
            }
        }
    }

    fn decode(r: &mut Reader) -> xdr_codec::Result<Self> {
        let _guard = r.enter_composite()?;
        match MemoType::decode(r)? {
            MemoType::None => Ok(Memo::None),
            MemoType::Text => Ok(Memo::Text(r.read_string(Some(MEMO_TEXT_MAX_BYTES))?)),
            MemoType::Id => Ok(Memo::Id(u64::decode(r)?)),
            MemoType::Hash => Ok(Memo::Hash(*FixedOpaque::<32>::decode(r)?)),
            MemoType::Return => Ok(Memo::Return(*FixedOpaque::<32>::decode(r)?)),
        }
    }
}

impl Memo {
    pub fn text(s: impl Into<String>) -> Result<Self, XdrError> {
        let s = s.into();
        if s.len() > MEMO_TEXT_MAX_BYTES {
            return Err(XdrError::LengthExceedsMax {
                len: s.len(),
                max: MEMO_TEXT_MAX_BYTES,
            });
        }
        Ok(Memo::Text(s))
    }
}
