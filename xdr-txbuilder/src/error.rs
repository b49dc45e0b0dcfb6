use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Xdr(#[from] xdr_codec::XdrError),

    #[error(transparent)]
    Strkey(#[from] xdr_strkey::Error),

    #[error("{0} is outside the representable range for the requested width")]
    RangeError(String),

    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    #[error("builder error: {0}")]
    BuilderState(String),
}

pub type Result<T> = std::result::Result<T, Error>;
