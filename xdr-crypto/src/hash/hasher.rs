use crate::hash::Hash;
use cryptoxide::digest::Digest as _;
use cryptoxide::sha2::Sha256;
use xdr_codec::Codec;

/// handy method to create a hash of given `BITS` bit size.
///
/// The hash algorithm is SHA-256; the only size this workspace needs is
/// `256`, but the const parameter is kept so the digest type stays
/// `Hash<{BITS/8}>`-shaped like the rest of the codec layer.
///
/// ```
/// # use xdr_crypto::hash::Hasher;
///
/// let mut hasher = Hasher::<256>::new();
/// hasher.input(b"Test SDF Network ; September 2015");
/// let digest = hasher.finalize();
/// assert_eq!(digest.as_ref().len(), 32);
/// ```
pub struct Hasher<const BITS: usize>(Sha256);

impl<const BITS: usize> Hasher<BITS> {
    /// update the [`Hasher`] with the given inputs
    #[inline]
    pub fn input(&mut self, bytes: &[u8]) {
        self.0.input(bytes);
    }
}

macro_rules! common_hasher {
    ($size:literal) => {
        impl Hasher<$size> {
            /// create a new [`Hasher`]
            #[inline]
            pub fn new() -> Self {
                Self(Sha256::new())
            }

            /// convenient function to directly generate the hash of the
            /// given bytes without creating the intermediary [`Hasher`] and
            /// calling [`Hasher::input`].
            #[inline]
            pub fn hash(bytes: &[u8]) -> Hash<{ $size / 8 }> {
                let mut hasher = Self::new();
                hasher.input(bytes);
                hasher.finalize()
            }

            #[inline]
            pub fn hash_tagged(bytes: &[u8], tag: u8) -> Hash<{ $size / 8 }> {
                let mut hasher = Self::new();
                hasher.input(&[tag]);
                hasher.input(bytes);
                hasher.finalize()
            }

            /// convenient function to directly generate the hash of the
            /// given [`xdr_codec::Codec`] data object's encoded form.
            #[inline]
            pub fn hash_xdr(data: &impl Codec) -> xdr_codec::Result<Hash<{ $size / 8 }>> {
                let bytes = data.to_bytes()?;
                Ok(Self::hash(&bytes))
            }

            /// consume the [`Hasher`] and return the computed digest
            pub fn finalize(mut self) -> Hash<{ $size / 8 }> {
                let mut hash = [0; $size / 8];
                self.0.result(&mut hash);
                Hash::new(hash)
            }
        }

        impl Default for Hasher<$size> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

common_hasher!(256);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_passphrase_to_network_id() {
        // The well-known testnet passphrase; used throughout this
        // workspace's transaction-hash tests as the network id seed.
        let digest = Hasher::<256>::hash(b"Test SDF Network ; September 2015");
        assert_eq!(digest.as_ref().len(), 32);
    }

    #[test]
    fn tagged_hash_differs_from_untagged() {
        let a = Hasher::<256>::hash(b"same bytes");
        let b = Hasher::<256>::hash_tagged(b"same bytes", 7);
        assert_ne!(a, b);
    }
}
