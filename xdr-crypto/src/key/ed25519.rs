//! Ed25519 asymmetric keys and signatures.
//!
//! Keys are 32-byte seeds; public keys are derived from a seed by point
//! expansion. Signing and verification are synchronous, matching the
//! cooperative, non-yielding model of the rest of this workspace.

use crate::memsec::Scrubbed as _;
use cryptoxide::ed25519::{self, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use rand_core::{CryptoRng, RngCore};
use std::{convert::TryFrom, fmt, str::FromStr};
use thiserror::Error;

/// Ed25519 secret key, i.e. a 32-byte seed.
#[derive(Clone)]
pub struct SecretKey([u8; Self::SIZE]);

/// Ed25519 public key, derived from a [`SecretKey`] by point expansion.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; Self::SIZE]);

/// Ed25519 signature, produced by a [`SecretKey`] and checked against the
/// corresponding [`PublicKey`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; Self::SIZE]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TryFromPublicKeyError {
    #[error("invalid size, expecting {}", PublicKey::SIZE)]
    InvalidSize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TryFromSignatureError {
    #[error("invalid size, expecting {}", Signature::SIZE)]
    InvalidSize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TryFromSecretKeyError {
    #[error("invalid size, expecting {}", SecretKey::SIZE)]
    InvalidSize,
}

macro_rules! impl_size_zero {
    ($Type:ty, $Size:expr) => {
        impl $Type {
            /// This is the size of the type in bytes.
            pub const SIZE: usize = $Size;

            #[inline]
            fn zero() -> Self {
                Self([0; Self::SIZE])
            }
        }
    };
}

impl_size_zero!(SecretKey, PRIVATE_KEY_LENGTH);
impl_size_zero!(PublicKey, PUBLIC_KEY_LENGTH);
impl_size_zero!(Signature, SIGNATURE_LENGTH);

impl SecretKey {
    /// generate a new [`SecretKey`] with the given random number generator
    pub fn new<Rng>(mut rng: Rng) -> Self
    where
        Rng: RngCore + CryptoRng,
    {
        let mut s = Self::zero();
        rng.fill_bytes(&mut s.0);
        s
    }

    /// get the [`PublicKey`] associated to this key
    pub fn public_key(&self) -> PublicKey {
        let (mut sk, pk) = ed25519::keypair(&self.0);

        // `sk` is a private component derived for this call only; scrub it
        // before it goes out of scope.
        sk.scrub();

        PublicKey(pk)
    }

    /// create a [`Signature`] for the given message with this [`SecretKey`]
    pub fn sign<T>(&self, msg: T) -> Signature
    where
        T: AsRef<[u8]>,
    {
        let (mut sk, _) = ed25519::keypair(&self.0);

        let signature = ed25519::signature(msg.as_ref(), &sk);

        sk.scrub();

        Signature(signature)
    }

    /// convert the [`SecretKey`] into its raw byte composition.
    ///
    /// This is an associated function (not a method) so that every call
    /// site must spell out `SecretKey::leak_into_bytes(key)`, making the
    /// loss of the opaque `Debug`/scrub-on-drop protections explicit.
    ///
    /// # Safety
    ///
    /// Leaking the bytes removes the zeroize-on-drop guarantee; callers must
    /// not let the returned array outlive its need or log it.
    #[inline]
    pub unsafe fn leak_into_bytes(Self(bytes): Self) -> [u8; Self::SIZE] {
        bytes
    }
}

impl PublicKey {
    /// verify the cryptographic [`Signature`] against the `message` and the
    /// [`PublicKey`] `self`.
    #[inline]
    pub fn verify<T>(&self, message: T, signature: &Signature) -> bool
    where
        T: AsRef<[u8]>,
    {
        ed25519::verify(message.as_ref(), &self.0, &signature.0)
    }

    /// The 4-byte signature hint: the last four bytes of the public key,
    /// used to disambiguate which signer a decorated signature belongs to
    /// in a multi-signature envelope.
    pub fn hint(&self) -> [u8; 4] {
        let mut h = [0u8; 4];
        h.copy_from_slice(&self.0[Self::SIZE - 4..]);
        h
    }
}

/* Drop ******************************************************************** */

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.scrub()
    }
}

/* Format ****************************************************************** */

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.as_ref()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.as_ref()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature<Ed25519>")
            .field(&hex::encode(self.as_ref()))
            .finish()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey<Ed25519>")
            .field(&hex::encode(self.as_ref()))
            .finish()
    }
}

/// conveniently provide a proper implementation to debug for the SecretKey
/// when only *testing* the library
#[cfg(test)]
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey<Ed25519>")
            .field(&hex::encode(self.0))
            .finish()
    }
}

/// incomplete Debug for the SecretKey outside of tests, so logs never carry
/// seed material.
#[cfg(not(test))]
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey<Ed25519>").finish_non_exhaustive()
    }
}

/* AsRef ******************************************************************* */

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/* Conversion ************************************************************** */

impl<'a> From<&'a Signature> for String {
    fn from(s: &'a Signature) -> Self {
        s.to_string()
    }
}

impl From<Signature> for String {
    fn from(s: Signature) -> Self {
        s.to_string()
    }
}

impl From<[u8; Self::SIZE]> for PublicKey {
    fn from(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<PublicKey> for [u8; PublicKey::SIZE] {
    fn from(pk: PublicKey) -> Self {
        pk.0
    }
}

impl From<[u8; Self::SIZE]> for Signature {
    fn from(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; Self::SIZE]> for SecretKey {
    fn from(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }
}

impl<'a> TryFrom<&'a [u8]> for PublicKey {
    type Error = TryFromPublicKeyError;
    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            Err(Self::Error::InvalidSize)
        } else {
            let mut s = Self::zero();
            s.0.copy_from_slice(value);
            Ok(s)
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for Signature {
    type Error = TryFromSignatureError;
    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            Err(Self::Error::InvalidSize)
        } else {
            let mut s = Self::zero();
            s.0.copy_from_slice(value);
            Ok(s)
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for SecretKey {
    type Error = TryFromSecretKeyError;
    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            Err(Self::Error::InvalidSize)
        } else {
            let mut s = Self::zero();
            s.0.copy_from_slice(value);
            Ok(s)
        }
    }
}

impl FromStr for PublicKey {
    type Err = hex::FromHexError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut r = Self::zero();
        hex::decode_to_slice(s, &mut r.0)?;
        Ok(r)
    }
}

impl FromStr for Signature {
    type Err = hex::FromHexError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut r = Self::zero();
        hex::decode_to_slice(s, &mut r.0)?;
        Ok(r)
    }
}

impl<'a> TryFrom<&'a str> for Signature {
    type Error = <Self as FromStr>::Err;
    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, TestResult};
    use quickcheck_macros::quickcheck;

    impl Arbitrary for SecretKey {
        fn arbitrary(g: &mut Gen) -> Self {
            let mut bytes = [0u8; SecretKey::SIZE];
            for b in bytes.iter_mut() {
                *b = u8::arbitrary(g);
            }
            SecretKey(bytes)
        }
    }

    #[quickcheck]
    fn sign_and_verify(sk: SecretKey, message: Vec<u8>) -> bool {
        let pk = sk.public_key();
        let signature = sk.sign(&message);
        pk.verify(&message, &signature)
    }

    #[quickcheck]
    fn verify_random_signature_does_not_work(
        sk: SecretKey,
        message: Vec<u8>,
        garbage: Signature,
    ) -> TestResult {
        if message.is_empty() {
            return TestResult::discard();
        }
        let pk = sk.public_key();
        TestResult::from_bool(!pk.verify(&message, &garbage))
    }

    impl Arbitrary for Signature {
        fn arbitrary(g: &mut Gen) -> Self {
            let mut bytes = [0u8; Signature::SIZE];
            for b in bytes.iter_mut() {
                *b = u8::arbitrary(g);
            }
            Signature(bytes)
        }
    }

    #[test]
    fn hint_is_last_four_bytes_of_public_key() {
        let mut bytes = [0u8; PublicKey::SIZE];
        bytes[28..].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let pk = PublicKey::from(bytes);
        assert_eq!(pk.hint(), [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn public_key_hex_round_trips() {
        let sk = SecretKey::from([7u8; SecretKey::SIZE]);
        let pk = sk.public_key();
        let s = pk.to_string();
        let parsed: PublicKey = s.parse().unwrap();
        assert_eq!(parsed, pk);
    }
}
