//! SHA-256, Ed25519, and CRC16-XModem: the synchronous cryptographic
//! primitives the transaction envelope layer signs and hashes with. No
//! async surface; every operation returns its result or fails.

pub mod crc16;
pub mod hash;
pub mod key;
pub mod memsec;

pub use crc16::crc16_xmodem;
pub use hash::{Hash, Hasher};
pub use key::ed25519::{PublicKey, SecretKey, Signature};
