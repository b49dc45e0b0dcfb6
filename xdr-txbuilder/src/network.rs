//! Network configuration: the passphrase every hash and signature is
//! domain-separated by.

use xdr_crypto::Hasher;

/// The well-known test network passphrase, handy for examples and tests.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
/// The production network passphrase.
pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub passphrase: String,
}

impl NetworkConfig {
    pub fn new(passphrase: impl Into<String>) -> Self {
        NetworkConfig {
            passphrase: passphrase.into(),
        }
    }

    pub fn testnet() -> Self {
        NetworkConfig::new(TESTNET_PASSPHRASE)
    }

    pub fn public() -> Self {
        NetworkConfig::new(PUBLIC_PASSPHRASE)
    }

    /// `network_id = sha256(passphrase)`, the value every hash pre-image in
    /// this crate is keyed on.
    pub fn network_id(&self) -> [u8; 32] {
        *Hasher::<256>::hash(self.passphrase.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn different_passphrases_give_different_network_ids() {
        assert_ne!(NetworkConfig::testnet().network_id(), NetworkConfig::public().network_id());
    }

    #[test]
    fn network_id_is_deterministic() {
        let a = NetworkConfig::testnet().network_id();
        let b = NetworkConfig::testnet().network_id();
        assert_eq!(a, b);
    }
}
