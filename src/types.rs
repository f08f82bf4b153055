//! Core key types: the closed algorithm tag set and the opaque key object
//! handed back to callers.

use ssh_key::{Algorithm, HashAlg};

/// Symbolic algorithm tags.
///
/// This is the full *nameable* set; the set actually available at runtime is
/// whatever the provider reports via
/// [`CryptoProvider::supports`](crate::provider::CryptoProvider::supports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyAlgorithm {
    Dh,
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
}

impl KeyAlgorithm {
    /// All nameable algorithms, in registry order.
    pub const ALL: [KeyAlgorithm; 5] = [
        KeyAlgorithm::Dh,
        KeyAlgorithm::Rsa,
        KeyAlgorithm::Dsa,
        KeyAlgorithm::Ecdsa,
        KeyAlgorithm::Ed25519,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyAlgorithm::Dh => "dh",
            KeyAlgorithm::Rsa => "rsa",
            KeyAlgorithm::Dsa => "dsa",
            KeyAlgorithm::Ecdsa => "ecdsa",
            KeyAlgorithm::Ed25519 => "ed25519",
        }
    }

    /// Parse a symbolic name (`"rsa"`, `"ed25519"`, …).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dh" => Some(KeyAlgorithm::Dh),
            "rsa" => Some(KeyAlgorithm::Rsa),
            "dsa" => Some(KeyAlgorithm::Dsa),
            "ecdsa" => Some(KeyAlgorithm::Ecdsa),
            "ed25519" => Some(KeyAlgorithm::Ed25519),
            _ => None,
        }
    }

    /// Map an `ssh_key` algorithm identifier onto our tag set.
    ///
    /// Returns `None` for algorithms we do not model (sk-* hardware keys,
    /// vendor extensions).
    pub(crate) fn from_ssh(algorithm: &Algorithm) -> Option<Self> {
        match algorithm {
            Algorithm::Rsa { .. } => Some(KeyAlgorithm::Rsa),
            Algorithm::Dsa => Some(KeyAlgorithm::Dsa),
            Algorithm::Ecdsa { .. } => Some(KeyAlgorithm::Ecdsa),
            Algorithm::Ed25519 => Some(KeyAlgorithm::Ed25519),
            _ => None,
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The key material behind a [`KeyObject`].
///
/// `Blank` is the registry's empty placeholder — an object of a known
/// algorithm with no material yet.
#[derive(Clone)]
pub(crate) enum KeyData {
    Private(Box<ssh_key::PrivateKey>),
    Public(Box<ssh_key::PublicKey>),
    Blank,
}

/// Opaque key object produced by a crypto provider.
///
/// Callers get the algorithm, privateness, and diagnostic serializations;
/// private key material is never exposed through `Debug`.
#[derive(Clone)]
pub struct KeyObject {
    algorithm: KeyAlgorithm,
    data: KeyData,
}

impl KeyObject {
    /// An empty key object of the given algorithm (registry construction).
    pub fn blank(algorithm: KeyAlgorithm) -> Self {
        Self {
            algorithm,
            data: KeyData::Blank,
        }
    }

    pub(crate) fn from_private(algorithm: KeyAlgorithm, key: ssh_key::PrivateKey) -> Self {
        Self {
            algorithm,
            data: KeyData::Private(Box::new(key)),
        }
    }

    pub(crate) fn from_public(algorithm: KeyAlgorithm, key: ssh_key::PublicKey) -> Self {
        Self {
            algorithm,
            data: KeyData::Public(Box::new(key)),
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn is_private(&self) -> bool {
        matches!(self.data, KeyData::Private(_))
    }

    /// True for registry-produced placeholders that carry no material.
    pub fn is_blank(&self) -> bool {
        matches!(self.data, KeyData::Blank)
    }

    /// The public half in OpenSSH `authorized_keys` form, if material exists.
    pub fn public_openssh(&self) -> Option<String> {
        match &self.data {
            KeyData::Private(key) => key.public_key().to_openssh().ok(),
            KeyData::Public(key) => key.to_openssh().ok(),
            KeyData::Blank => None,
        }
    }

    /// SHA-256 fingerprint string (e.g. `"SHA256:abc123…"`), if material
    /// exists.
    pub fn fingerprint_sha256(&self) -> Option<String> {
        match &self.data {
            KeyData::Private(key) => Some(key.fingerprint(HashAlg::Sha256).to_string()),
            KeyData::Public(key) => Some(key.fingerprint(HashAlg::Sha256).to_string()),
            KeyData::Blank => None,
        }
    }
}

impl std::fmt::Debug for KeyObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyObject")
            .field("algorithm", &self.algorithm)
            .field(
                "data",
                &match &self.data {
                    KeyData::Private(_) => "Private([redacted])",
                    KeyData::Public(_) => "Public(…)",
                    KeyData::Blank => "Blank",
                },
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip() {
        for alg in KeyAlgorithm::ALL {
            assert_eq!(KeyAlgorithm::from_name(alg.as_str()), Some(alg));
        }
        assert_eq!(KeyAlgorithm::from_name("foo"), None);
    }

    #[test]
    fn blank_key_has_no_material() {
        let key = KeyObject::blank(KeyAlgorithm::Rsa);
        assert!(key.is_blank());
        assert!(!key.is_private());
        assert_eq!(key.algorithm(), KeyAlgorithm::Rsa);
        assert!(key.public_openssh().is_none());
        assert!(key.fingerprint_sha256().is_none());
    }

    #[test]
    fn debug_redacts_private_material() {
        let mut rng = rand::thread_rng();
        let private =
            ssh_key::PrivateKey::random(&mut rng, ssh_key::Algorithm::Ed25519).unwrap();
        let openssh = private.to_openssh(ssh_key::LineEnding::LF).unwrap();
        let key = KeyObject::from_private(KeyAlgorithm::Ed25519, private);
        let debug = format!("{key:?}");
        assert!(debug.contains("redacted"));
        // None of the armored body may leak into Debug output.
        for line in openssh.lines().skip(1).take(1) {
            assert!(!debug.contains(line));
        }
    }
}
