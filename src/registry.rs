//! Algorithm name registry.
//!
//! Built once from a capability query against the provider; the available
//! set is fixed for the registry's lifetime rather than re-probed per call.

use tracing::debug;

use crate::error::KeyError;
use crate::provider::CryptoProvider;
use crate::types::{KeyAlgorithm, KeyObject};

/// Maps symbolic algorithm names to blank key objects, filtered by what the
/// provider supports at runtime.
pub struct KeyTypeRegistry<'a> {
    provider: &'a dyn CryptoProvider,
    available: Vec<KeyAlgorithm>,
}

impl<'a> KeyTypeRegistry<'a> {
    pub fn new(provider: &'a dyn CryptoProvider) -> Self {
        let available: Vec<KeyAlgorithm> = KeyAlgorithm::ALL
            .into_iter()
            .filter(|alg| provider.supports(*alg))
            .collect();
        debug!(?available, "key type registry built");
        Self {
            provider,
            available,
        }
    }

    /// Algorithms available through this registry, in registry order.
    pub fn available(&self) -> &[KeyAlgorithm] {
        &self.available
    }

    pub fn contains(&self, algorithm: KeyAlgorithm) -> bool {
        self.available.contains(&algorithm)
    }

    /// Construct a new, empty key object for `name`.
    ///
    /// Fails with [`KeyError::UnsupportedKeyType`] for unknown names and for
    /// algorithms absent from the capability set.
    pub fn get(&self, name: &str) -> Result<KeyObject, KeyError> {
        let algorithm = KeyAlgorithm::from_name(name)
            .filter(|alg| self.contains(*alg))
            .ok_or_else(|| KeyError::UnsupportedKeyType(name.to_string()))?;
        self.provider
            .new_blank_key(algorithm)
            .ok_or_else(|| KeyError::UnsupportedKeyType(name.to_string()))
    }
}
