//! Thin file-reading wrappers around the loaders.
//!
//! The only I/O in this crate: read the file, hand the bytes to the
//! in-memory loader.  Handles are scoped to the call and released on every
//! exit path.

use std::path::Path;

use tracing::debug;

use crate::error::KeyError;
use crate::private::PrivateKeyLoader;
use crate::prompt::Prompter;
use crate::provider::CryptoProvider;
use crate::public::PublicKeyParser;
use crate::types::KeyObject;

/// Read a key file's raw bytes, mapping failures to [`KeyError::Io`].
pub fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    std::fs::read(path).map_err(|source| KeyError::Io {
        filename: path.display().to_string(),
        source,
    })
}

/// Load a private key from `path`.
pub fn load_private_key_file(
    provider: &dyn CryptoProvider,
    path: &Path,
    passphrase: Option<&str>,
    prompter: Option<&dyn Prompter>,
) -> Result<KeyObject, KeyError> {
    let bytes = read_key_file(path)?;
    let loader = PrivateKeyLoader::new(provider);
    let material = loader.classify(bytes, path.display().to_string());
    loader.load(&material, passphrase, prompter)
}

/// Load a public key from `path`: the first non-empty, non-comment line is
/// parsed as an `authorized_keys`-style entry.
pub fn load_public_key_file(
    provider: &dyn CryptoProvider,
    path: &Path,
) -> Result<KeyObject, KeyError> {
    let filename = path.display().to_string();
    let bytes = read_key_file(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .ok_or_else(|| KeyError::NotAPublicKey(filename.clone()))?;
    debug!(filename = %filename, "parsing public key file");
    PublicKeyParser::new(provider).parse(line, &filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SshKeyProvider;
    use crate::types::KeyAlgorithm;

    #[test]
    fn missing_file_is_an_io_failure() {
        let err = read_key_file(Path::new("/nonexistent/id_rsa")).unwrap_err();
        match err {
            KeyError::Io { filename, .. } => assert_eq!(filename, "/nonexistent/id_rsa"),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn public_key_file_round_trip() {
        let key = ssh_key::PrivateKey::random(&mut rand::thread_rng(), ssh_key::Algorithm::Ed25519)
            .unwrap();
        let line = key.public_key().to_openssh().unwrap();

        let dir = std::env::temp_dir().join(format!("keyload-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("id_ed25519.pub");
        std::fs::write(&path, format!("# a comment\n\n{line}\n")).unwrap();

        let provider = SshKeyProvider::new();
        let loaded = load_public_key_file(&provider, &path).unwrap();
        assert_eq!(loaded.algorithm(), KeyAlgorithm::Ed25519);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn private_key_file_round_trip() {
        let key = ssh_key::PrivateKey::random(&mut rand::thread_rng(), ssh_key::Algorithm::Ed25519)
            .unwrap();
        let pem = key.to_openssh(ssh_key::LineEnding::LF).unwrap();

        let dir = std::env::temp_dir().join(format!("keyload-test-priv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("id_ed25519");
        std::fs::write(&path, pem.as_bytes()).unwrap();

        let provider = SshKeyProvider::new();
        let loaded = load_private_key_file(&provider, &path, None, None).unwrap();
        assert!(loaded.is_private());
        assert_eq!(loaded.algorithm(), KeyAlgorithm::Ed25519);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
