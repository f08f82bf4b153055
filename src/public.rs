//! Public key line parsing.
//!
//! An `authorized_keys`-style line is whitespace-separated fields; leading
//! option fields (forced commands, `restrict`, …) are skipped until a
//! recognized type tag is found, the next field is the base64 blob, and
//! anything after it is comment.  The blob is validated against the
//! length-prefixed wire format before the provider constructs the key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::error::KeyError;
use crate::provider::{CryptoProvider, DecodeErrorKind};
use crate::types::{KeyAlgorithm, KeyObject};
use crate::wire::WireReader;

/// True for `ssh-rsa`, `ssh-dss`, `ssh-ed25519`, and
/// `ecdsa-sha2-nistp<digits>`.
pub fn is_key_type_tag(field: &str) -> bool {
    tag_algorithm(field).is_some()
}

/// Map a type tag onto the algorithm set.
pub fn tag_algorithm(field: &str) -> Option<KeyAlgorithm> {
    match field {
        "ssh-rsa" => Some(KeyAlgorithm::Rsa),
        "ssh-dss" => Some(KeyAlgorithm::Dsa),
        "ssh-ed25519" => Some(KeyAlgorithm::Ed25519),
        _ => field
            .strip_prefix("ecdsa-sha2-nistp")
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .map(|_| KeyAlgorithm::Ecdsa),
    }
}

/// Parses single public key lines through a [`CryptoProvider`].
pub struct PublicKeyParser<'a> {
    provider: &'a dyn CryptoProvider,
}

impl<'a> PublicKeyParser<'a> {
    pub fn new(provider: &'a dyn CryptoProvider) -> Self {
        Self { provider }
    }

    /// Parse one line.  `filename` is diagnostic context only.
    ///
    /// Single-pass, never retries.
    pub fn parse(&self, line: &str, filename: &str) -> Result<KeyObject, KeyError> {
        let mut fields = line.split_whitespace();
        let tag = fields
            .find(|field| is_key_type_tag(field))
            .ok_or_else(|| KeyError::NotAPublicKey(filename.to_string()))?;
        let blob64 = fields
            .next()
            .ok_or_else(|| KeyError::NotAPublicKey(filename.to_string()))?;

        let blob = STANDARD
            .decode(blob64)
            .map_err(|_| KeyError::NotAPublicKey(filename.to_string()))?;

        self.validate_blob(&blob, filename)?;

        debug!(filename = %filename, tag = %tag, blob_len = blob.len(), "decoding public key blob");

        self.provider.decode_public(&blob).map_err(|err| {
            match err.kind() {
                DecodeErrorKind::UnsupportedAlgorithm => {
                    KeyError::NotAPublicKey(filename.to_string())
                }
                _ => KeyError::MalformedWireData(filename.to_string()),
            }
        })
    }

    /// Structural wire check: a recognized algorithm tag string, then
    /// well-formed length-prefixed fields through to the exact end.
    fn validate_blob(&self, blob: &[u8], filename: &str) -> Result<(), KeyError> {
        let mut reader = WireReader::new(blob);
        let inner_tag = reader
            .read_str()
            .map_err(|_| KeyError::MalformedWireData(filename.to_string()))?;
        if tag_algorithm(inner_tag).is_none() {
            return Err(KeyError::NotAPublicKey(filename.to_string()));
        }
        while !reader.is_empty() {
            reader
                .read_bytes()
                .map_err(|_| KeyError::MalformedWireData(filename.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SshKeyProvider;
    use crate::wire::put_field;

    fn generated_line() -> String {
        let key = ssh_key::PrivateKey::random(&mut rand::thread_rng(), ssh_key::Algorithm::Ed25519)
            .unwrap();
        let mut public = key.public_key().clone();
        public.set_comment("user@host");
        public.to_openssh().unwrap()
    }

    #[test]
    fn recognizes_type_tags() {
        assert!(is_key_type_tag("ssh-rsa"));
        assert!(is_key_type_tag("ssh-dss"));
        assert!(is_key_type_tag("ssh-ed25519"));
        assert!(is_key_type_tag("ecdsa-sha2-nistp256"));
        assert!(is_key_type_tag("ecdsa-sha2-nistp521"));
        assert!(!is_key_type_tag("ecdsa-sha2-nistp"));
        assert!(!is_key_type_tag("ecdsa-sha2-nistpXYZ"));
        assert!(!is_key_type_tag("not-a-key"));
        assert!(!is_key_type_tag("restrict"));
    }

    #[test]
    fn parses_generated_key_line() {
        let provider = SshKeyProvider::new();
        let key = PublicKeyParser::new(&provider)
            .parse(&generated_line(), "authorized_keys")
            .unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);
        assert!(!key.is_private());
        assert!(key.fingerprint_sha256().is_some());
    }

    #[test]
    fn parses_ssh_rsa_line() {
        use rsa::pkcs1::EncodeRsaPrivateKey as _;

        let generated = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 512).unwrap();
        let pem = generated.to_pkcs1_pem(rsa::pkcs8::LineEnding::LF).unwrap();

        let provider = SshKeyProvider::new();
        let private = provider.decode_private(pem.as_bytes(), "unused").unwrap();
        let line = format!("{} user@host", private.public_openssh().unwrap().trim_end());

        let key = PublicKeyParser::new(&provider)
            .parse(&line, "authorized_keys")
            .unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Rsa);
        assert!(!key.is_private());
    }

    #[test]
    fn skips_leading_option_fields() {
        let line = format!("restrict,command=\"true\" {}", generated_line());
        let provider = SshKeyProvider::new();
        let key = PublicKeyParser::new(&provider)
            .parse(&line, "authorized_keys")
            .unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ed25519);
    }

    #[test]
    fn line_without_type_tag_is_not_a_public_key() {
        let provider = SshKeyProvider::new();
        let err = PublicKeyParser::new(&provider)
            .parse("not-a-key AAAA", "authorized_keys")
            .unwrap_err();
        assert!(matches!(err, KeyError::NotAPublicKey(_)));
    }

    #[test]
    fn tag_without_blob_is_not_a_public_key() {
        let provider = SshKeyProvider::new();
        let err = PublicKeyParser::new(&provider)
            .parse("ssh-rsa", "authorized_keys")
            .unwrap_err();
        assert!(matches!(err, KeyError::NotAPublicKey(_)));
    }

    #[test]
    fn corrupted_blob_fails() {
        let line = generated_line();
        let mut fields: Vec<&str> = line.split_whitespace().collect();
        // Clip the final base64 byte of the blob so a wire length no longer
        // matches the decoded size.
        let blob = fields[1];
        let clipped = &blob[..blob.len() - 4];
        fields[1] = clipped;
        let corrupted = fields.join(" ");

        let provider = SshKeyProvider::new();
        let err = PublicKeyParser::new(&provider)
            .parse(&corrupted, "authorized_keys")
            .unwrap_err();
        assert!(matches!(
            err,
            KeyError::MalformedWireData(_) | KeyError::NotAPublicKey(_)
        ));
    }

    #[test]
    fn blob_with_unrecognized_inner_tag_is_not_a_public_key() {
        let mut blob = Vec::new();
        put_field(&mut blob, b"ssh-frobnitz");
        put_field(&mut blob, b"\x01\x02\x03");
        let line = format!("ssh-rsa {}", STANDARD.encode(&blob));

        let provider = SshKeyProvider::new();
        let err = PublicKeyParser::new(&provider)
            .parse(&line, "authorized_keys")
            .unwrap_err();
        assert!(matches!(err, KeyError::NotAPublicKey(_)));
    }

    #[test]
    fn blob_with_trailing_garbage_is_malformed() {
        let line = generated_line();
        let blob64 = line.split_whitespace().nth(1).unwrap();
        let mut blob = STANDARD.decode(blob64).unwrap();
        blob.push(0xff);
        let line = format!("ssh-ed25519 {}", STANDARD.encode(&blob));

        let provider = SshKeyProvider::new();
        let err = PublicKeyParser::new(&provider)
            .parse(&line, "authorized_keys")
            .unwrap_err();
        assert!(matches!(err, KeyError::MalformedWireData(_)));
    }
}
