//! Error taxonomy for key loading.
//!
//! Detection failures (`UnsupportedKeyType`, `NotAPrivateKey`,
//! `NotAPublicKey`, `MalformedWireData`) surface immediately and are never
//! retried.  Decryption failures are retried only by the private-key loader's
//! bounded prompt loop; once that is exhausted the underlying decode error is
//! preserved as the `source` of [`KeyError::DecryptionFailed`].

use crate::prompt::PromptError;
use crate::provider::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The material names an algorithm the provider does not support.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// No private key marker line was found in the material.
    #[error("{0}: not a private key")]
    NotAPrivateKey(String),

    /// The line contains no recognized public key type tag, or the blob does
    /// not describe a recognized key.
    #[error("{0}: not a public key")]
    NotAPublicKey(String),

    /// Every passphrase attempt failed.  `attempts` counts interactive
    /// prompts; the last decode error is preserved unchanged as the source.
    #[error("{filename}: decryption failed after {attempts} passphrase prompt(s)")]
    DecryptionFailed {
        filename: String,
        attempts: u8,
        #[source]
        source: DecodeError,
    },

    /// The public key blob violates the length-prefixed wire format
    /// (truncated field, trailing garbage).
    #[error("{0}: malformed wire data")]
    MalformedWireData(String),

    /// Reading the key file failed.
    #[error("{filename}: read failed")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// A decode failure that was not eligible for retry, propagated as-is.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The passphrase prompt itself failed (no TTY, closed session, …).
    #[error(transparent)]
    Prompt(#[from] PromptError),
}
