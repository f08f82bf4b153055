//! SSH key material loading.
//!
//! Turns serialized key material into typed [`KeyObject`]s:
//!
//! - **Private keys**: PEM-armored files (`-----BEGIN … PRIVATE KEY-----`,
//!   including the unified OpenSSH container), with a bounded interactive
//!   passphrase-retry loop for encrypted material.
//! - **Public keys**: single `authorized_keys`-style lines
//!   (`<type-tag> <base64-blob> [comment…]`).
//!
//! # Architecture
//!
//! ```text
//! bytes ──► RawKeyMaterial (armor detection, ENCRYPTED heuristic)
//!                 │
//!                 ▼
//!        PrivateKeyLoader ──► CryptoProvider::decode_private
//!                 │                    ▲
//!         retry ≤ 3 prompts           │
//!                 ▼                    │
//!        Prompter / PrompterSession   │
//!
//! line ───► PublicKeyParser ──► WireReader ──► CryptoProvider::decode_public
//! ```
//!
//! The cryptographic primitives live behind the [`CryptoProvider`] trait; the
//! default [`SshKeyProvider`] is backed by the `ssh_key` crate. Passphrase
//! collection lives behind [`Prompter`] so callers control how (and whether)
//! a human is asked — [`TtyPrompter`] talks to `/dev/tty` with echo disabled.
//!
//! All passphrase buffers are [`zeroize::Zeroizing`] and scrubbed on drop.

pub mod error;
pub mod file;
pub mod material;
pub mod private;
pub mod prompt;
pub mod provider;
pub mod public;
pub mod registry;
pub mod types;
pub mod wire;

pub use error::KeyError;
pub use file::{load_private_key_file, load_public_key_file, read_key_file};
pub use material::{ArmorKind, RawKeyMaterial};
pub use private::{PrivateKeyLoader, MAX_PASSPHRASE_PROMPTS};
pub use prompt::{PromptContext, PromptError, Prompter, PrompterSession, TtyPrompter};
pub use provider::{CryptoProvider, DecodeError, DecodeErrorKind, SshKeyProvider};
pub use public::PublicKeyParser;
pub use registry::KeyTypeRegistry;
pub use types::{KeyAlgorithm, KeyObject};
