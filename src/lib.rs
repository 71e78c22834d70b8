//! Verification of [NEP-413](https://github.com/near/NEPs/blob/master/neps/nep-0413.md)
//! off-chain signed messages.
//!
//! A NEAR wallet signs the SHA-256 hash of the borsh encoding of a tagged [`Message`] and returns
//! a [`SignatureResponse`]. This crate re-encodes the message exactly as the wallet did and checks
//! the returned ed25519 signature against the claimed public key.
//!
//! It does not check that the public key belongs to the claimed account, nor does it track nonces.
//! Both are left to the integrator.
//!
//! # Example
//!
//! ```rust
//! use near_nep413::{Message, SignatureResponse};
//!
//! let message = Message::new(
//!     "idOS authentication",
//!     [
//!         5, 233, 107, 175, 203, 182, 15, 111, 97, 146, 18, 10, 118, 80, 180, 9, 186, 39, 255,
//!         93, 36, 218, 196, 25, 72, 177, 237, 28, 173, 75, 17, 31,
//!     ],
//!     "idos.network",
//!     None,
//! );
//!
//! let response = SignatureResponse {
//!     account_id: "alice.near".to_string(),
//!     signature: "Ni+rXvOtyzRr7X+qtvQ9+iJUu2e8L/e6cPjSzOYr+6W22chVnptTW0QqTUhFgKUbgPwd2tTcfB1D9Q+0Xb+sBg=="
//!         .to_string(),
//!     public_key: "ed25519:8HnzkUaX21h99idPghFajoV3JZvy3SmJ4mqVwSVfLByg".to_string(),
//!     state: None,
//! };
//!
//! assert!(response.verify(message).is_ok());
//! ```

use sha2::Digest;
use std::fmt;

pub mod crypto;
pub mod errors;
pub mod nep413;

pub use crypto::public_key::{ED25519PublicKey, parse_public_key};
pub use crypto::signature::{ED25519Signature, parse_signature};
pub use errors::Nep413Error;
pub use nep413::{Message, MessageJson, NEP413_TAG, Nonce, SignatureResponse, encode, verify};

/// SHA-256 digest of the canonical message encoding.
#[derive(Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CryptoHash(pub [u8; 32]);

impl CryptoHash {
    pub fn hash(bytes: &[u8]) -> Self {
        Self(sha2::Sha256::digest(bytes).into())
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl std::fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        std::fmt::Display::fmt(&bs58::encode(self.0).into_string(), f)
    }
}
