//! NEP-413: Near Wallet API - support for signMessage method
//!
//! The wallet signs `sha256(borsh(message))` where the borsh layout of [`Message`] is:
//!
//! ```text
//! tag:          u32 (little-endian, always 2^31 + 413)
//! message:      u32 length + UTF-8 bytes
//! nonce:        [u8; 32] raw
//! recipient:    u32 length + UTF-8 bytes
//! callback_url: 0u8 if absent, 1u8 + u32 length + UTF-8 bytes if present
//! ```

use base64::prelude::*;
use borsh::{BorshDeserialize, BorshSerialize};
use tracing::{debug, trace};

use crate::{
    CryptoHash,
    crypto::{
        public_key::{ED25519PublicKey, parse_public_key},
        signature::{ED25519Signature, parse_signature},
    },
    errors::{MessageDecodeError, Nep413Error, PublicKeyError, SignatureDecodeError},
};

const VERIFIER_TARGET: &str = "near_nep413::verifier";

/// The NEP-413 discriminant prefix: 2^31 + 413
pub const NEP413_TAG: u32 = (1u32 << 31) + 413;

/// The payload a NEAR wallet signs for `signMessage`.
///
/// The protocol tag is not settable by callers. A message decoded from bytes may carry any tag,
/// but [`encode`] and [`verify`] always replace it with [`NEP413_TAG`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Message {
    tag: u32,
    /// The plaintext shown to the signer.
    pub message: String,
    /// A nonce that uniquely identifies this instance of the message.
    /// The first 8 bytes can optionally contain a timestamp (ms since epoch) as big-endian uint64.
    pub nonce: [u8; 32],
    /// The recipient to whom the message is destined (e.g. "alice.near" or "myapp.com").
    pub recipient: String,
    /// A callback URL that will be called with the signed message as a query parameter.
    pub callback_url: Option<String>,
}

impl Message {
    pub fn new(
        message: impl Into<String>,
        nonce: [u8; 32],
        recipient: impl Into<String>,
        callback_url: Option<String>,
    ) -> Self {
        Self {
            tag: NEP413_TAG,
            message: message.into(),
            nonce,
            recipient: recipient.into(),
            callback_url,
        }
    }

    pub const fn tag(&self) -> u32 {
        self.tag
    }

    fn normalize_tag(&mut self) {
        self.tag = NEP413_TAG;
    }

    /// Decodes a message from its borsh bytes, keeping whatever tag the bytes carry.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageDecodeError> {
        Ok(borsh::from_slice(bytes)?)
    }

    /// Decodes a message from its wallet JSON form, see [`MessageJson`].
    pub fn from_json(json: &str) -> Result<Self, MessageDecodeError> {
        Ok(serde_json::from_str::<MessageJson>(json)?.into())
    }

    /// Compute the hash a wallet signs for this message.
    pub fn compute_hash(&self) -> Result<CryptoHash, Nep413Error> {
        Ok(CryptoHash::hash(&encode(self.clone())?))
    }

    /// Extract the timestamp from the nonce if present.
    ///
    /// The first 8 bytes of the nonce are read as a big-endian uint64 of milliseconds since
    /// epoch. There is no way to tell a timestamp apart from random nonce bytes, so the caller
    /// must know whether timestamps are expected.
    pub fn extract_timestamp_from_nonce(&self) -> u64 {
        let mut timestamp = [0u8; 8];
        timestamp.copy_from_slice(&self.nonce[..8]);
        u64::from_be_bytes(timestamp)
    }
}

/// Produces the canonical bytes of a message.
///
/// Takes the message by value so the output only depends on the logical value. The tag is
/// always written as [`NEP413_TAG`].
pub fn encode(mut message: Message) -> Result<Vec<u8>, Nep413Error> {
    message.normalize_tag();
    Ok(borsh::to_vec(&message)?)
}

/// Represents a nonce that can be deserialized from either:
/// - A JSON array of numbers (e.g., `[0, 1, 2, ..., 31]`) - common from JavaScript Uint8Array
/// - A base64-encoded string (e.g., `"AAAAAAA..."`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce(pub [u8; 32]);

impl Nonce {
    pub fn from_base64(value: &str) -> Result<Self, MessageDecodeError> {
        BASE64_STANDARD.decode(value)?.try_into()
    }
}

impl TryFrom<Vec<u8>> for Nonce {
    type Error = MessageDecodeError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let nonce: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| MessageDecodeError::IncorrectNonceLength(v.len()))?;
        Ok(Self(nonce))
    }
}

impl serde::Serialize for Nonce {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Nonce {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct NonceVisitor;

        impl<'de> Visitor<'de> for NonceVisitor {
            type Value = Nonce;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a 32-byte nonce as either a base64 string or array of numbers")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Nonce::from_base64(value).map_err(de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut bytes = Vec::with_capacity(32);
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                Nonce::try_from(bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(NonceVisitor)
    }
}

/// JSON form of [`Message`] as sent by frontend applications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageJson {
    pub message: String,
    pub nonce: Nonce,
    pub recipient: String,
    #[serde(
        rename = "callbackUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub callback_url: Option<String>,
}

impl From<MessageJson> for Message {
    fn from(value: MessageJson) -> Self {
        Self::new(
            value.message,
            value.nonce.0,
            value.recipient,
            value.callback_url,
        )
    }
}

impl From<Message> for MessageJson {
    fn from(value: Message) -> Self {
        Self {
            message: value.message,
            nonce: Nonce(value.nonce),
            recipient: value.recipient,
            callback_url: value.callback_url,
        }
    }
}

/// The output returned by wallets after signing a message.
///
/// `account_id` and `state` are carried as-is and never checked. Binding the public key to the
/// account requires an access key lookup on chain.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct SignatureResponse {
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// Standard base64 of the 64 signature bytes.
    pub signature: String,
    /// `ed25519:<base58 key bytes>`
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Optional state for authentication purposes (applicable to browser wallets).
    /// Not part of the binary form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[borsh(skip)]
    pub state: Option<String>,
}

impl SignatureResponse {
    pub fn decode_public_key(&self) -> Result<ED25519PublicKey, PublicKeyError> {
        parse_public_key(&self.public_key)
    }

    pub fn decode_signature(&self) -> Result<ED25519Signature, SignatureDecodeError> {
        parse_signature(&self.signature)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MessageDecodeError> {
        Ok(borsh::from_slice(bytes)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Nep413Error> {
        Ok(borsh::to_vec(self)?)
    }

    /// Verify the signature against the given message, see [`verify`].
    pub fn verify(&self, message: Message) -> Result<(), Nep413Error> {
        verify(message, self)
    }
}

/// Verifies a NEP-413 signature.
///
/// The tag is reset to [`NEP413_TAG`], the public key and signature are decoded, the message is
/// encoded and hashed with SHA-256 and the hash is checked against the signature.
/// Any failure is final: [`Nep413Error::SignatureMismatch`] when the signature does not match,
/// or the decoding error of the key or the signature.
pub fn verify(mut message: Message, response: &SignatureResponse) -> Result<(), Nep413Error> {
    debug!(target: VERIFIER_TARGET, account_id = %response.account_id, "Verifying signed message");
    message.normalize_tag();

    let public_key = response.decode_public_key()?;
    let signature = response.decode_signature()?;

    let encoded = encode(message)?;
    trace!(target: VERIFIER_TARGET, encoded = %hex::encode(&encoded), "Encoded message");
    let hash = CryptoHash::hash(&encoded);
    trace!(target: VERIFIER_TARGET, %hash, "Hashed message");

    if !signature.verify(hash.as_bytes(), &public_key) {
        debug!(target: VERIFIER_TARGET, %public_key, "Signature does not match");
        return Err(Nep413Error::SignatureMismatch);
    }

    debug!(target: VERIFIER_TARGET, %public_key, "Signature verified");
    Ok(())
}
