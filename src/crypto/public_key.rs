use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use crate::{
    crypto::{ED25519_KEY_PREFIX, ED25519_PUBLIC_KEY_LENGTH, split_key_type_data},
    errors::PublicKeyError,
};

/// Raw 32-byte ed25519 public key.
///
/// The text form is the NEAR one: `ed25519:<base58 key bytes>`.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ED25519PublicKey(pub [u8; ED25519_PUBLIC_KEY_LENGTH]);

impl ED25519PublicKey {
    pub const fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LENGTH] {
        &self.0
    }
}

/// Parses a NEAR-formatted ed25519 public key.
///
/// Fails with [`PublicKeyError::InvalidKeyFormat`] if the text does not split into exactly
/// two colon-separated parts, [`PublicKeyError::UnsupportedAlgorithm`] if the first part is
/// not `ed25519`, [`PublicKeyError::KeyDecodeError`] on invalid base58 and
/// [`PublicKeyError::InvalidKeyLength`] if the decoded key is not 32 bytes.
pub fn parse_public_key(value: &str) -> Result<ED25519PublicKey, PublicKeyError> {
    value.parse()
}

impl FromStr for ED25519PublicKey {
    type Err = PublicKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key_data = split_key_type_data(value)?;
        Ok(Self(bs58::decode(key_data).into_vec()?.try_into()?))
    }
}

impl From<ed25519_dalek::VerifyingKey> for ED25519PublicKey {
    fn from(key: ed25519_dalek::VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl Display for ED25519PublicKey {
    fn fmt(&self, fmt: &mut Formatter) -> std::fmt::Result {
        write!(
            fmt,
            "{}:{}",
            ED25519_KEY_PREFIX,
            bs58::encode(&self.0).into_string()
        )
    }
}

impl Debug for ED25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

impl serde::Serialize for ED25519PublicKey {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<<S as serde::Serializer>::Ok, <S as serde::Serializer>::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ED25519PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as serde::Deserializer<'de>>::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse()
            .map_err(|err: PublicKeyError| serde::de::Error::custom(err.to_string()))
    }
}
