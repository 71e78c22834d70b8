use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use base64::prelude::*;
use ed25519_dalek::Verifier;

use crate::{
    crypto::{ED25519_SIGNATURE_LENGTH, public_key::ED25519PublicKey},
    errors::SignatureDecodeError,
};

/// An ed25519 signature as returned by NEP-413 wallets.
///
/// The text form is standard padded base64 of the 64 signature bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ED25519Signature(ed25519_dalek::Signature);

impl ED25519Signature {
    pub fn from_bytes(bytes: &[u8; ED25519_SIGNATURE_LENGTH]) -> Self {
        Self(ed25519_dalek::Signature::from_bytes(bytes))
    }

    pub fn to_bytes(&self) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.0.to_bytes()
    }

    /// Verifies that this signature signs `data` with the given public key.
    /// Also if the public key is not a valid curve point returns `false`.
    pub fn verify(&self, data: &[u8], public_key: &ED25519PublicKey) -> bool {
        ed25519_dalek::VerifyingKey::from_bytes(public_key.as_bytes())
            .is_ok_and(|public_key| public_key.verify(data, &self.0).is_ok())
    }
}

/// Decodes a standard (padded) base64 signature into its 64 raw bytes.
pub fn parse_signature(value: &str) -> Result<ED25519Signature, SignatureDecodeError> {
    value.parse()
}

impl FromStr for ED25519Signature {
    type Err = SignatureDecodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; ED25519_SIGNATURE_LENGTH] = BASE64_STANDARD.decode(value)?.try_into()?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl From<ed25519_dalek::Signature> for ED25519Signature {
    fn from(signature: ed25519_dalek::Signature) -> Self {
        Self(signature)
    }
}

impl Display for ED25519Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(&BASE64_STANDARD.encode(self.0.to_bytes()))
    }
}

impl Debug for ED25519Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

impl serde::Serialize for ED25519Signature {
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

impl<'de> serde::Deserialize<'de> for ED25519Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as serde::Deserializer<'de>>::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse()
            .map_err(|err: SignatureDecodeError| serde::de::Error::custom(err.to_string()))
    }
}
