use crate::errors::PublicKeyError;

pub mod public_key;
pub mod signature;

/// Algorithm prefix of NEAR-formatted ed25519 keys, e.g. `ed25519:8Hnz...`
pub const ED25519_KEY_PREFIX: &str = "ed25519";
pub const ED25519_PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
pub const ED25519_SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Splits `<algorithm>:<data>` into its two parts.
///
/// Exactly one colon is accepted and the algorithm must literally be `ed25519`.
/// Unlike general NEAR key parsing there is no implicit default algorithm.
fn split_key_type_data(value: &str) -> Result<&str, PublicKeyError> {
    let mut parts = value.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(ED25519_KEY_PREFIX), Some(key_data), None) => Ok(key_data),
        (Some(algorithm), Some(_), None) => {
            Err(PublicKeyError::UnsupportedAlgorithm(algorithm.to_string()))
        }
        _ => Err(PublicKeyError::InvalidKeyFormat(value.to_string())),
    }
}
