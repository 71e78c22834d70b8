#[derive(thiserror::Error, Debug)]
pub enum PublicKeyError {
    #[error("Invalid public key format, expected ed25519:<base58 key data> but got: {0}")]
    InvalidKeyFormat(String),
    #[error("Unsupported key algorithm. Expected: ed25519 but got: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Base58 decoding error: {0}")]
    KeyDecodeError(#[from] bs58::decode::Error),
    #[error("Invalid public key length, expected 32 but got {0}")]
    InvalidKeyLength(usize),
}

impl From<Vec<u8>> for PublicKeyError {
    fn from(value: Vec<u8>) -> Self {
        Self::InvalidKeyLength(value.len())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SignatureDecodeError {
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Incorrect signature length, expected 64 but got {0}")]
    IncorrectLength(usize),
}

impl From<Vec<u8>> for SignatureDecodeError {
    fn from(value: Vec<u8>) -> Self {
        Self::IncorrectLength(value.len())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Nep413Error {
    #[error(transparent)]
    PublicKey(#[from] PublicKeyError),
    #[error(transparent)]
    Signature(#[from] SignatureDecodeError),
    #[error("Failed to encode the message: {0}")]
    EncodingError(#[from] borsh::io::Error),
    #[error("Signature verification failed")]
    SignatureMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum MessageDecodeError {
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Borsh deserialization error: {0}")]
    Borsh(#[from] borsh::io::Error),
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Incorrect nonce length, expected 32 but got {0}")]
    IncorrectNonceLength(usize),
}
