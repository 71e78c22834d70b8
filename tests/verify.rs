use base64::{Engine, prelude::BASE64_STANDARD};
use near_nep413::{
    Message, Nep413Error, SignatureResponse, errors::PublicKeyError, parse_public_key, verify,
};
use testresult::TestResult;
use tracing_subscriber::EnvFilter;

// The mockup data is created using the sender/my-near-wallet NEP413 implementation
// from the seed phrase "fatal edge jacket cash hard pass gallery fabric whisper size rain biology".
const WALLET_PUBLIC_KEY: &str = "ed25519:2RM3EotCzEiVobm6aMjaup43k8cFffR4KHFtrqbZ79Qy";
const WALLET_NONCE: &str = "KNV0cOpvJ50D5vfF9pqWom8wo2sliQ4W+Wa7uZ3Uk6Y=";

const IDOS_NONCE: [u8; 32] = [
    5, 233, 107, 175, 203, 182, 15, 111, 97, 146, 18, 10, 118, 80, 180, 9, 186, 39, 255, 93, 36,
    218, 196, 25, 72, 177, 237, 28, 173, 75, 17, 31,
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("near_nep413=trace")),
        )
        .with_test_writer()
        .try_init();
}

fn wallet_nonce() -> Result<[u8; 32], testresult::TestError> {
    let nonce: [u8; 32] = BASE64_STANDARD
        .decode(WALLET_NONCE)?
        .try_into()
        .map_err(|_| "nonce is not 32 bytes")?;
    Ok(nonce)
}

fn response(signature: &str, public_key: &str) -> SignatureResponse {
    SignatureResponse {
        account_id: "round-toad.testnet".to_string(),
        signature: signature.to_string(),
        public_key: public_key.to_string(),
        state: None,
    }
}

fn idos_message() -> Message {
    Message::new("idOS authentication", IDOS_NONCE, "idos.network", None)
}

fn idos_response() -> SignatureResponse {
    response(
        "Ni+rXvOtyzRr7X+qtvQ9+iJUu2e8L/e6cPjSzOYr+6W22chVnptTW0QqTUhFgKUbgPwd2tTcfB1D9Q+0Xb+sBg==",
        "ed25519:8HnzkUaX21h99idPghFajoV3JZvy3SmJ4mqVwSVfLByg",
    )
}

#[test]
fn idos_authentication() -> TestResult {
    init_tracing();
    verify(idos_message(), &idos_response())?;
    Ok(())
}

#[test]
fn idos_authentication_with_mutated_nonce() {
    init_tracing();
    let mut message = idos_message();
    message.nonce[0] ^= 0xff;
    assert!(matches!(
        verify(message, &idos_response()),
        Err(Nep413Error::SignatureMismatch)
    ));
}

#[test]
fn idos_authentication_without_colon_in_key() {
    let response = SignatureResponse {
        public_key: "ed25519".to_string(),
        ..idos_response()
    };
    assert!(matches!(
        verify(idos_message(), &response),
        Err(Nep413Error::PublicKey(PublicKeyError::InvalidKeyFormat(_)))
    ));
}

#[test]
fn wallet_signature_without_callback_url() -> TestResult {
    init_tracing();
    let message = Message::new("Hello NEAR!", wallet_nonce()?, "example.near", None);
    let response = response(
        "NnJgPU1Ql7ccRTITIoOVsIfElmvH1RV7QAT4a9Vh6ShCOnjIzRwxqX54JzoQ/nK02p7VBMI2vJn48rpImIJwAw==",
        WALLET_PUBLIC_KEY,
    );

    response.verify(message)?;
    Ok(())
}

#[test]
fn wallet_signature_with_callback_url() -> TestResult {
    init_tracing();
    let message = Message::new(
        "Hello NEAR!",
        wallet_nonce()?,
        "example.near",
        Some("http://localhost:3000".to_string()),
    );
    let response = response(
        "zzZQ/GwAjrZVrTIFlvmmQbDQHllfzrr8urVWHaRt5cPfcXaCSZo35c5LDpPpTKivR6BxLyb3lcPM0FfCW5lcBQ==",
        WALLET_PUBLIC_KEY,
    );

    response.verify(message.clone())?;

    // The same signature does not cover the message without the callback.
    let mut without_callback = message;
    without_callback.callback_url = None;
    assert!(matches!(
        response.verify(without_callback),
        Err(Nep413Error::SignatureMismatch)
    ));
    Ok(())
}

#[test]
fn wallet_json_request() -> TestResult {
    let message = Message::from_json(&format!(
        r#"{{
            "message": "Hello NEAR!",
            "nonce": "{WALLET_NONCE}",
            "recipient": "example.near",
            "callbackUrl": "http://localhost:3000"
        }}"#
    ))?;
    let response: SignatureResponse = serde_json::from_str(&format!(
        r#"{{
            "accountId": "round-toad.testnet",
            "publicKey": "{WALLET_PUBLIC_KEY}",
            "signature": "zzZQ/GwAjrZVrTIFlvmmQbDQHllfzrr8urVWHaRt5cPfcXaCSZo35c5LDpPpTKivR6BxLyb3lcPM0FfCW5lcBQ=="
        }}"#
    ))?;

    assert_eq!(parse_public_key(&response.public_key)?.to_string(), WALLET_PUBLIC_KEY);
    response.verify(message)?;
    Ok(())
}

#[test]
fn verifications_are_independent_across_threads() {
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                scope.spawn(move || {
                    let mut message = idos_message();
                    // Even threads verify the original message, odd threads a mutated one.
                    if i % 2 == 1 {
                        message.nonce[usize::from(i)] ^= 1;
                    }
                    (i, verify(message, &idos_response()))
                })
            })
            .collect();

        for handle in handles {
            let (i, result) = handle.join().expect("verification thread panicked");
            if i % 2 == 0 {
                assert!(result.is_ok(), "thread {i}: {result:?}");
            } else {
                assert!(
                    matches!(result, Err(Nep413Error::SignatureMismatch)),
                    "thread {i}: {result:?}"
                );
            }
        }
    });
}
