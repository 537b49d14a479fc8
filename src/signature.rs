//! Webhook signature verification
//!
//! Push providers sign the raw request body with HMAC using a shared
//! secret and send the result in the `X-Hub-Signature` header as
//! `<algorithm>=<hex-digest>`. Verification must reject, never error:
//! a malformed header is an unauthenticated request, not a fault.

use ring::hmac;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Map an algorithm name from the signature header to an HMAC algorithm.
fn algorithm(name: &str) -> Option<hmac::Algorithm> {
    match name {
        "sha1" => Some(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY),
        "sha256" => Some(hmac::HMAC_SHA256),
        "sha384" => Some(hmac::HMAC_SHA384),
        "sha512" => Some(hmac::HMAC_SHA512),
        _ => None,
    }
}

/// Encode the shared secret one byte per character (Latin-1).
///
/// Secrets containing characters above U+00FF have no single-byte
/// encoding and cannot match any signature.
fn secret_bytes(secret: &str) -> Option<Vec<u8>> {
    secret
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

/// Verify an `X-Hub-Signature` style header against the raw body.
///
/// The header has the form `<algorithm>=<hex-digest>`, split on the
/// first `=`. Supported algorithms: sha1, sha256, sha384, sha512.
/// Returns false on any malformed header, unknown algorithm, or digest
/// mismatch. The digest comparison is constant-time (`ring`'s HMAC
/// verify), so the check leaks no timing information about the secret.
pub fn verify(header: &str, body: &[u8], secret: &str) -> bool {
    let (name, digest) = match header.split_once('=') {
        Some(parts) => parts,
        None => return false,
    };
    let algorithm = match algorithm(name) {
        Some(a) => a,
        None => return false,
    };
    let key_bytes = match secret_bytes(secret) {
        Some(b) => b,
        None => return false,
    };
    let expected = match hex::decode(digest) {
        Ok(b) => b,
        Err(_) => return false,
    };

    let key = hmac::Key::new(algorithm, &key_bytes);
    hmac::verify(&key, body, &expected).is_ok()
}
