//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Error from keyed signing operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum CryptoError {
    #[error("Signing key must not be empty")]
    EmptyKey,
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a numeric code with exactly `digits` digits and no leading zero
///
/// `digits` is clamped to `1..=9` so the range fits in `u32`.
pub fn random_numeric_code(digits: u32) -> String {
    let digits = digits.clamp(1, 9);
    let low = 10u32.pow(digits - 1);
    let high = low * 10;
    OsRng.gen_range(low..high).to_string()
}

/// Encode bytes as unpadded URL-safe base64
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded URL-safe base64
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

fn keyed_mac(key: &[u8]) -> Result<HmacSha256, CryptoError> {
    if key.is_empty() {
        return Err(CryptoError::EmptyKey);
    }
    HmacSha256::new_from_slice(key).map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32], CryptoError> {
    let mut mac = keyed_mac(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Verify an HMAC-SHA256 tag in constant time
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool, CryptoError> {
    let mut mac = keyed_mac(key)?;
    mac.update(data);
    Ok(mac.verify_slice(tag).is_ok())
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
