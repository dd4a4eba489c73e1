//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Standard base64 (used for secrets in environment variables)
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s.trim())
}

/// URL-safe base64 without padding (used inside bearer tokens)
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

pub fn from_base64_url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

/// Compute HMAC-SHA256 over `data`
pub fn hmac_sign(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Verify an HMAC-SHA256 tag in constant time
pub fn hmac_verify(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_rfc4231_case_2() {
        let tag = hmac_sign(b"Jefe", b"what do ya want for nothing?");
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        assert_eq!(tag.to_vec(), expected);
    }

    #[test]
    fn test_hmac_verify() {
        let key = [42u8; 32];
        let tag = hmac_sign(&key, b"token-id");
        assert!(hmac_verify(&key, b"token-id", &tag));
        assert!(!hmac_verify(&key, b"other-id", &tag));
        assert!(!hmac_verify(&[7u8; 32], b"token-id", &tag));
        assert!(!hmac_verify(&key, b"token-id", &tag[..16]));
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        assert_eq!(from_base64(&to_base64(data)).unwrap(), data);
        assert_eq!(from_base64_url(&to_base64_url(data)).unwrap(), data);
        assert!(!to_base64_url(&[0xfb, 0xff]).contains('='));
    }
}
