//! HMAC signatures for local-provider presigned URLs.
//!
//! Signature = hex(HMAC-SHA256(secret, "{key}:{expires}")), where `expires` is a
//! unix timestamp in seconds.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &[u8], key: &str, expires: u64) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key size");
    mac.update(key.as_bytes());
    mac.update(b":");
    mac.update(expires.to_string().as_bytes());
    mac
}

pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Sign `key` until the unix time `expires`.
pub fn sign(secret: &[u8], key: &str, expires: u64) -> String {
    hex::encode(mac(secret, key, expires).finalize().into_bytes())
}

/// Check a signature produced by [`sign`] and that `expires` has not passed.
pub fn verify(secret: &[u8], key: &str, expires: u64, signature: &str) -> bool {
    if now_unix() > expires {
        return false;
    }
    let Ok(tag) = hex::decode(signature) else {
        return false;
    };
    mac(secret, key, expires).verify_slice(&tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"local-signing-secret";

    #[test]
    fn valid_signature_verifies() {
        let expires = now_unix() + 60;
        let sig = sign(SECRET, "u1/song.mp3", expires);
        assert!(verify(SECRET, "u1/song.mp3", expires, &sig));
    }

    #[test]
    fn tampered_key_or_expiry_fails() {
        let expires = now_unix() + 60;
        let sig = sign(SECRET, "u1/song.mp3", expires);
        assert!(!verify(SECRET, "u2/song.mp3", expires, &sig));
        assert!(!verify(SECRET, "u1/song.mp3", expires + 1, &sig));
        assert!(!verify(b"other-secret", "u1/song.mp3", expires, &sig));
        assert!(!verify(SECRET, "u1/song.mp3", expires, "not-hex"));
    }

    #[test]
    fn expired_signature_fails() {
        let expires = now_unix() - 1;
        let sig = sign(SECRET, "u1/song.mp3", expires);
        assert!(!verify(SECRET, "u1/song.mp3", expires, &sig));
    }
}
