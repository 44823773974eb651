// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Generate a session token using the OS RNG.
pub fn generate_token_default() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, DEFAULT_TOKEN_BYTES)
}

/// Generate a URL-safe token from random bytes.
/// - Uses Base64 URL-safe, no padding.
/// - Typically 32 bytes -> ~43 char token.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}

/// SHA-256 of the raw token. Only this goes in the DB.
pub fn hash_token(token: &str) -> [u8; 32] {
    let out = Sha256::digest(token.as_bytes());
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
