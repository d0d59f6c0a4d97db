//! Signed Session Tokens
//!
//! The cookie carries `<session_id>.<signature>` where the signature is
//! HMAC-SHA256 over the uuid string under the application session
//! secret. A token that fails signature verification never reaches the
//! store.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Sign a session identity into a cookie token
pub fn sign(session_id: Uuid, secret: &[u8; 32]) -> String {
    let session_id = session_id.to_string();

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        session_id,
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Parse and verify a cookie token back into a session identity
pub fn parse(token: &str, secret: &[u8; 32]) -> AuthResult<Uuid> {
    let Some((session_id_str, signature_b64)) = token.split_once('.') else {
        return Err(AuthError::SessionInvalid);
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    session_id_str.parse().map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_parse_roundtrip() {
        let id = Uuid::new_v4();
        let token = sign(id, &SECRET);
        assert_eq!(parse(&token, &SECRET).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_wrong_secret() {
        let token = sign(Uuid::new_v4(), &SECRET);
        let other = [8u8; 32];
        assert!(parse(&token, &other).is_err());
    }

    #[test]
    fn test_parse_rejects_tampered_id() {
        let token = sign(Uuid::new_v4(), &SECRET);
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert!(parse(&forged, &SECRET).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("", &SECRET).is_err());
        assert!(parse("no-dot-here", &SECRET).is_err());
        assert!(parse("a.b.c", &SECRET).is_err());
    }
}
