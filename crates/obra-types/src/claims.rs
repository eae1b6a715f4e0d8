use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by the session token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Account email.
    pub sub: String,
    /// Role name at issue time.
    pub role: String,
    #[serde(default)]
    pub iat: i64,
    /// Expiry as unix seconds; absent claims decode as 0, i.e. already expired.
    #[serde(default)]
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not valid claims JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decodes the payload segment of a JWT without checking the signature.
/// The signing secret never reaches the browser; the API verifies the
/// token on every request.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(ClaimsError::Malformed),
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl TokenClaims {
    /// Milliseconds until expiry relative to `now_ms`. Zero or negative
    /// means the token has already lapsed. Saturating: a hostile `exp`
    /// near `i64::MAX` must not panic the login path.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.exp.saturating_mul(1000).saturating_sub(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fake_jwt(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.sig", header, body)
    }

    #[test]
    fn decodes_all_claims() {
        let token = fake_jwt(json!({
            "sub": "ana@example.com",
            "role": "admin",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "ana@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn missing_exp_defaults_to_zero() {
        let token = fake_jwt(json!({"sub": "a@b.c", "role": "user"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 0);
        assert!(claims.remaining_ms(1) < 0);
    }

    #[test]
    fn rejects_tokens_without_three_parts() {
        assert!(matches!(
            decode_claims("onlyonepart"),
            Err(ClaimsError::Malformed)
        ));
        assert!(matches!(
            decode_claims("two.parts"),
            Err(ClaimsError::Malformed)
        ));
        assert!(matches!(
            decode_claims("a.b.c.d"),
            Err(ClaimsError::Malformed)
        ));
    }

    #[test]
    fn rejects_garbage_payload() {
        assert!(matches!(
            decode_claims("head.!!!.sig"),
            Err(ClaimsError::Encoding(_))
        ));
        let not_json = format!("head.{}.sig", URL_SAFE_NO_PAD.encode(b"not json"));
        assert!(matches!(
            decode_claims(&not_json),
            Err(ClaimsError::Payload(_))
        ));
    }

    #[test]
    fn remaining_ms_is_relative_to_now() {
        let claims = TokenClaims {
            sub: "a@b.c".into(),
            role: "user".into(),
            iat: 0,
            exp: 10,
        };
        assert_eq!(claims.remaining_ms(8_000), 2_000);
        assert_eq!(claims.remaining_ms(10_000), 0);
        assert_eq!(claims.remaining_ms(12_000), -2_000);
    }

    #[test]
    fn huge_exp_saturates_instead_of_overflowing() {
        let claims = TokenClaims {
            sub: "a@b.c".into(),
            role: "user".into(),
            iat: 0,
            exp: i64::MAX,
        };
        assert_eq!(claims.remaining_ms(1_000), i64::MAX - 1_000);
        assert!(claims.remaining_ms(-1) == i64::MAX);
    }
}
