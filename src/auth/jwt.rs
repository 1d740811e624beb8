use std::time::Duration;

use axum::extract::FromRef;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::state::AppState;

use super::claims::Claims;

/// Why a token was rejected. Logged for diagnostics only; the external
/// response is a uniform 401 regardless of the reason.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("signature mismatch")]
    BadSignature,
    #[error("malformed token")]
    Malformed,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let jwt = &state.config.jwt;
        Self::new(&jwt.secret, Duration::from_secs(jwt.expires_in))
    }
}

impl JwtKeys {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    /// Issue a token for `user_id` valid from `now` for the configured
    /// lifetime.
    pub fn sign_at(&self, user_id: ObjectId, now: DateTime<Utc>) -> anyhow::Result<String> {
        let exp = now + chrono::Duration::seconds(self.lifetime.as_secs() as i64);
        let claims = Claims {
            sub: user_id.to_hex(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    pub fn sign(&self, user_id: ObjectId) -> anyhow::Result<String> {
        self.sign_at(user_id, Utc::now())
    }

    /// Verify signature and expiry. The decode path checks the signature
    /// before it looks at any time claim, so a forged token never reaches
    /// the expiry logic.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // No clock leeway: a token is invalid from the instant its
        // lifetime elapses.
        validation.leeway = 0;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(sub = %data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(err) => {
                use jsonwebtoken::errors::ErrorKind;
                Err(match err.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret, Duration::from_secs(86_400))
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret");
        let user_id = ObjectId::new();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id.to_hex());
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret");
        // Issued two days ago with a one-day lifetime.
        let issued = Utc::now() - chrono::Duration::days(2);
        let token = keys.sign_at(ObjectId::new(), issued).expect("sign");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn verify_rejects_token_just_past_expiry() {
        let keys = make_keys("dev-secret");
        // Lifetime elapsed half a minute ago; no grace window applies.
        let issued = Utc::now() - chrono::Duration::seconds(86_400 + 30);
        let token = keys.sign_at(ObjectId::new(), issued).expect("sign");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = make_keys("secret-one").sign(ObjectId::new()).expect("sign");
        let err = make_keys("secret-two").verify(&token).unwrap_err();
        assert_eq!(err, TokenError::BadSignature);
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(ObjectId::new()).expect("sign");

        // Flip one character of the payload segment without re-signing.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        let i = payload.len() / 2;
        payload[i] = if payload[i] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();

        assert!(keys.verify(&parts.join(".")).is_err());
    }

    #[test]
    fn verify_rejects_missing_subject() {
        #[derive(Serialize)]
        struct NoSubject {
            iat: usize,
            exp: usize,
        }
        let keys = make_keys("dev-secret");
        let now = Utc::now().timestamp() as usize;
        let bogus = encode(
            &Header::default(),
            &NoSubject {
                iat: now,
                exp: now + 3600,
            },
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .unwrap();
        assert_eq!(keys.verify(&bogus).unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret");
        assert_eq!(
            keys.verify("definitely.not.a-jwt").unwrap_err(),
            TokenError::Malformed
        );
    }
}
